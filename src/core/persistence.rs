//! Persistence adapter - loads and saves the whole goal collection as one blob.
//!
//! The collection is serialized to JSON and written under a single namespace key,
//! overwriting whatever was there. There is no schema version in the blob.

use super::goal::Goal;
use crate::{
    entities::{StorageSlot, storage_slot},
    errors::{Error, Result},
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Select, Set,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};
use tracing::{debug, info, instrument};

/// Storage backend for the goal collection.
#[async_trait]
pub trait GoalPersistence: Send + Sync {
    /// Reads the persisted collection. An absent slot yields an empty collection.
    ///
    /// # Errors
    /// [`Error::PersistenceParse`] if the stored blob is not a valid goal list.
    async fn load(&self) -> Result<Vec<Goal>>;

    /// Overwrites the persisted collection with `goals`.
    ///
    /// # Errors
    /// [`Error::PersistenceWriteFailed`] if the storage medium rejects the write.
    async fn save(&self, goals: &[Goal]) -> Result<()>;
}

/// Serializes a goal collection into the stored blob format.
pub fn encode_goals(goals: &[Goal]) -> Result<String> {
    serde_json::to_string(goals).map_err(Error::PersistenceEncode)
}

/// Parses a stored blob back into a goal collection.
pub fn decode_goals(blob: &str) -> Result<Vec<Goal>> {
    serde_json::from_str(blob).map_err(Into::into)
}

/// Goal persistence backed by a `storage_slots` row in the database.
#[derive(Debug, Clone)]
pub struct SeaOrmPersistence {
    db: DatabaseConnection,
    key: String,
}

impl SeaOrmPersistence {
    /// Creates an adapter storing the collection under `key`.
    pub fn new(db: DatabaseConnection, key: impl Into<String>) -> Self {
        Self {
            db,
            key: key.into(),
        }
    }

    /// Namespace key this adapter writes to.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    fn slot_query(&self) -> Select<StorageSlot> {
        StorageSlot::find().filter(storage_slot::Column::Key.eq(self.key.as_str()))
    }

    async fn write_slot(&self, blob: String) -> std::result::Result<(), sea_orm::DbErr> {
        let now = Utc::now().naive_utc();
        let existing = self.slot_query().one(&self.db).await?;

        match existing {
            Some(slot) => {
                let mut slot: storage_slot::ActiveModel = slot.into();
                slot.value = Set(blob);
                slot.updated_at = Set(now);
                slot.update(&self.db).await?;
            }
            None => {
                let slot = storage_slot::ActiveModel {
                    key: Set(self.key.clone()),
                    value: Set(blob),
                    updated_at: Set(now),
                    ..Default::default()
                };
                slot.insert(&self.db).await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl GoalPersistence for SeaOrmPersistence {
    #[instrument(skip(self), fields(key = %self.key))]
    async fn load(&self) -> Result<Vec<Goal>> {
        match self.slot_query().one(&self.db).await? {
            Some(slot) => {
                let goals = decode_goals(&slot.value)?;
                info!("Loaded {} goals from storage", goals.len());
                Ok(goals)
            }
            None => {
                debug!("No stored goals found, starting empty");
                Ok(Vec::new())
            }
        }
    }

    #[instrument(skip(self, goals), fields(key = %self.key, count = goals.len()))]
    async fn save(&self, goals: &[Goal]) -> Result<()> {
        let blob = encode_goals(goals)?;
        self.write_slot(blob)
            .await
            .map_err(|e| Error::PersistenceWriteFailed {
                reason: e.to_string(),
            })?;
        debug!("Goals written to storage");
        Ok(())
    }
}

/// In-process goal persistence holding the serialized blob in memory.
///
/// Clones share the same slot. Writes can be switched to fail to simulate a storage
/// medium that rejects them (e.g., a full quota).
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    slot: Arc<Mutex<Option<String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryPersistence {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot that already holds `blob`.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(blob.into()))),
            fail_writes: Arc::default(),
        }
    }

    /// Makes every following `save` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw contents of the slot, if anything was ever written.
    pub fn blob(&self) -> Result<Option<String>> {
        self.slot
            .lock()
            .map(|slot| slot.clone())
            .map_err(|_| Error::PersistenceWriteFailed {
                reason: "Storage slot lock poisoned".to_string(),
            })
    }
}

#[async_trait]
impl GoalPersistence for MemoryPersistence {
    async fn load(&self) -> Result<Vec<Goal>> {
        match self.blob()? {
            Some(blob) => decode_goals(&blob),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, goals: &[Goal]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::PersistenceWriteFailed {
                reason: "Storage quota exceeded".to_string(),
            });
        }

        let blob = encode_goals(goals)?;
        let mut slot = self.slot.lock().map_err(|_| Error::PersistenceWriteFailed {
            reason: "Storage slot lock poisoned".to_string(),
        })?;
        *slot = Some(blob);
        Ok(())
    }
}
