//! Storage slot entity - Durable key-value pairs for client-local state.
//!
//! Each row holds one serialized blob under a namespace key. The goal collection
//! lives in a single slot and is overwritten as a whole on every save.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Storage slot database model - one serialized value per key
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "storage_slots")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Namespace key (e.g., `"goaltracker-goals"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Serialized value stored as text
    pub value: String,
    /// When this slot was last written
    pub updated_at: DateTime,
}

/// `StorageSlot` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
