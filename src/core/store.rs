//! Goal store - the authoritative, ordered goal collection.
//!
//! The store owns the in-memory goals (newest first) and writes the full collection
//! through its persistence adapter after every mutation. If that write fails the
//! in-memory change stands and the error is returned to the caller.

use super::{
    derive::{GoalCounts, aggregate_counts},
    goal::{Goal, GoalDraft, parse_number},
    persistence::GoalPersistence,
};
use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

/// Owns the goal collection and keeps it in sync with durable storage.
#[derive(Debug)]
pub struct GoalStore<P> {
    persistence: P,
    goals: Vec<Goal>,
}

impl<P: GoalPersistence> GoalStore<P> {
    /// Loads the persisted collection.
    ///
    /// # Errors
    /// Fails if the stored data cannot be read or parsed.
    pub async fn load(persistence: P) -> Result<Self> {
        let goals = persistence.load().await?;
        debug!("Goal store initialized with {} goals", goals.len());
        Ok(Self { persistence, goals })
    }

    /// Loads the persisted collection, starting empty if it cannot be read.
    ///
    /// The unreadable data is left in place until the next mutation overwrites it.
    pub async fn load_or_empty(persistence: P) -> Self {
        match persistence.load().await {
            Ok(goals) => Self { persistence, goals },
            Err(e) => {
                warn!("Stored goals could not be loaded, starting with an empty collection: {e}");
                Self {
                    persistence,
                    goals: Vec::new(),
                }
            }
        }
    }

    /// All goals, newest first.
    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Finds a goal by id.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Number of goals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Status totals for the whole collection as of `now`.
    #[must_use]
    pub fn counts(&self, now: DateTime<Utc>) -> GoalCounts {
        aggregate_counts(&self.goals, now)
    }

    /// The persistence adapter the store writes through.
    pub const fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Creates a goal from `draft`, stamped with the current instant.
    ///
    /// # Errors
    /// Validation rejections leave the store unchanged. See [`GoalDraft::into_goal`].
    pub async fn create(&mut self, draft: GoalDraft) -> Result<Goal> {
        self.create_at(draft, Utc::now()).await
    }

    /// Creates a goal from `draft` as of `now` and prepends it to the collection.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_at(&mut self, draft: GoalDraft, now: DateTime<Utc>) -> Result<Goal> {
        let id = self.next_id(now);
        let goal = draft.into_goal(id, now).inspect_err(|e| {
            debug!("Goal draft rejected: {e}");
        })?;

        self.goals.insert(0, goal.clone());
        info!("Created goal {} ({})", goal.id, goal.category);

        self.write_through().await?;
        Ok(goal)
    }

    /// Sets a goal's progress to `new_value`, clamped to its target.
    ///
    /// # Errors
    /// [`Error::InvalidProgressValue`] for non-finite or negative values and
    /// [`Error::GoalNotFound`] for unknown ids. Neither changes any state.
    #[instrument(skip(self))]
    pub async fn update_progress(&mut self, id: i64, new_value: f64) -> Result<Goal> {
        if !new_value.is_finite() || new_value < 0.0 {
            return Err(Error::InvalidProgressValue {
                input: new_value.to_string(),
            });
        }

        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(Error::GoalNotFound { id })?;
        goal.current_value = new_value.min(goal.target_value);
        let updated = goal.clone();
        info!(
            "Goal {} progress set to {} / {}",
            updated.id, updated.current_value, updated.target_value
        );

        self.write_through().await?;
        Ok(updated)
    }

    /// Parses user-entered text and applies it as the goal's progress.
    pub async fn update_progress_input(&mut self, id: i64, input: &str) -> Result<Goal> {
        let value = parse_number(input).ok_or_else(|| Error::InvalidProgressValue {
            input: input.to_string(),
        })?;
        self.update_progress(id, value).await
    }

    /// Removes a goal, returning it if it existed.
    ///
    /// The collection is written through even when nothing was removed.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: i64) -> Result<Option<Goal>> {
        let removed = self
            .goals
            .iter()
            .position(|g| g.id == id)
            .map(|index| self.goals.remove(index));

        match &removed {
            Some(goal) => info!("Deleted goal {} '{}'", goal.id, goal.title),
            None => debug!("No goal {id} to delete"),
        }

        self.write_through().await?;
        Ok(removed)
    }

    /// Creation-time millisecond id, bumped past existing ids so it stays unique.
    ///
    /// When the largest id is `i64::MAX` the first free id at or below the
    /// creation time is used instead.
    fn next_id(&self, now: DateTime<Utc>) -> i64 {
        let candidate = now.timestamp_millis();
        match self.goals.iter().map(|g| g.id).max() {
            Some(max) if max >= candidate => max
                .checked_add(1)
                .unwrap_or_else(|| self.first_unused_id_at_or_below(candidate)),
            _ => candidate,
        }
    }

    fn first_unused_id_at_or_below(&self, start: i64) -> i64 {
        (i64::MIN..=start)
            .rev()
            .find(|id| self.get(*id).is_none())
            .unwrap_or(start)
    }

    async fn write_through(&self) -> Result<()> {
        self.persistence.save(&self.goals).await.inspect_err(|e| {
            warn!("Goal changes kept in memory but not persisted: {e}");
        })
    }
}
