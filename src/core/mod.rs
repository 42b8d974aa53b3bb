//! Core goal logic - framework-agnostic model, derivation, storage and reporting.

/// Derived percentages, statuses and collection counts
pub mod derive;
/// Goal records, categories and creation drafts
pub mod goal;
/// Persistence adapter trait and its implementations
pub mod persistence;
/// Text summaries for list and detail views
pub mod report;
/// The authoritative goal collection
pub mod store;

pub use derive::{GoalCounts, GoalStatus, aggregate_counts, goal_status, progress_percent};
pub use goal::{Category, Goal, GoalDraft};
pub use persistence::{GoalPersistence, MemoryPersistence, SeaOrmPersistence};
pub use store::GoalStore;
