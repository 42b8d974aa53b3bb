//! Unified error types for the goal tracker.
//!
//! Validation rejections (`MissingTitle`, `InvalidTargetValue`, ...) leave the store
//! untouched. Persistence variants describe the storage slot failing underneath it.

use thiserror::Error;

/// Every failure the tracker can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Goal title was empty or whitespace only
    #[error("Goal title cannot be empty")]
    MissingTitle,

    /// Target value was missing, non-numeric, or not strictly positive
    #[error("Invalid target value: '{input}' (must be a number greater than zero)")]
    InvalidTargetValue {
        /// The rejected input as entered
        input: String,
    },

    /// Starting value was non-numeric or negative
    #[error("Invalid current value: '{input}' (must be a number of at least zero)")]
    InvalidCurrentValue {
        /// The rejected input as entered
        input: String,
    },

    /// Progress update value was non-numeric, infinite, or negative
    #[error("Invalid progress value: '{input}'")]
    InvalidProgressValue {
        /// The rejected input as entered
        input: String,
    },

    /// A start or end date was not in `YYYY-MM-DD` form
    #[error("Invalid date: '{input}' (expected YYYY-MM-DD)")]
    InvalidDate {
        /// The rejected input as entered
        input: String,
    },

    /// Category name did not match any known category
    #[error("Unknown category: '{name}'")]
    UnknownCategory {
        /// The rejected category name
        name: String,
    },

    /// No goal with the given id exists in the collection
    #[error("Goal not found: {id}")]
    GoalNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// The storage slot rejected a write; in-memory state is still authoritative
    #[error("Failed to persist goals: {reason}")]
    PersistenceWriteFailed {
        /// Description of the underlying failure
        reason: String,
    },

    /// The goal collection could not be serialized; nothing was written
    #[error("Failed to serialize goals: {0}")]
    PersistenceEncode(serde_json::Error),

    /// The persisted blob could not be decoded into goal records
    #[error("Failed to parse persisted goals: {0}")]
    PersistenceParse(#[from] serde_json::Error),

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Configuration file exists but could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
