//! Shared test utilities for the goal tracker.
//!
//! Helpers for setting up test databases and building goals with sensible defaults.

use crate::{
    core::{
        goal::{Category, Goal},
        persistence::{MemoryPersistence, SeaOrmPersistence},
        store::GoalStore,
    },
    errors::Result,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Storage key used throughout the tests.
pub const TEST_KEY: &str = "goaltracker-goals";

/// Installs a test-writer subscriber; safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an empty store over a fresh in-memory database.
pub async fn setup_db_store() -> Result<GoalStore<SeaOrmPersistence>> {
    let db = setup_test_db().await?;
    GoalStore::load(SeaOrmPersistence::new(db, TEST_KEY)).await
}

/// Creates an empty store over in-process storage, returning a handle to that storage.
pub async fn setup_memory_store() -> Result<(GoalStore<MemoryPersistence>, MemoryPersistence)> {
    let persistence = MemoryPersistence::new();
    let store = GoalStore::load(persistence.clone()).await?;
    Ok((store, persistence))
}

/// Fixed creation instant used by [`sample_goal`].
///
/// # Panics
/// Never; the date is a valid constant.
#[allow(clippy::unwrap_used)]
pub fn sample_created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
}

/// Builds a personal goal directly, bypassing draft validation.
///
/// # Defaults
/// * `title`: `"Goal {id}"`
/// * `category`: personal
/// * `start_date`: 2024-01-01
pub fn sample_goal(id: i64, current_value: f64, target_value: f64, end_date: Option<NaiveDate>) -> Goal {
    let created_at = sample_created_at();
    Goal {
        id,
        title: format!("Goal {id}"),
        description: None,
        category: Category::Personal,
        target_value,
        current_value,
        unit: None,
        start_date: created_at.date_naive(),
        end_date,
        color: Category::Personal.color().to_string(),
        created_at,
        milestones: Vec::new(),
    }
}
