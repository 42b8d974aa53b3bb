//! Database configuration module for the goal tracker.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL.

use crate::entities::StorageSlot;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, instrument};

/// Default database location when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/goals.sqlite?mode=rwc";

/// Gets the database URL from the environment or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to [`DEFAULT_DATABASE_URL`] if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    connect(&get_database_url()).await
}

/// Connects to an explicit database URL.
#[instrument]
pub async fn connect(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the storage slot table if it does not exist yet.
///
/// Safe to call on every startup.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut storage_slot_table = schema.create_table_from_entity(StorageSlot);
    storage_slot_table.if_not_exists();

    db.execute(builder.build(&storage_slot_table)).await?;
    debug!("Storage tables ensured");

    Ok(())
}
