use chrono::Utc;
use goal_tracker::{
    GoalStore,
    config::{self, database},
    core::{SeaOrmPersistence, report},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenvy::dotenv().ok();

    // 3. Load tracker settings
    let tracker_config = config::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Connect and make sure the storage table exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 5. Load the goal collection, starting empty if stored data is unreadable
    let persistence = SeaOrmPersistence::new(db, tracker_config.storage_key.clone());
    let store = GoalStore::load_or_empty(persistence).await;

    // 6. Summarize the session state
    let now = Utc::now();
    info!("{}", report::format_counts(&store.counts(now)));
    for goal in store.goals() {
        info!(
            "{}",
            report::format_goal_line(goal, now, tracker_config.progress_bar_width)
        );
    }

    Ok(())
}
