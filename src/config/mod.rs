/// Database configuration and connection management
pub mod database;

/// Tracker settings loaded from goals.toml
pub mod tracker;

pub use tracker::{TrackerConfig, load_config, load_config_or_default, load_default_config};
