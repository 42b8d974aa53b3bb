//! Tracker settings loaded from `goals.toml`.
//!
//! Every field has a default, so the file is optional. A file that exists but
//! cannot be parsed is reported as a configuration error.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{io::ErrorKind, path::Path};
use tracing::{debug, info};

/// Namespace key the goal collection is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "goaltracker-goals";

/// Default file name looked up by [`load_default_config`].
pub const DEFAULT_CONFIG_PATH: &str = "goals.toml";

const DEFAULT_PROGRESS_BAR_WIDTH: usize = 10;

/// Configuration structure representing the whole `goals.toml` file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Key of the storage slot holding the serialized goal collection
    pub storage_key: String,
    /// Number of cells in rendered progress bars
    pub progress_bar_width: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            progress_bar_width: DEFAULT_PROGRESS_BAR_WIDTH,
        }
    }
}

/// Loads tracker configuration from a TOML file
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TrackerConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Parses tracker configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<TrackerConfig> {
    let config: TrackerConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse goals.toml: {e}"),
    })?;

    if config.storage_key.trim().is_empty() {
        return Err(Error::Config {
            message: "storage_key cannot be empty".to_string(),
        });
    }

    Ok(config)
}

/// Loads configuration from `path`, using defaults when the file does not exist.
///
/// # Errors
/// [`Error::Io`] if the file exists but cannot be read, [`Error::Config`] if it is
/// not valid TOML.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<TrackerConfig> {
    let path_ref = path.as_ref();
    match std::fs::read_to_string(path_ref) {
        Ok(contents) => parse_config(&contents),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No {} found, using default settings", path_ref.display());
            Ok(TrackerConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Loads configuration from `./goals.toml`, using defaults when the file is absent.
pub fn load_default_config() -> Result<TrackerConfig> {
    load_config_or_default(DEFAULT_CONFIG_PATH)
}
