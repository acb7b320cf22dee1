mod config;
mod session_store;

pub use config::{AnalyticsConfig, ApiConfig, CacheConfig, Config, UiConfig};
pub use session_store::{SessionStore, StoredSession};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/growth-garden[-dev]/` based on GROWTH_GARDEN_ENV.
///
/// Set GROWTH_GARDEN_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("GROWTH_GARDEN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("growth-garden-dev")
    } else {
        base_dir.join("growth-garden")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
