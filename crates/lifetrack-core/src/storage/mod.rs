mod config;
mod state;
mod workspace;

pub use config::{ClockConfig, EngineConfig, LayoutConfig, ReportConfig};
pub use state::{InMemoryRepository, JsonFileRepository, StateRepository};
pub use workspace::Workspace;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/lifetrack[-dev]/` based on LIFETRACK_ENV.
///
/// Set LIFETRACK_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("LIFETRACK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("lifetrack-dev")
    } else {
        base_dir.join("lifetrack")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
