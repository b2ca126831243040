mod config;
pub mod database;

pub use config::{AlarmDefaults, Config, RewardsConfig, SmartWakeConfig};
pub use database::{Database, WakeEventRecord, PROGRESSION_KEY, SLEEP_TRACKER_KEY};

use std::path::PathBuf;

/// Returns `~/.config/risewake[-dev]/` based on RISEWAKE_ENV.
///
/// Set RISEWAKE_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("RISEWAKE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("risewake-dev")
    } else {
        base_dir.join("risewake")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
