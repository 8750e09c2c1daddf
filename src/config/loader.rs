//! Configuration loader for `{data_dir}/settings.json`.

use std::path::{Path, PathBuf};

use crate::config::schema::AutomakerConfig;
use crate::error::{AutomakerError, ConfigError};

/// Environment variable restricting file access to one root directory.
pub const ALLOWED_ROOT_DIRECTORY_ENV: &str = "ALLOWED_ROOT_DIRECTORY";

/// Environment variable overriding the global data directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Get the default settings file path.
pub fn default_settings_path() -> Option<PathBuf> {
    let data_dir = std::env::var(DATA_DIR_ENV)
        .ok()
        .map(PathBuf::from)
        .or_else(crate::paths::default_data_dir)?;
    Some(crate::paths::global_settings_path(&data_dir))
}

/// Load configuration from a file path.
pub fn load_config(path: &Path) -> Result<AutomakerConfig, AutomakerError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()).into());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("Failed to read config file: {}", e))
    })?;

    let mut config = parse_config(&content)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config.validate()?;

    Ok(config)
}

/// Load configuration from the default path, or return default config if not found.
/// Environment overrides are applied either way.
pub fn load_default_config() -> Result<AutomakerConfig, AutomakerError> {
    match default_settings_path() {
        Some(path) if path.exists() => load_config(&path),
        _ => {
            let mut config = AutomakerConfig::default();
            apply_env_overrides(&mut config, |key| std::env::var(key).ok());
            config.validate()?;
            Ok(config)
        }
    }
}

/// Load configuration for the command line.
///
/// An explicit settings path must exist; only an absent one falls back to the
/// default location.
pub fn resolve_config(settings: Option<&Path>) -> Result<AutomakerConfig, AutomakerError> {
    match settings {
        Some(path) => load_config(path),
        None => load_default_config(),
    }
}

/// Parse configuration from a JSON string.
pub fn parse_config(json: &str) -> Result<AutomakerConfig, AutomakerError> {
    let config: AutomakerConfig = serde_json::from_str(json).map_err(|e| {
        ConfigError::ParseError(format!("Failed to parse config JSON: {}", e))
    })?;

    config.validate()?;

    Ok(config)
}

/// Apply `ALLOWED_ROOT_DIRECTORY` and `DATA_DIR` on top of file values.
/// Empty variables are ignored.
pub fn apply_env_overrides<F>(config: &mut AutomakerConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(root) = non_empty(ALLOWED_ROOT_DIRECTORY_ENV) {
        tracing::debug!("Allowed root directory from environment: {}", root);
        config.allowed_root_directory = Some(root);
    }

    if let Some(data_dir) = non_empty(DATA_DIR_ENV) {
        tracing::debug!("Data directory from environment: {}", data_dir);
        config.data_dir = Some(data_dir);
    }
}
