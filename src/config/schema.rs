//! Configuration schema types for settings.json.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AutomakerError, ConfigError};

/// Per-provider CLI overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    /// Explicit command paths keyed by provider id ("claude", "codex", "cursor").
    #[serde(default)]
    pub commands: HashMap<String, String>,

    /// Timeout for `--version` probes in milliseconds.
    #[serde(default)]
    pub probe_timeout_ms: Option<u64>,
}

impl CliConfig {
    /// Get the command override for a provider, if any.
    pub fn command_for(&self, provider_id: &str) -> Option<&str> {
        self.commands.get(provider_id).map(String::as_str)
    }
}

/// Main AutoMaker utilities configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AutomakerConfig {
    /// Root directory that all project file access must stay within.
    /// When unset, every path is allowed.
    #[serde(default)]
    pub allowed_root_directory: Option<String>,

    /// Global data directory (settings, credentials).
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Additional directories allowed alongside the root.
    #[serde(default)]
    pub extra_allowed_paths: Vec<String>,

    /// Agent CLI detection settings.
    #[serde(default)]
    pub cli: CliConfig,

    /// Timeout for spawned subprocesses in milliseconds. CLI probes use it
    /// unless `cli.probeTimeoutMs` is set.
    #[serde(default)]
    pub subprocess_timeout_ms: Option<u64>,
}

impl AutomakerConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), AutomakerError> {
        if let Some(ref root) = self.allowed_root_directory {
            validate_absolute_path(root)?;
        }

        if let Some(ref data_dir) = self.data_dir {
            validate_absolute_path(data_dir)?;
        }

        for path in &self.extra_allowed_paths {
            validate_absolute_path(path)?;
        }

        if self.subprocess_timeout_ms == Some(0) || self.cli.probe_timeout_ms == Some(0) {
            return Err(ConfigError::ValidationError(
                "timeouts must be greater than zero".to_string(),
            )
            .into());
        }

        Ok(())
    }

    /// Configured subprocess timeout, if any.
    pub fn subprocess_timeout(&self) -> Option<Duration> {
        self.subprocess_timeout_ms.map(Duration::from_millis)
    }

    /// Timeout for CLI probes: `cli.probeTimeoutMs`, else `subprocessTimeoutMs`.
    pub fn probe_timeout(&self) -> Option<Duration> {
        self.cli
            .probe_timeout_ms
            .map(Duration::from_millis)
            .or_else(|| self.subprocess_timeout())
    }
}

/// Validate that a configured path is absolute (after `~` expansion).
fn validate_absolute_path(path: &str) -> Result<(), AutomakerError> {
    if path.trim().is_empty() {
        return Err(ConfigError::InvalidPath {
            path: path.to_string(),
            reason: "path cannot be empty".to_string(),
        }
        .into());
    }

    let expanded = crate::utils::expand_home(path);
    if !Path::new(&expanded).is_absolute() {
        return Err(ConfigError::InvalidPath {
            path: path.to_string(),
            reason: "path must be absolute".to_string(),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_paths() {
        assert!(validate_absolute_path("/srv/projects").is_ok());
        assert!(validate_absolute_path("~/projects").is_ok());

        assert!(validate_absolute_path("").is_err());
        assert!(validate_absolute_path("   ").is_err());
        assert!(validate_absolute_path("relative/dir").is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = AutomakerConfig {
            subprocess_timeout_ms: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_probe_timeout_falls_back_to_subprocess_timeout() {
        let mut config = AutomakerConfig::default();
        assert_eq!(config.probe_timeout(), None);
        assert!(config.validate().is_ok());

        config.subprocess_timeout_ms = Some(60_000);
        assert_eq!(config.probe_timeout(), Some(Duration::from_secs(60)));

        config.cli.probe_timeout_ms = Some(1_500);
        assert_eq!(config.probe_timeout(), Some(Duration::from_millis(1_500)));
    }

    #[test]
    fn test_cli_command_override() {
        let mut cli = CliConfig::default();
        cli.commands
            .insert("claude".to_string(), "/opt/claude/bin/claude".to_string());
        assert_eq!(cli.command_for("claude"), Some("/opt/claude/bin/claude"));
        assert_eq!(cli.command_for("codex"), None);
    }
}
