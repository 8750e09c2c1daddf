//! Agent CLI detection.
//!
//! Finds the Claude, Codex and Cursor CLIs, asks them for their version and
//! checks whether they are authenticated. A missing CLI is a normal result,
//! not an error.

pub mod auth;
pub mod provider;

use std::path::{Path, PathBuf};
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::config::AutomakerConfig;
use crate::subprocess::{spawn_process, SubprocessOptions};
use crate::utils::{current_platform, split_command, Platform};

pub use auth::{check_auth, check_auth_from_env, AuthMethod, AuthStatus};
pub use provider::CliProvider;

/// Default timeout for `which` and `--version` probes.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

static VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+\.\d+\.\d+(?:[-+][0-9A-Za-z.\-]+)?)").unwrap());

/// How a CLI was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DetectionMethod {
    /// Command override from settings.
    Config,
    /// Found on `PATH`.
    Path,
    /// Found in a well-known install location.
    KnownLocation,
}

/// A located CLI: program plus any leading arguments from an override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliLocation {
    pub program: String,
    pub args: Vec<String>,
    pub method: DetectionMethod,
}

/// Detection result for one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliStatus {
    pub provider: CliProvider,
    pub installed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<DetectionMethod>,
    pub auth: AuthStatus,
}

/// Extract the first `major.minor.patch` (with optional suffix) from CLI output.
pub fn parse_version(output: &str) -> Option<String> {
    VERSION
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Look a command up on `PATH` with `which`/`where`.
async fn lookup_on_path(command: &str, timeout: Duration) -> Option<PathBuf> {
    let platform = current_platform().unwrap_or(Platform::Linux);
    let opts = SubprocessOptions::new(platform.lookup_command())
        .args([command])
        .timeout(timeout);

    match spawn_process(&opts).await {
        Ok(output) if output.success() => output
            .stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(PathBuf::from),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("PATH lookup for {} failed: {}", command, e);
            None
        }
    }
}

fn first_existing(candidates: &[PathBuf]) -> Option<&PathBuf> {
    candidates.iter().find(|p| p.is_file())
}

/// Locate a provider's CLI: settings override, then `PATH`, then known locations.
pub async fn find_cli(
    provider: CliProvider,
    command_override: Option<&str>,
    home: Option<&Path>,
    timeout: Duration,
) -> Option<CliLocation> {
    if let Some((program, args)) = command_override.and_then(split_command) {
        let resolved = if Path::new(&program).is_absolute() {
            Path::new(&program).is_file().then(|| program.clone())
        } else {
            lookup_on_path(&program, timeout)
                .await
                .map(|p| p.display().to_string())
        };

        match resolved {
            Some(program) => {
                return Some(CliLocation {
                    program,
                    args,
                    method: DetectionMethod::Config,
                })
            }
            None => tracing::warn!(
                "Configured {} command '{}' not found, falling back to auto-detection",
                provider,
                program
            ),
        }
    }

    if let Some(path) = lookup_on_path(provider.command(), timeout).await {
        return Some(CliLocation {
            program: path.display().to_string(),
            args: Vec::new(),
            method: DetectionMethod::Path,
        });
    }

    first_existing(&provider.known_locations(home)).map(|path| CliLocation {
        program: path.display().to_string(),
        args: Vec::new(),
        method: DetectionMethod::KnownLocation,
    })
}

/// Run `<cli> --version` and parse the result.
async fn probe_version(location: &CliLocation, timeout: Duration) -> Option<String> {
    let opts = SubprocessOptions::new(&location.program)
        .args(location.args.iter().cloned())
        .args(["--version"])
        .timeout(timeout);

    match spawn_process(&opts).await {
        Ok(output) if output.success() => {
            parse_version(&output.stdout).or_else(|| parse_version(&output.stderr))
        }
        Ok(output) => {
            tracing::debug!(
                "{} --version exited with {:?}",
                location.program,
                output.exit_code
            );
            None
        }
        Err(e) => {
            tracing::debug!("{} --version failed: {}", location.program, e);
            None
        }
    }
}

/// Detect one provider's CLI.
///
/// Probes use `config.probe_timeout()`, falling back to `DEFAULT_PROBE_TIMEOUT`.
pub async fn detect_cli(provider: CliProvider, config: &AutomakerConfig) -> CliStatus {
    let timeout = config.probe_timeout().unwrap_or(DEFAULT_PROBE_TIMEOUT);
    let home = dirs::home_dir();

    let location = find_cli(
        provider,
        config.cli.command_for(provider.id()),
        home.as_deref(),
        timeout,
    )
    .await;
    let auth = check_auth_from_env(provider);

    let Some(location) = location else {
        crate::debug_log!("{} CLI not found", provider);
        return CliStatus {
            provider,
            installed: false,
            path: None,
            version: None,
            method: None,
            auth,
        };
    };

    let version = probe_version(&location, timeout).await;
    tracing::debug!(
        "{} CLI at {} (version {:?}, via {:?})",
        provider,
        location.program,
        version,
        location.method
    );

    CliStatus {
        provider,
        installed: true,
        path: Some(location.program),
        version,
        method: Some(location.method),
        auth,
    }
}

/// Detect every provider concurrently.
pub async fn detect_all(config: &AutomakerConfig) -> Vec<CliStatus> {
    futures::future::join_all(CliProvider::ALL.iter().map(|p| detect_cli(*p, config))).await
}
