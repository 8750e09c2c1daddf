//! Path allowlist security gate.
//!
//! When an allowed root directory is configured, every file path the
//! utilities read or write must resolve inside that root, the data
//! directory, or one of the extra allowed paths. Without a root the gate is
//! open. Paths are normalized (home expansion, `..` folding, symlink
//! resolution of the existing prefix) before comparison, so `root/../etc`
//! is rejected.

pub mod fs;
pub mod state;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::config::AutomakerConfig;
use crate::error::{AutomakerError, Result};
use crate::utils::normalize_path;

pub use state::AllowlistState;

/// Process-wide gate used by the free functions in this module.
static GLOBAL_GUARD: Lazy<PathGuard> = Lazy::new(PathGuard::new);

/// Path allowlist gate.
#[derive(Clone)]
pub struct PathGuard {
    state: Arc<RwLock<AllowlistState>>,
}

impl Default for PathGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl PathGuard {
    /// Create an open gate (no restrictions).
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(AllowlistState::default())),
        }
    }

    /// Create a gate initialized from configuration.
    pub fn from_config(config: &AutomakerConfig) -> Self {
        let guard = Self::new();
        guard.initialize(config);
        guard
    }

    /// Replace the allowlist with the one described by `config`.
    pub fn initialize(&self, config: &AutomakerConfig) {
        let new_state = AllowlistState::from_config(config);

        match new_state.allowed_root {
            Some(ref root) => tracing::info!(
                "Path access restricted to {} ({} extra allowed paths)",
                root.display(),
                new_state.extra_paths.len()
            ),
            None => tracing::debug!("No allowed root directory configured, path access unrestricted"),
        }

        *self.state.write() = new_state;
    }

    /// Check if a path is allowed.
    pub fn is_path_allowed(&self, path: impl AsRef<Path>) -> bool {
        let normalized = normalize_path(path);
        self.state.read().is_allowed(&normalized)
    }

    /// Validate a path, returning its normalized form.
    pub fn validate_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        let normalized = normalize_path(path);

        if self.state.read().is_allowed(&normalized) {
            Ok(normalized)
        } else {
            tracing::warn!("Blocked access to {}", normalized.display());
            Err(AutomakerError::PathNotAllowed {
                path: path.to_path_buf(),
            })
        }
    }

    /// The configured root directory, if any.
    pub fn allowed_root_directory(&self) -> Option<PathBuf> {
        self.state.read().allowed_root.clone()
    }

    /// The configured data directory, if any.
    pub fn data_directory(&self) -> Option<PathBuf> {
        self.state.read().data_dir.clone()
    }

    /// All explicitly allowed directories.
    pub fn allowed_paths(&self) -> Vec<PathBuf> {
        self.state.read().allowed_paths()
    }

    /// Whether `initialize` has been called since the last reset.
    pub fn is_initialized(&self) -> bool {
        self.state.read().initialized
    }

    /// Drop all restrictions.
    pub fn reset(&self) {
        self.state.write().reset();
    }
}

/// The process-wide gate.
pub fn global_guard() -> &'static PathGuard {
    &GLOBAL_GUARD
}

/// Initialize the process-wide allowlist.
pub fn init_allowed_paths(config: &AutomakerConfig) {
    GLOBAL_GUARD.initialize(config);
}

/// Check a path against the process-wide allowlist.
pub fn is_path_allowed(path: impl AsRef<Path>) -> bool {
    GLOBAL_GUARD.is_path_allowed(path)
}

/// Validate a path against the process-wide allowlist.
pub fn validate_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    GLOBAL_GUARD.validate_path(path)
}

/// Root directory of the process-wide allowlist.
pub fn allowed_root_directory() -> Option<PathBuf> {
    GLOBAL_GUARD.allowed_root_directory()
}

/// Data directory of the process-wide allowlist.
pub fn data_directory() -> Option<PathBuf> {
    GLOBAL_GUARD.data_directory()
}

/// All directories of the process-wide allowlist.
pub fn allowed_paths() -> Vec<PathBuf> {
    GLOBAL_GUARD.allowed_paths()
}
