//! Allowlist state for the path security gate.

use std::path::{Path, PathBuf};

use crate::config::AutomakerConfig;
use crate::utils::{is_path_within, normalize_path};

/// Normalized allowlist roots.
#[derive(Debug, Clone, Default)]
pub struct AllowlistState {
    /// Root directory all access must stay within. `None` disables the gate.
    pub allowed_root: Option<PathBuf>,

    /// Global data directory, always reachable when the gate is active.
    pub data_dir: Option<PathBuf>,

    /// Additional allowed directories.
    pub extra_paths: Vec<PathBuf>,

    /// Whether the state has been initialized from configuration.
    pub initialized: bool,
}

impl AllowlistState {
    /// Build the allowlist from configuration, normalizing every entry.
    pub fn from_config(config: &AutomakerConfig) -> Self {
        Self {
            allowed_root: config.allowed_root_directory.as_deref().map(normalize_path),
            data_dir: config.data_dir.as_deref().map(normalize_path),
            extra_paths: config
                .extra_allowed_paths
                .iter()
                .map(normalize_path)
                .collect(),
            initialized: true,
        }
    }

    /// Check an already-normalized path against the allowlist.
    pub fn is_allowed(&self, normalized: &Path) -> bool {
        let Some(ref root) = self.allowed_root else {
            return true;
        };

        if is_path_within(normalized, root) {
            return true;
        }

        if let Some(ref data_dir) = self.data_dir {
            if is_path_within(normalized, data_dir) {
                return true;
            }
        }

        self.extra_paths
            .iter()
            .any(|extra| is_path_within(normalized, extra))
    }

    /// All directories that are explicitly allowed.
    pub fn allowed_paths(&self) -> Vec<PathBuf> {
        self.allowed_root
            .iter()
            .chain(self.data_dir.iter())
            .chain(self.extra_paths.iter())
            .cloned()
            .collect()
    }

    /// Reset the state to "no restrictions".
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
