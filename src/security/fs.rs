//! Filesystem access routed through the path gate.

use std::path::Path;

use crate::error::Result;
use crate::security::{global_guard, PathGuard};

impl PathGuard {
    /// Read a file after validating its path.
    pub fn read_to_string(&self, path: impl AsRef<Path>) -> Result<String> {
        let validated = self.validate_path(path)?;
        Ok(std::fs::read_to_string(validated)?)
    }

    /// Write a file after validating its path. Parent directories are created.
    pub fn write(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
        let validated = self.validate_path(path)?;
        if let Some(parent) = validated.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&validated, contents)?;
        tracing::debug!("Wrote {}", validated.display());
        Ok(())
    }

    /// Create a directory tree after validating its path.
    pub fn create_dir_all(&self, path: impl AsRef<Path>) -> Result<()> {
        let validated = self.validate_path(path)?;
        std::fs::create_dir_all(validated)?;
        Ok(())
    }

    /// Check existence of an allowed path. Disallowed paths report `false`.
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.validate_path(path)
            .map(|p| p.exists())
            .unwrap_or(false)
    }
}

/// Read a file through the process-wide gate.
pub fn secure_read_to_string(path: impl AsRef<Path>) -> Result<String> {
    global_guard().read_to_string(path)
}

/// Write a file through the process-wide gate.
pub fn secure_write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    global_guard().write(path, contents)
}

/// Create a directory tree through the process-wide gate.
pub fn secure_create_dir_all(path: impl AsRef<Path>) -> Result<()> {
    global_guard().create_dir_all(path)
}

#[cfg(test)]
mod tests {
    use crate::config::AutomakerConfig;
    use crate::error::AutomakerError;
    use crate::security::PathGuard;

    #[test]
    fn test_read_write_inside_root() {
        let root = tempfile::tempdir().unwrap();
        let guard = PathGuard::from_config(&AutomakerConfig {
            allowed_root_directory: Some(root.path().display().to_string()),
            ..Default::default()
        });

        let file = root.path().join(".automaker/app_spec.txt");
        guard.write(&file, "<project_specification/>").unwrap();
        assert!(guard.exists(&file));
        assert_eq!(guard.read_to_string(&file).unwrap(), "<project_specification/>");
    }

    #[test]
    fn test_write_outside_root_rejected() {
        let root = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let guard = PathGuard::from_config(&AutomakerConfig {
            allowed_root_directory: Some(root.path().display().to_string()),
            ..Default::default()
        });

        let target = other.path().join("stolen.txt");
        let err = guard.write(&target, "x").unwrap_err();
        assert!(matches!(err, AutomakerError::PathNotAllowed { .. }));
        assert!(!target.exists());
        assert!(!guard.exists(&target));
    }
}
