//! Path normalization utilities.

use std::path::{Component, Path, PathBuf};

/// Normalize a path for allowlist comparison.
/// - Expands ~ to home directory
/// - Makes it absolute and folds `.`/`..` lexically
/// - Resolves symlinks in the longest existing prefix
pub fn normalize_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let expanded = PathBuf::from(expand_home(&path.to_string_lossy()));

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(expanded),
            Err(_) => expanded,
        }
    };
    let lexical = lexical_normalize(&absolute);

    // Canonicalize the deepest ancestor that exists, then re-attach the rest.
    let mut existing = lexical.as_path();
    loop {
        if let Ok(canonical) = std::fs::canonicalize(existing) {
            return match lexical.strip_prefix(existing) {
                Ok(rest) if !rest.as_os_str().is_empty() => canonical.join(rest),
                _ => canonical,
            };
        }
        match existing.parent() {
            Some(parent) => existing = parent,
            None => return lexical,
        }
    }
}

/// Fold `.` and `..` components without touching the filesystem.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Never climb above the root.
                if !matches!(
                    result.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    result.pop();
                }
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}

/// Expand ~ to the home directory.
pub fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest).display().to_string();
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home.display().to_string();
        }
    }
    path.to_string()
}

/// Check if `child` is `parent` or lies underneath it.
/// Both paths are compared as given; normalize them first.
pub fn is_path_within(child: &Path, parent: &Path) -> bool {
    child.starts_with(parent)
}

/// Join paths, handling absolute paths correctly.
pub fn join_paths<P: AsRef<Path>>(base: &Path, path: P) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home() {
        let home = dirs::home_dir().unwrap();

        assert_eq!(expand_home("~"), home.display().to_string());
        assert_eq!(
            expand_home("~/Documents"),
            home.join("Documents").display().to_string()
        );
        assert_eq!(expand_home("/absolute/path"), "/absolute/path");
        assert_eq!(expand_home("relative/path"), "relative/path");
    }

    #[test]
    fn test_lexical_normalize() {
        assert_eq!(
            lexical_normalize(Path::new("/srv/projects/./app/../lib")),
            PathBuf::from("/srv/projects/lib")
        );
        assert_eq!(lexical_normalize(Path::new("/../..")), PathBuf::from("/"));
        assert_eq!(
            lexical_normalize(Path::new("/srv/projects/../../etc/passwd")),
            PathBuf::from("/etc/passwd")
        );
    }

    #[test]
    fn test_normalize_nonexistent_path() {
        let normalized = normalize_path("/definitely/not/here/../there");
        assert_eq!(normalized, PathBuf::from("/definitely/not/there"));
    }

    #[test]
    fn test_is_path_within() {
        assert!(is_path_within(Path::new("/srv/a/b"), Path::new("/srv/a")));
        assert!(is_path_within(Path::new("/srv/a"), Path::new("/srv/a")));
        assert!(!is_path_within(Path::new("/srv/ab"), Path::new("/srv/a")));
        assert!(!is_path_within(Path::new("/srv"), Path::new("/srv/a")));
    }

    #[test]
    fn test_join_paths() {
        assert_eq!(
            join_paths(Path::new("/base"), "rel/file"),
            PathBuf::from("/base/rel/file")
        );
        assert_eq!(join_paths(Path::new("/base"), "/abs"), PathBuf::from("/abs"));
    }
}
