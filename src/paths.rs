//! AutoMaker directory layout.
//!
//! Per-project state lives under `{project}/.automaker`; global state
//! (settings, credentials) lives in the data directory. None of the getters
//! touch the filesystem; use the `ensure_*` functions to create directories.

use std::path::{Path, PathBuf};

/// Name of the per-project state directory.
pub const AUTOMAKER_DIR_NAME: &str = ".automaker";

/// File name of the app spec document inside the project state directory.
pub const APP_SPEC_FILE: &str = "app_spec.txt";

/// Directory name appended to the platform data directory.
const DATA_DIR_NAME: &str = "automaker";

/// `{project}/.automaker`
pub fn automaker_dir(project_path: &Path) -> PathBuf {
    project_path.join(AUTOMAKER_DIR_NAME)
}

/// `{project}/.automaker/features`
pub fn features_dir(project_path: &Path) -> PathBuf {
    automaker_dir(project_path).join("features")
}

/// `{project}/.automaker/features/{feature_id}`
pub fn feature_dir(project_path: &Path, feature_id: &str) -> PathBuf {
    features_dir(project_path).join(feature_id)
}

/// `{project}/.automaker/features/{feature_id}/images`
pub fn feature_images_dir(project_path: &Path, feature_id: &str) -> PathBuf {
    feature_dir(project_path, feature_id).join("images")
}

/// `{project}/.automaker/board`
pub fn board_dir(project_path: &Path) -> PathBuf {
    automaker_dir(project_path).join("board")
}

/// `{project}/.automaker/images`
pub fn images_dir(project_path: &Path) -> PathBuf {
    automaker_dir(project_path).join("images")
}

/// `{project}/.automaker/context`
pub fn context_dir(project_path: &Path) -> PathBuf {
    automaker_dir(project_path).join("context")
}

/// `{project}/.automaker/worktrees`
pub fn worktrees_dir(project_path: &Path) -> PathBuf {
    automaker_dir(project_path).join("worktrees")
}

/// `{project}/.automaker/app_spec.txt`
pub fn app_spec_path(project_path: &Path) -> PathBuf {
    automaker_dir(project_path).join(APP_SPEC_FILE)
}

/// `{project}/.automaker/active-branches.json`
pub fn branch_tracking_path(project_path: &Path) -> PathBuf {
    automaker_dir(project_path).join("active-branches.json")
}

/// `{project}/.automaker/settings.json`
pub fn project_settings_path(project_path: &Path) -> PathBuf {
    automaker_dir(project_path).join("settings.json")
}

/// Create `{project}/.automaker` if needed and return it.
pub fn ensure_automaker_dir(project_path: &Path) -> std::io::Result<PathBuf> {
    let dir = automaker_dir(project_path);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Platform default for the global data directory.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(DATA_DIR_NAME))
}

/// `{data_dir}/settings.json`
pub fn global_settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.json")
}

/// `{data_dir}/credentials.json`
pub fn credentials_path(data_dir: &Path) -> PathBuf {
    data_dir.join("credentials.json")
}

/// Create the data directory if needed and return it.
pub fn ensure_data_dir(data_dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(data_dir)?;
    Ok(data_dir.to_path_buf())
}
