//! Configuration module.

pub mod loader;
pub mod schema;

pub use loader::{
    apply_env_overrides, default_settings_path, load_config, load_default_config, parse_config,
    resolve_config, ALLOWED_ROOT_DIRECTORY_ENV, DATA_DIR_ENV,
};
pub use schema::{AutomakerConfig, CliConfig};
