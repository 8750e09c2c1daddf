//! AutoMaker utilities.
//!
//! Support code shared by the AutoMaker app and its `amk` command line tool:
//! - `spec_xml`: read and rewrite the implemented features of an app spec
//! - `paths`: the `.automaker` project layout and global data directory
//! - `security`: path allowlist gate for file access
//! - `subprocess`: process spawning, including JSON-lines streaming
//! - `cli_probe`: detection and auth status of agent CLIs

pub mod cli;
pub mod cli_probe;
pub mod config;
pub mod error;
pub mod paths;
pub mod security;
pub mod spec_xml;
pub mod subprocess;
pub mod utils;

pub use config::{AutomakerConfig, CliConfig};
pub use error::{AutomakerError, ConfigError, Result};
pub use security::PathGuard;
pub use spec_xml::{FeatureUpdate, ImplementedFeature, SpecXmlEditor};

/// Re-export commonly used items.
pub mod prelude {
    pub use crate::config::AutomakerConfig;
    pub use crate::error::{AutomakerError, Result};
    pub use crate::security::PathGuard;
    pub use crate::spec_xml::{FeatureUpdate, ImplementedFeature, SpecXmlEditor};
}
