//! Utility modules.

pub mod debug;
pub mod path;
pub mod platform;
pub mod shell;

pub use debug::{init_debug_logging, is_debug_enabled, AUTOMAKER_DEBUG_ENV};
pub use path::{expand_home, is_path_within, join_paths, lexical_normalize, normalize_path};
pub use platform::{current_platform, Platform};
pub use shell::{command_line, quote, split_command};
