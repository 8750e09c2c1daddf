//! Error types for the AutoMaker utilities.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the AutoMaker utilities.
#[derive(Error, Debug)]
pub enum AutomakerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Path not allowed: {}", .path.display())]
    PathNotAllowed { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Process '{command}' timed out after {timeout_ms}ms")]
    Timeout { command: String, timeout_ms: u64 },

    #[error("Process failed: {0}")]
    ProcessFailed(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, AutomakerError>;
