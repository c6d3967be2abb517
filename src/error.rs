//! Error types for the Clio changelog generator
//!
//! This module provides structured error definitions using thiserror,
//! with anyhow accepted at the edges for propagation.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Clio operations
#[derive(Error, Debug)]
pub enum ClioError {
    /// git exited unsuccessfully
    #[error("Git error: {0}")]
    Git(String),

    /// No `.git` directory found walking up from the given path
    #[error("Not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    /// A raw `git log` record did not have the expected fields
    #[error("Malformed log record: {0}")]
    MalformedLogRecord(String),

    /// Commit timestamp could not be parsed
    #[error("Invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Version string is not `major.minor.patch`
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    /// Configuration failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file is not valid TOML
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be encoded
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Output format not recognized
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Clio operations
pub type Result<T> = std::result::Result<T, ClioError>;

/// Convert anyhow::Error to ClioError
impl From<anyhow::Error> for ClioError {
    fn from(err: anyhow::Error) -> Self {
        ClioError::Other(err.to_string())
    }
}
