//! Configuration error types (thiserror-based).

use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is outside its allowed range.
    #[error("Invalid configuration: {reason}")]
    Invalid { reason: String },

    /// The configuration file does not exist.
    #[error("Configuration file not found: {path}")]
    NotFound { path: String },
}

/// Convenience Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
