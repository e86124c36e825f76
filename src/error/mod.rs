//! Error handling module for Trackcut

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for Trackcut operations
#[derive(Error, Debug)]
pub enum TrackcutError {
    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// Invalid time format
    #[error("Invalid time format: {time}. Expected HH:MM:SS.ms, MM:SS.ms, or seconds")]
    InvalidTimeFormat { time: String },

    /// Edit script could not be understood
    #[error("Invalid edit script: {message}")]
    ScriptError { message: String },

    /// Configuration could not be loaded or validated
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Export failed; shown to the user as-is
    #[error("Export failed: {message}")]
    ExportError { message: String },

    /// Domain layer error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML error
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias for Trackcut operations
pub type TrackcutResult<T> = std::result::Result<T, TrackcutError>;
