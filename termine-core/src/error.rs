//! Error types for rezept-termine.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Error, Debug)]
pub enum TermineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown time zone '{0}'")]
    InvalidTimeZone(String),

    #[error("Local time {datetime} does not exist in time zone {tz}")]
    NonexistentLocalTime {
        datetime: chrono::NaiveDateTime,
        tz: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for core operations.
pub type TermineResult<T> = Result<T, TermineError>;
