//! Error types for the calendar engine.

use thiserror::Error;

/// Errors that can occur while configuring or loading a calendar feed.
///
/// Queries, filters and parsing never produce these: they degrade to fewer
/// results instead.
#[derive(Error, Debug)]
pub enum CalendarioError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Could not decode feed as {0}")]
    Decode(String),

    #[error("Unknown text encoding '{0}'")]
    UnknownEncoding(String),

    #[error("Invalid source '{0}'")]
    InvalidSource(String),

    #[error("Invalid date '{0}'. Expected DD/MM/YYYY or YYYY-MM-DD")]
    InvalidDate(String),
}

impl From<reqwest::Error> for CalendarioError {
    fn from(e: reqwest::Error) -> Self {
        CalendarioError::Fetch(e.to_string())
    }
}

/// Result type alias for calendar operations.
pub type CalendarioResult<T> = Result<T, CalendarioError>;
