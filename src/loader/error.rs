//! Loader error types
//!
//! Covers the three ways a patient fetch can fail: the request never
//! completes, the service answers with a non-success status, or the body
//! is not the expected JSON shape.

use thiserror::Error;

/// Errors that can occur while loading patient records
#[derive(Error, Debug)]
pub enum LoadError {
    /// Connection could not be established
    #[error("Patient service unavailable: {0}")]
    Unavailable(String),

    /// Request did not complete within the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Any other transport-level failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("Network response was not ok (HTTP {status}): {message}")]
    Http { status: u16, message: String },

    /// Body is not valid JSON or not a list of patient records
    #[error("Malformed patient payload: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LoadError {
    /// Classify a reqwest failure the way the rest of the crate reports it
    pub fn from_request(err: reqwest::Error, url: &str) -> Self {
        if err.is_timeout() {
            LoadError::Timeout
        } else if err.is_connect() {
            LoadError::Unavailable(url.to_string())
        } else {
            LoadError::Transport(err)
        }
    }

    /// Short machine-readable kind, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Unavailable(_) | LoadError::Timeout | LoadError::Transport(_) => {
                "transport"
            }
            LoadError::Http { .. } => "http",
            LoadError::Parse(_) => "parse",
        }
    }

    /// HTTP status for `Http` failures
    pub fn status(&self) -> Option<u16> {
        match self {
            LoadError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for loader operations
pub type LoadResult<T> = Result<T, LoadError>;
