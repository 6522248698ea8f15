//! Client Error Types
//!
//! Errors raised between the page and the dashboard backend. None of these
//! reach the user directly: callers turn them into fallback markup or a fixed
//! chat bubble.

use thiserror::Error;

/// Failure to complete an HTTP exchange at all
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection refused, DNS failure, reset, etc.
    #[error("Network error: {0}")]
    Network(String),

    /// The request could not be built (bad URL, unserializable body)
    #[error("Request build error: {0}")]
    Build(String),

    /// Configured timeout elapsed
    #[error("Request timed out")]
    Timeout,
}

/// Errors from the typed dashboard API layer
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Backend answered with a non-2xx status
    #[error("Backend returned {status}")]
    Status { status: u16, body: String },

    /// Body was not the JSON shape we expected
    #[error("Parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status, when the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for API operations
pub type ClientResult<T> = Result<T, ClientError>;
