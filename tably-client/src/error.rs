//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never produced a response (refused, DNS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Body was not the JSON shape the endpoint promises
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend rejected the payload
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status
    #[error("Backend error ({status}): {body}")]
    Backend { status: u16, body: String },
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
