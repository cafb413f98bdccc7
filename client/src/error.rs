//! Client Error Types

use ciam_common::InvalidArgument;
use reqwest::StatusCode;
use thiserror::Error;

/// Failure below the HTTP status level: the request never got an answer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, TLS or body transfer failure from `reqwest`.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure raised by a custom [`Transport`](crate::Transport) implementation.
    #[error("Transport failed: {0}")]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

/// Client error types.
#[derive(Debug, Error)]
pub enum ClientError {
    /// An argument failed local validation. No request was sent.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    /// The service rejected the bearer token.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token is valid but lacks the listed flags.
    #[error("Missing permissions: [{}]", .missing.join(", "))]
    PermissionDenied { missing: Vec<String> },

    /// The request did not complete.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service answered with a status the client does not map.
    #[error("Unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// A success response carried a body of the wrong shape.
    #[error("Invalid response from server: {0}")]
    Decode(#[source] serde_json::Error),

    /// A request body could not be serialized.
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ClientError {
    /// Name of the rejected field for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidArgument(err) => Some(&err.field),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
