//! Error types for the client layer.

use apistate_types::FailurePayload;
use serde_json::Value;
use thiserror::Error;

/// Result type for building actions.
pub type ActionResult<T> = Result<T, ActionError>;

/// Errors raised while building a create action.
///
/// All of these are returned before anything is dispatched.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The config argument is missing or not an object.
    #[error("Config isn't an object.")]
    Config,

    /// The schema argument is empty.
    #[error("Empty schema string.")]
    Schema,

    /// The resolved item is not a valid resource.
    #[error("Item is not valid in method argument")]
    Item,

    /// Serializing the request body failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for transport calls.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors surfaced by a transport. Each one settles the operation in the
/// error phase.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        message: String,
        response: Option<Value>,
    },

    /// The server answered 2xx with a body that is not JSON.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The HTTP client could not be constructed.
    #[error("client error: {0}")]
    Client(String),
}

impl TransportError {
    /// Converts the error into the error-phase payload.
    pub fn to_failure(&self) -> FailurePayload {
        match self {
            Self::Http {
                status, response, ..
            } => FailurePayload {
                message: self.to_string(),
                status: Some(*status),
                response: response.clone(),
            },
            other => FailurePayload::new(other.to_string()),
        }
    }
}
