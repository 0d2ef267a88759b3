//! Client-side error types.

use thiserror::Error;

/// Everything a cache or controller operation can fail with.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    /// Local validation rejected the input before any request was made.
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Post {0} is not in the local cache")]
    NotCached(i64),
}

impl ClientError {
    /// HTTP status, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
