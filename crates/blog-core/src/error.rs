//! Domain-level error types.

use thiserror::Error;

/// Domain errors - what a store operation can fail with.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed identifier or missing/short fields.
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Post not found")]
    NotFound { id: i64 },

    /// The storage engine failed; the message is the engine's own.
    #[error("{0}")]
    Storage(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,
}
