//! Store error types

use thiserror::Error;

/// Errors that can occur during store queries
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error reaching the backing data
    #[error("I/O error: {0}")]
    Io(String),

    /// Malformed backing data
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Backend-specific query failure
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Deserialization(err.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
