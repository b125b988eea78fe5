//! Error types for the reservation stores.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during reservation table operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("delete failed: {0}")]
    Delete(String),

    #[error("insert failed: {0}")]
    Insert(String),

    #[error("query failed: {0}")]
    Query(String),
}
