//! Domain errors for the readthrough repository system.

use thiserror::Error;

/// Errors surfaced by repository operations.
///
/// Store failures are wrapped once at the store boundary and pass through
/// the engine untouched; the engine itself never logs or swallows them.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A scope-requiring operation was called on a type that is not both
    /// cacheable and scoped. Always a caller-configuration error.
    #[error("Unsupported operation {operation}: entity type is not cacheable and scoped")]
    UnsupportedOperation {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// The store has not wired this operation to a real query yet.
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    /// Failure raised by the underlying store (constraint violation,
    /// connectivity loss, ...).
    #[error("Database error: {0}")]
    Database(String),
}

/// Result alias used throughout the crate.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        RepositoryError::Database(err.to_string())
    }
}
