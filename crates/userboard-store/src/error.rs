//! Error types for the userboard-store crate.
//!
//! All store operations return [`StoreError`] via [`StoreResult`].
//! Uses `thiserror` for ergonomic, zero-cost error definitions.

use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the user registry.
///
/// Every variant is recoverable and reported synchronously to the caller;
/// a failed operation leaves the store completely unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A required field was missing or empty.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The username collides case-insensitively with an existing record.
    #[error("username already exists: {0}")]
    DuplicateUsername(String),

    /// The requested record was not found.
    #[error("user not found: {id}")]
    NotFound { id: String },
}
