//! Typed error types for the upwait-core service layer.

use thiserror::Error;

/// Result type alias for core service operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in the upwait-core service layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A request parameter was missing or malformed.
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// No item matched the requested name.
    #[error("Item not found: {name}")]
    NotFound { name: String },

    /// An unexpected storage or database error.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl CoreError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
