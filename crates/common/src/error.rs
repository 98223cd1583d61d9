//! Common error types for PerpX

use thiserror::Error;

/// Common error type used across PerpX crates
///
/// The taxonomy is deliberately small:
/// - [`Error::InvalidInput`] is rejected before any state mutation and is
///   fully recoverable with corrected input.
/// - [`Error::NotFound`] is recoverable; the caller should no-op.
/// - [`Error::Inconsistency`] indicates a violated engine invariant (a
///   crossed book after matching, a fill underflow). It must never occur if
///   the invariants hold and is surfaced loudly rather than corrected.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input was provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal inconsistency (matching-logic defect)
    #[error("Internal inconsistency: {0}")]
    Inconsistency(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using the common Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an internal inconsistency error
    pub fn inconsistency(msg: impl Into<String>) -> Self {
        Self::Inconsistency(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
