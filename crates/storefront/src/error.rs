//! Unified error type for remote operations.
//!
//! Every async store operation returns `Result<T, StoreError>`. A failed
//! operation never leaves local state half-updated; callers decide how to
//! surface the failure.

use thiserror::Error;

/// Errors from talking to the record store or the product catalog.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never completed (connection, DNS, timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The remote service answered with a non-success status.
    #[error("Remote rejected request: {status} - {message}")]
    RemoteRejected { status: u16, message: String },

    /// The response body did not match the expected schema.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The operation needs a signed-in session.
    #[error("No user is signed in")]
    NotSignedIn,
}

impl StoreError {
    /// Whether retrying the same request might succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::RemoteRejected { status, .. } => *status >= 500 || *status == 429,
            Self::MalformedResponse(_) | Self::NotFound(_) | Self::NotSignedIn => false,
        }
    }
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
