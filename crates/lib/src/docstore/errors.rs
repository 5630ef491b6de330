//! Error types for the document store boundary.

use thiserror::Error;

/// Errors surfaced by a document store implementation.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or failed mid-request.
    #[error("Document store unreachable: {reason}")]
    Transport {
        /// Transport failure description
        reason: String,
    },
}

impl StoreError {
    /// Check if this error is a transport failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, StoreError::Transport { .. })
    }
}

impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
