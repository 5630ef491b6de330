//! Error types for the identity provider boundary.
//!
//! These are the provider-specific error codes that the gateway normalizes
//! into its own taxonomy. Network-backed implementations map their wire
//! errors onto these variants.

use thiserror::Error;

/// Errors surfaced by an identity provider implementation.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Wrong email/password combination.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// An account already exists for this email.
    #[error("Email already in use: {email}")]
    EmailAlreadyInUse {
        /// The email that was already registered
        email: String,
    },

    /// The password was rejected by the provider's strength policy.
    #[error("Password too weak: {reason}")]
    WeakPassword {
        /// Why the password was rejected
        reason: String,
    },

    /// The provider failed to terminate the session.
    #[error("Sign-out failed: {reason}")]
    SignOutFailed {
        /// Provider-side failure description
        reason: String,
    },

    /// The provider could not be reached or failed mid-request.
    #[error("Identity provider unreachable: {reason}")]
    Transport {
        /// Transport failure description
        reason: String,
    },

    /// Internal provider failure (e.g. credential hashing).
    #[error("Identity provider internal error: {reason}")]
    Internal {
        /// Failure description
        reason: String,
    },
}

impl ProviderError {
    /// Check if this error is a credential failure.
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, ProviderError::InvalidCredentials)
    }

    /// Check if this error indicates the email is already registered.
    pub fn is_email_in_use(&self) -> bool {
        matches!(self, ProviderError::EmailAlreadyInUse { .. })
    }

    /// Check if this error is a transport failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, ProviderError::Transport { .. })
    }
}

impl From<ProviderError> for crate::Error {
    fn from(err: ProviderError) -> Self {
        crate::Error::Provider(err)
    }
}
