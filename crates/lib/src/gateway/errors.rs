//! Error types for the identity gateway.
//!
//! The gateway normalizes provider-specific error codes into this taxonomy;
//! transport failures from either boundary pass through untouched so callers
//! can render a generic "try again" message.

use thiserror::Error;

/// Errors that can occur during gateway operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Credential failure during login.
    #[error("Authentication failed: {reason}")]
    Authentication {
        /// Provider-reported reason
        reason: String,
    },

    /// Account creation was rejected, or the profile write after account
    /// creation failed.
    #[error("Registration failed: {reason}")]
    Registration {
        /// Provider- or store-reported reason
        reason: String,
    },

    /// The identity exists but no profile record does.
    ///
    /// Distinct from [`GatewayError::Authentication`] so logs can tell the
    /// missing-profile anomaly apart from a genuine credential failure.
    #[error("Profile not found for user: {user_id}")]
    ProfileNotFound {
        /// The identity id with no profile record
        user_id: String,
    },

    /// Provider-side sign-out failure.
    ///
    /// Callers clear local session state regardless; this error is logged,
    /// never blocking.
    #[error("Logout failed: {reason}")]
    Logout {
        /// Provider-reported reason
        reason: String,
    },
}

impl GatewayError {
    /// Check if this error is a credential failure.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, GatewayError::Authentication { .. })
    }

    /// Check if this error indicates a missing profile record.
    pub fn is_profile_not_found(&self) -> bool {
        matches!(self, GatewayError::ProfileNotFound { .. })
    }

    /// Check if this error came from the registration flow.
    pub fn is_registration_failure(&self) -> bool {
        matches!(self, GatewayError::Registration { .. })
    }
}

impl From<GatewayError> for crate::Error {
    fn from(err: GatewayError) -> Self {
        crate::Error::Gateway(err)
    }
}
