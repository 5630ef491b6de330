//!
//! estate-session: client-side identity and session state for the RealEstate
//! marketplace front-end.
//!
//! ## Core Concepts
//!
//! The crate is built around four components, leaf first:
//!
//! * **Validators (`validation`)**: Pure, synchronous form validation producing
//!   field-level error maps. An empty map means the form is submit-eligible.
//! * **Boundaries (`provider`, `docstore`)**: Traits modeling the two external
//!   collaborators - the identity provider (credential verification, session
//!   issuance, auth-change stream) and the document store (profile persistence).
//!   Both ship with in-memory reference implementations.
//! * **Gateway (`gateway::IdentityGateway`)**: Thin typed wrapper with one
//!   operation per external effect: register, login, logout, fetch/update
//!   profile, email existence probe. Normalizes provider error codes into the
//!   gateway taxonomy.
//! * **Synchronizer (`session::SessionSynchronizer`)**: The state machine that
//!   subscribes to the provider's change stream, merges the profile record on
//!   every identity change, and publishes a unified [`session::SessionSnapshot`]
//!   over a watch channel. The [`guard::RouteGuard`] and any other consumer
//!   subscribe to that snapshot.
//!
//! The snapshot has exactly one writer (the synchronizer) and arbitrarily many
//! readers; consumers never mutate session state directly - all mutation flows
//! through gateway calls that eventually produce new provider callbacks.

pub mod clock;
pub mod constants;
pub mod docstore;
pub mod gateway;
pub mod guard;
pub mod provider;
pub mod session;
pub mod validation;

#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;
pub use clock::{Clock, SystemClock};
pub use gateway::IdentityGateway;
pub use session::{SessionSnapshot, SessionStatus, SessionSynchronizer};

/// Result type used throughout the estate-session library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the estate-session library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured identity-provider errors from the provider module
    #[error(transparent)]
    Provider(provider::ProviderError),

    /// Structured document-store errors from the docstore module
    #[error(transparent)]
    Store(docstore::StoreError),

    /// Structured gateway errors from the gateway module
    #[error(transparent)]
    Gateway(gateway::GatewayError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Provider(_) => "provider",
            Error::Store(_) => "docstore",
            Error::Gateway(_) => "gateway",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Gateway(gateway_err) => gateway_err.is_profile_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates a credential failure (wrong email/password).
    pub fn is_authentication_failure(&self) -> bool {
        match self {
            Error::Provider(provider_err) => provider_err.is_invalid_credentials(),
            Error::Gateway(gateway_err) => gateway_err.is_authentication_failure(),
            _ => false,
        }
    }

    /// Check if this error indicates a conflict (account already exists).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Provider(provider_err) => provider_err.is_email_in_use(),
            _ => false,
        }
    }

    /// Check if this error is a transport failure worth retrying by the user.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Provider(provider_err) => provider_err.is_transport(),
            Error::Store(store_err) => store_err.is_transport(),
            _ => false,
        }
    }
}
