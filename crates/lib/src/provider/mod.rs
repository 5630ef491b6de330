//! Identity provider boundary
//!
//! Models the external identity provider: credential verification, session
//! issuance, and the push-model auth-change stream. The rest of the crate
//! only ever talks to [`IdentityProvider`] through the gateway, so swapping
//! the in-memory reference implementation for a network-backed one is a
//! drop-in change.

pub mod errors;
mod in_memory;

pub use errors::ProviderError;
pub use in_memory::InMemoryProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::Result;

/// Opaque handle to the authenticated principal.
///
/// Minted by the identity provider; its `id` is the foreign key for the
/// profile record in the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique id assigned by the provider.
    pub id: String,

    /// Email the principal authenticated with.
    pub email: String,
}

/// The external identity provider.
///
/// Implementations must be `Send + Sync` so they can be shared behind
/// `Arc<dyn IdentityProvider>` across the gateway and the synchronizer's
/// background listener.
///
/// ## Change stream
///
/// [`subscribe`](IdentityProvider::subscribe) returns a watch receiver whose
/// current value is the present session state, so a new subscriber observes
/// the current identity immediately - the same contract as a provider that
/// fires its callback once on subscription.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and establish a session for it.
    ///
    /// On success the change stream fires with the new identity.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity>;

    /// Authenticate with existing credentials and establish a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity>;

    /// Terminate the local session.
    ///
    /// On success the change stream fires with `None`.
    async fn sign_out(&self) -> Result<()>;

    /// The currently authenticated identity, if any.
    fn current_identity(&self) -> Option<Identity>;

    /// Subscribe to session changes.
    fn subscribe(&self) -> watch::Receiver<Option<Identity>>;
}
