//! Identity gateway
//!
//! Thin typed wrapper over the two external boundaries with one operation
//! per external effect. All operations are asynchronous and may fail; the
//! gateway normalizes provider error codes into [`GatewayError`] but adds no
//! retry, backoff, or caching of its own.
//!
//! `IdentityGateway` is a cheap-to-clone handle around an `Arc`'d internal,
//! so the synchronizer and any number of UI actions can share one instance.

pub mod errors;
pub mod types;

pub use errors::GatewayError;
pub use types::{ProfileRecord, ProfileUpdate};

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    Error, Result,
    clock::{Clock, SystemClock},
    constants::PROFILES,
    docstore::{Document, DocumentStore},
    provider::{Identity, IdentityProvider, ProviderError},
};

/// Internal state for IdentityGateway.
struct GatewayInternal {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for GatewayInternal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayInternal")
            .field("provider", &"<dyn IdentityProvider>")
            .field("store", &"<dyn DocumentStore>")
            .field("clock", &self.clock)
            .finish()
    }
}

/// Typed wrapper around the identity provider and the document store.
///
/// One method per external effect: [`register`](Self::register),
/// [`login`](Self::login), [`logout`](Self::logout),
/// [`fetch_profile`](Self::fetch_profile),
/// [`update_profile`](Self::update_profile),
/// [`email_exists`](Self::email_exists).
///
/// ## Example
///
/// ```
/// # use std::sync::Arc;
/// # use estate_session::{IdentityGateway, docstore, provider::InMemoryProvider};
/// # #[tokio::main]
/// # async fn main() -> estate_session::Result<()> {
/// let gateway = IdentityGateway::new(
///     Arc::new(InMemoryProvider::new()),
///     Arc::new(docstore::InMemory::new()),
/// );
///
/// let created = gateway.register("ann@example.com", "secret1", "Ann").await?;
/// let profile = gateway.login("ann@example.com", "secret1").await?;
/// assert_eq!(profile, created);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct IdentityGateway {
    inner: Arc<GatewayInternal>,
}

impl IdentityGateway {
    /// Create a gateway over the given boundaries, using real system time.
    pub fn new(provider: Arc<dyn IdentityProvider>, store: Arc<dyn DocumentStore>) -> Self {
        Self::build(provider, store, Arc::new(SystemClock))
    }

    /// Create a gateway with an explicit time source.
    #[cfg(any(test, feature = "testing"))]
    pub fn with_clock(
        provider: Arc<dyn IdentityProvider>,
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::build(provider, store, clock)
    }

    fn build(
        provider: Arc<dyn IdentityProvider>,
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            inner: Arc::new(GatewayInternal {
                provider,
                store,
                clock,
            }),
        }
    }

    /// The identity provider behind this gateway.
    pub fn provider(&self) -> &Arc<dyn IdentityProvider> {
        &self.inner.provider
    }

    /// The document store behind this gateway.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.inner.store
    }

    /// Create an account, then write its profile record.
    ///
    /// Provider rejection (duplicate email, weak password) and profile-write
    /// failure both surface as [`GatewayError::Registration`]. A profile-write
    /// failure leaves the provider account in place with no profile record;
    /// there is no compensating delete - the orphan is logged here and caught
    /// by the [`GatewayError::ProfileNotFound`] path at next login.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<ProfileRecord> {
        let identity = self
            .inner
            .provider
            .sign_up(email, password)
            .await
            .map_err(registration_rejection)?;

        let now = self.inner.clock.now_utc();
        let profile = ProfileRecord {
            id: identity.id.clone(),
            name: name.trim().to_string(),
            email: identity.email.clone(),
            created_at: now,
            updated_at: now,
        };

        let document = to_document(&profile)?;
        if let Err(error) = self
            .inner
            .store
            .set(PROFILES, &profile.id, document, false)
            .await
        {
            warn!(
                user_id = %profile.id,
                %error,
                "profile write failed after account creation; identity left without a profile record"
            );
            return Err(GatewayError::Registration {
                reason: error.to_string(),
            }
            .into());
        }

        debug!(user_id = %profile.id, "registered new account");
        Ok(profile)
    }

    /// Authenticate, then read the profile record by identity id.
    ///
    /// Invalid credentials surface as [`GatewayError::Authentication`]; an
    /// identity with no profile record as [`GatewayError::ProfileNotFound`].
    pub async fn login(&self, email: &str, password: &str) -> Result<ProfileRecord> {
        let identity = self
            .inner
            .provider
            .sign_in(email, password)
            .await
            .map_err(authentication_rejection)?;

        match self.fetch_profile(&identity.id).await? {
            Some(profile) => {
                debug!(user_id = %profile.id, "login succeeded");
                Ok(profile)
            }
            None => Err(GatewayError::ProfileNotFound {
                user_id: identity.id,
            }
            .into()),
        }
    }

    /// Terminate the session with the identity provider.
    ///
    /// Fails with [`GatewayError::Logout`] only on provider-side failure;
    /// callers are expected to clear local session state regardless.
    pub async fn logout(&self) -> Result<()> {
        self.inner.provider.sign_out().await.map_err(|error| {
            GatewayError::Logout {
                reason: error.to_string(),
            }
            .into()
        })
    }

    /// Read-only profile lookup; a missing record is `Ok(None)`.
    pub async fn fetch_profile(&self, id: &str) -> Result<Option<ProfileRecord>> {
        match self.inner.store.get(PROFILES, id).await? {
            Some(document) => {
                let profile = serde_json::from_value(serde_json::Value::Object(document))?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    /// Merge fields into an existing profile record and refresh `updatedAt`.
    pub async fn update_profile(&self, id: &str, update: ProfileUpdate) -> Result<()> {
        let mut document = Document::new();
        if let Some(name) = update.name {
            document.insert("name".to_string(), name.trim().into());
        }
        if let Some(email) = update.email {
            document.insert("email".to_string(), email.trim().into());
        }
        document.insert(
            "updatedAt".to_string(),
            serde_json::to_value(self.inner.clock.now_utc())?,
        );

        self.inner.store.set(PROFILES, id, document, true).await?;
        debug!(user_id = %id, "profile updated");
        Ok(())
    }

    /// Check whether a profile record exists for this email.
    ///
    /// A pre-submit UX hint, never authoritative: a race between check and
    /// submit is possible and accepted.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let matches = self
            .inner
            .store
            .query(PROFILES, "email", &email.trim().into())
            .await?;
        Ok(!matches.is_empty())
    }

    /// The currently authenticated identity, if any.
    pub fn current_identity(&self) -> Option<Identity> {
        self.inner.provider.current_identity()
    }
}

/// Serialize a profile into its stored document shape.
fn to_document(profile: &ProfileRecord) -> Result<Document> {
    match serde_json::to_value(profile)? {
        serde_json::Value::Object(document) => Ok(document),
        // ProfileRecord is a struct; it always serializes to an object.
        _ => unreachable!("profile serializes to an object"),
    }
}

/// Normalize provider sign-up rejections into the registration taxonomy.
fn registration_rejection(err: Error) -> Error {
    match err {
        Error::Provider(
            code @ (ProviderError::EmailAlreadyInUse { .. } | ProviderError::WeakPassword { .. }),
        ) => GatewayError::Registration {
            reason: code.to_string(),
        }
        .into(),
        other => other,
    }
}

/// Normalize provider sign-in rejections into the authentication taxonomy.
fn authentication_rejection(err: Error) -> Error {
    match err {
        Error::Provider(code @ ProviderError::InvalidCredentials) => GatewayError::Authentication {
            reason: code.to_string(),
        }
        .into(),
        other => other,
    }
}
