//! Session synchronization
//!
//! The state machine that keeps the client's view of "who is signed in" in
//! sync with the identity provider and the document store. It subscribes to
//! the provider's change stream, merges the profile record on every identity
//! change, and publishes a unified [`SessionSnapshot`] over a watch channel.
//!
//! The snapshot has exactly one writer (the synchronizer) and arbitrarily
//! many readers. The synchronizer never surfaces errors to its subscribers;
//! every ambiguity (missing profile, failed fetch) degrades to
//! `Unauthenticated` and is logged.
//!
//! ## Ordering
//!
//! Profile fetches triggered by successive provider callbacks may complete
//! out of order. Each fetch is tagged with a generation number taken when its
//! callback arrives; at resolution the result is published only if its
//! generation is still the latest. The generation check and the snapshot
//! write happen under one lock, so the visible snapshot always corresponds
//! to the last callback, never the last-resolved fetch.

use std::sync::{Arc, Mutex, Weak};

use serde::{Deserialize, Serialize};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, trace, warn};

use crate::{
    Result,
    gateway::{IdentityGateway, ProfileRecord},
    provider::Identity,
};

/// Lifecycle state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Before the first provider callback has been processed.
    Initializing,
    /// No authenticated principal.
    Unauthenticated,
    /// An authenticated principal with its profile record.
    Authenticated,
}

/// The unit of truth exposed to the rest of the application.
///
/// Invariant: `status == Authenticated` if and only if both `identity` and
/// `profile` are present. All constructors preserve this, and the snapshot
/// is replaced wholesale on every transition - it is never field-mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// The authenticated principal, or absent.
    pub identity: Option<Identity>,
    /// The principal's profile record, or absent.
    pub profile: Option<ProfileRecord>,
    /// Lifecycle state matching the two fields above.
    pub status: SessionStatus,
}

impl SessionSnapshot {
    /// Snapshot before the first provider callback.
    pub fn initializing() -> Self {
        Self {
            identity: None,
            profile: None,
            status: SessionStatus::Initializing,
        }
    }

    /// Snapshot with no authenticated principal.
    pub fn unauthenticated() -> Self {
        Self {
            identity: None,
            profile: None,
            status: SessionStatus::Unauthenticated,
        }
    }

    /// Snapshot for an authenticated principal.
    pub fn authenticated(identity: Identity, profile: ProfileRecord) -> Self {
        Self {
            identity: Some(identity),
            profile: Some(profile),
            status: SessionStatus::Authenticated,
        }
    }

    /// True when an authenticated principal and profile are present.
    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    /// True before the first provider callback has been processed.
    pub fn is_loading(&self) -> bool {
        self.status == SessionStatus::Initializing
    }
}

/// Publication state guarded by one mutex.
///
/// `generation` tags in-flight profile fetches; `detached` permanently stops
/// all publication after teardown. Checking either and writing the snapshot
/// happen in the same critical section.
struct PublishState {
    generation: u64,
    detached: bool,
}

/// Internal state for SessionSynchronizer.
struct SynchronizerInternal {
    gateway: IdentityGateway,
    snapshot_tx: watch::Sender<SessionSnapshot>,
    publish: Mutex<PublishState>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl SynchronizerInternal {
    /// Process one provider callback.
    ///
    /// Serializes visible state transitions by callback arrival order: the
    /// generation is bumped synchronously here, before any await point, so a
    /// later callback always outranks the fetches of earlier ones.
    fn apply_auth_change(internal: &Arc<Self>, identity: Option<Identity>) {
        let Some(identity) = identity else {
            let mut publish = internal.publish.lock().unwrap();
            if publish.detached {
                return;
            }
            publish.generation += 1;
            internal
                .snapshot_tx
                .send_replace(SessionSnapshot::unauthenticated());
            return;
        };

        let generation = {
            let mut publish = internal.publish.lock().unwrap();
            if publish.detached {
                return;
            }
            publish.generation += 1;
            publish.generation
        };

        trace!(user_id = %identity.id, generation, "identity present; fetching profile");
        let weak = Arc::downgrade(internal);
        tokio::spawn(async move {
            Self::sync_profile(weak, generation, identity).await;
        });
    }

    /// Resolve the profile fetch for one callback and publish the outcome,
    /// unless a newer callback has arrived or the synchronizer was detached.
    async fn sync_profile(weak: Weak<Self>, generation: u64, identity: Identity) {
        let Some(internal) = weak.upgrade() else {
            return;
        };
        let fetched = internal.gateway.fetch_profile(&identity.id).await;

        let publish = internal.publish.lock().unwrap();
        if publish.detached || publish.generation != generation {
            trace!(
                user_id = %identity.id,
                generation,
                latest = publish.generation,
                "discarding stale profile fetch"
            );
            return;
        }

        let snapshot = match fetched {
            Ok(Some(profile)) => SessionSnapshot::authenticated(identity, profile),
            Ok(None) => {
                // An authenticated identity with no profile record is
                // unexpected; degrade rather than crash the UI.
                warn!(
                    user_id = %identity.id,
                    "authenticated identity has no profile record; treating as unauthenticated"
                );
                SessionSnapshot::unauthenticated()
            }
            Err(error) => {
                warn!(
                    user_id = %identity.id,
                    %error,
                    "profile fetch failed during session sync; treating as unauthenticated"
                );
                SessionSnapshot::unauthenticated()
            }
        };
        internal.snapshot_tx.send_replace(snapshot);
    }
}

impl Drop for SynchronizerInternal {
    fn drop(&mut self) {
        if let Some(task) = self.listener.lock().unwrap().take() {
            task.abort();
        }
    }
}

/// Tracks the authenticated principal and publishes the session snapshot.
///
/// Cheap-to-clone handle around an `Arc`'d internal; the background listener
/// holds only a weak reference, so dropping every handle tears the listener
/// down. Call [`detach`](Self::detach) for deterministic teardown.
///
/// ## Example
///
/// ```
/// # use std::sync::Arc;
/// # use estate_session::{IdentityGateway, SessionSynchronizer, docstore, provider::InMemoryProvider};
/// # #[tokio::main]
/// # async fn main() -> estate_session::Result<()> {
/// let gateway = IdentityGateway::new(
///     Arc::new(InMemoryProvider::new()),
///     Arc::new(docstore::InMemory::new()),
/// );
/// let session = SessionSynchronizer::start(gateway);
///
/// let mut snapshots = session.subscribe();
/// session.register("ann@example.com", "secret1", "Ann").await?;
/// // The registration callback drives the snapshot to Authenticated.
/// while !snapshots.borrow_and_update().is_authenticated() {
///     snapshots.changed().await.expect("synchronizer alive");
/// }
/// assert!(session.is_authenticated());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SessionSynchronizer {
    inner: Arc<SynchronizerInternal>,
}

impl std::fmt::Debug for SessionSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSynchronizer")
            .field("status", &self.status())
            .finish()
    }
}

impl SessionSynchronizer {
    /// Start synchronizing against the given gateway.
    ///
    /// The snapshot starts as `Initializing` and settles once the provider's
    /// current state has been processed. Must be called within a tokio
    /// runtime; one listener task is spawned per synchronizer.
    pub fn start(gateway: IdentityGateway) -> Self {
        let (snapshot_tx, _) = watch::channel(SessionSnapshot::initializing());
        let mut changes = gateway.provider().subscribe();

        let inner = Arc::new(SynchronizerInternal {
            gateway,
            snapshot_tx,
            publish: Mutex::new(PublishState {
                generation: 0,
                detached: false,
            }),
            listener: Mutex::new(None),
        });

        let weak = Arc::downgrade(&inner);
        let task = tokio::spawn(async move {
            loop {
                // The receiver's current value is the provider's present
                // session state, so the first iteration is the first callback.
                let identity = changes.borrow_and_update().clone();
                let Some(internal) = weak.upgrade() else {
                    break;
                };
                SynchronizerInternal::apply_auth_change(&internal, identity);
                drop(internal);

                if changes.changed().await.is_err() {
                    debug!("provider change stream closed; session listener stopping");
                    break;
                }
            }
        });
        *inner.listener.lock().unwrap() = Some(task);

        Self { inner }
    }

    /// Subscribe to session snapshots.
    ///
    /// The receiver's current value is the latest snapshot; consumers tie the
    /// receiver's lifetime to their own and re-evaluate on every change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// The latest session status.
    pub fn status(&self) -> SessionStatus {
        self.inner.snapshot_tx.borrow().status
    }

    /// True when an authenticated principal and profile are present.
    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated()
    }

    /// True before the first provider callback has been processed.
    pub fn is_loading(&self) -> bool {
        self.snapshot().is_loading()
    }

    /// The authenticated principal from the latest snapshot, if any.
    pub fn identity(&self) -> Option<Identity> {
        self.inner.snapshot_tx.borrow().identity.clone()
    }

    /// The profile record from the latest snapshot, if any.
    pub fn profile(&self) -> Option<ProfileRecord> {
        self.inner.snapshot_tx.borrow().profile.clone()
    }

    /// Authenticate with existing credentials.
    ///
    /// Errors propagate to the calling UI action for rendering; on success
    /// the resulting provider callback drives the snapshot to
    /// `Authenticated`.
    pub async fn login(&self, email: &str, password: &str) -> Result<ProfileRecord> {
        self.inner.gateway.login(email, password).await
    }

    /// Create an account and its profile record.
    ///
    /// On success the registration signs the principal in and the provider
    /// callback drives the snapshot to `Authenticated`.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<ProfileRecord> {
        self.inner.gateway.register(email, password, name).await
    }

    /// Sign out.
    ///
    /// The local transition to `Unauthenticated` is optimistic and immediate:
    /// provider-side failure is logged but never blocks it. The eventual
    /// provider callback confirming the sign-out is an idempotent no-op.
    pub async fn logout(&self) {
        if let Err(error) = self.inner.gateway.logout().await {
            warn!(%error, "provider sign-out failed; clearing local session anyway");
        }

        let mut publish = self.inner.publish.lock().unwrap();
        if publish.detached {
            return;
        }
        publish.generation += 1;
        self.inner
            .snapshot_tx
            .send_replace(SessionSnapshot::unauthenticated());
    }

    /// Tear down the synchronizer.
    ///
    /// Stops the provider listener and suppresses the effect of any in-flight
    /// profile fetch: no snapshot mutation is observable after this returns.
    pub fn detach(&self) {
        {
            let mut publish = self.inner.publish.lock().unwrap();
            publish.detached = true;
        }
        if let Some(task) = self.inner.listener.lock().unwrap().take() {
            task.abort();
        }
        debug!("session synchronizer detached");
    }
}
