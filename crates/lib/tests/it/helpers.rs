//! Shared helpers for estate-session integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use estate_session::{
    IdentityGateway, SessionSnapshot, SessionStatus, SessionSynchronizer, docstore,
    gateway::ProfileRecord, provider::InMemoryProvider,
};
use tokio::sync::watch;
use tokio::time::timeout;

/// Create a gateway over fresh in-memory boundaries.
pub fn setup_gateway() -> IdentityGateway {
    IdentityGateway::new(
        Arc::new(InMemoryProvider::new()),
        Arc::new(docstore::InMemory::new()),
    )
}

/// Create a gateway with a handle on its provider, for driving auth
/// transitions directly.
pub fn setup_gateway_with_provider() -> (IdentityGateway, Arc<InMemoryProvider>) {
    let provider = Arc::new(InMemoryProvider::new());
    let gateway = IdentityGateway::new(provider.clone(), Arc::new(docstore::InMemory::new()));
    (gateway, provider)
}

/// Create a started synchronizer over fresh in-memory boundaries.
pub fn setup_session() -> SessionSynchronizer {
    SessionSynchronizer::start(setup_gateway())
}

/// Register an account, panicking on failure.
pub async fn register_account(
    gateway: &IdentityGateway,
    email: &str,
    password: &str,
    name: &str,
) -> ProfileRecord {
    gateway
        .register(email, password, name)
        .await
        .expect("Failed to register account")
}

/// Block until the snapshot reaches the given status, with a test timeout.
pub async fn wait_for_status(
    changes: &mut watch::Receiver<SessionSnapshot>,
    status: SessionStatus,
) {
    timeout(Duration::from_secs(2), async {
        while changes.borrow_and_update().status != status {
            changes.changed().await.expect("synchronizer alive");
        }
    })
    .await
    .unwrap_or_else(|_| panic!("timed out waiting for {status:?}"));
}
