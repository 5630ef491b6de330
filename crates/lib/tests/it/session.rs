//! Session synchronizer lifecycle against live in-memory boundaries

use estate_session::{SessionStatus, SessionSynchronizer};

use super::helpers::*;

#[tokio::test]
async fn test_snapshot_starts_initializing_and_settles() {
    let session = setup_session();
    let mut changes = session.subscribe();
    wait_for_status(&mut changes, SessionStatus::Unauthenticated).await;
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_full_account_lifecycle() {
    let session = setup_session();
    let mut changes = session.subscribe();
    wait_for_status(&mut changes, SessionStatus::Unauthenticated).await;

    // Register: snapshot follows the provider callback to Authenticated.
    let created = session
        .register("ann@example.com", "secret1", "Ann")
        .await
        .unwrap();
    wait_for_status(&mut changes, SessionStatus::Authenticated).await;
    assert_eq!(session.profile(), Some(created.clone()));

    // Logout: optimistic, immediate.
    session.logout().await;
    assert_eq!(session.status(), SessionStatus::Unauthenticated);
    wait_for_status(&mut changes, SessionStatus::Unauthenticated).await;

    // Login again: same profile comes back.
    let profile = session.login("ann@example.com", "secret1").await.unwrap();
    assert_eq!(profile.id, created.id);
    wait_for_status(&mut changes, SessionStatus::Authenticated).await;
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_two_synchronizers_share_one_provider() {
    // A navbar and a dashboard each own a subscription; both see the same
    // transitions from the single underlying provider.
    let (gateway, _provider) = setup_gateway_with_provider();
    let navbar = SessionSynchronizer::start(gateway.clone());
    let dashboard = SessionSynchronizer::start(gateway);

    let mut navbar_changes = navbar.subscribe();
    let mut dashboard_changes = dashboard.subscribe();

    navbar
        .register("ann@example.com", "secret1", "Ann")
        .await
        .unwrap();

    wait_for_status(&mut navbar_changes, SessionStatus::Authenticated).await;
    wait_for_status(&mut dashboard_changes, SessionStatus::Authenticated).await;
    assert_eq!(navbar.profile(), dashboard.profile());
}

#[tokio::test]
async fn test_detached_synchronizer_ignores_later_logins() {
    let (gateway, _provider) = setup_gateway_with_provider();
    let session = SessionSynchronizer::start(gateway.clone());
    let mut changes = session.subscribe();
    wait_for_status(&mut changes, SessionStatus::Unauthenticated).await;

    session.detach();

    // A login after teardown must not resurrect the snapshot.
    gateway
        .register("ann@example.com", "secret1", "Ann")
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    assert_eq!(session.status(), SessionStatus::Unauthenticated);
    assert!(!changes.has_changed().unwrap());
}
