//! Route guarding driven by live session snapshots

use estate_session::{
    SessionStatus,
    guard::{GuardVerdict, RouteGuard, RouteKind},
};

use super::helpers::*;

#[tokio::test]
async fn test_protected_route_redirects_visitor_to_login() {
    let session = setup_session();
    let guard = RouteGuard::default();

    // resolve() holds through Initializing, then settles on the redirect.
    let mut changes = session.subscribe();
    let verdict = guard.resolve(&mut changes, RouteKind::Protected).await;
    assert_eq!(verdict, GuardVerdict::Redirect("/login".to_string()));
}

#[tokio::test]
async fn test_auth_page_redirects_signed_in_visitor_to_dashboard() {
    let session = setup_session();
    session
        .register("ann@example.com", "secret1", "Ann")
        .await
        .unwrap();

    let mut changes = session.subscribe();
    wait_for_status(&mut changes, SessionStatus::Authenticated).await;

    let guard = RouteGuard::default();
    let verdict = guard.resolve(&mut changes, RouteKind::AuthOnly).await;
    assert_eq!(verdict, GuardVerdict::Redirect("/dashboard".to_string()));
}

#[tokio::test]
async fn test_guard_reacts_to_logout_mid_view() {
    let session = setup_session();
    session
        .register("ann@example.com", "secret1", "Ann")
        .await
        .unwrap();

    let guard = RouteGuard::default();
    let mut changes = session.subscribe();
    wait_for_status(&mut changes, SessionStatus::Authenticated).await;
    assert_eq!(
        guard.evaluate(changes.borrow_and_update().status, RouteKind::Protected),
        GuardVerdict::Allow
    );

    // The guard re-evaluates on every snapshot change, not only on mount.
    session.logout().await;
    wait_for_status(&mut changes, SessionStatus::Unauthenticated).await;
    assert_eq!(
        guard.evaluate(changes.borrow_and_update().status, RouteKind::Protected),
        GuardVerdict::Redirect("/login".to_string())
    );
}

#[tokio::test]
async fn test_public_route_always_renders() {
    let session = setup_session();
    let guard = RouteGuard::default();
    let mut changes = session.subscribe();

    let verdict = guard.resolve(&mut changes, RouteKind::Public).await;
    assert_eq!(verdict, GuardVerdict::Allow);
}
