//! Gateway flows: register, login, logout, profile maintenance

use estate_session::gateway::ProfileUpdate;
use estate_session::validation::{RegisterForm, validate_register_form};

use super::helpers::*;

#[tokio::test]
async fn test_register_then_login_round_trip() {
    let gateway = setup_gateway();

    let created = register_account(&gateway, "a@b.com", "secret1", "Ann").await;
    let logged_in = gateway.login("a@b.com", "secret1").await.unwrap();

    assert_eq!(logged_in.id, created.id);
    assert_eq!(logged_in.name, created.name);
    assert_eq!(logged_in.email, created.email);
}

#[tokio::test]
async fn test_validated_form_submits_cleanly() {
    // The submit path as the register page drives it: validate, then call
    // the gateway only once the error map is empty.
    let form = RegisterForm {
        name: "Ann".into(),
        email: "ann@example.com".into(),
        password: "secret1".into(),
        confirm_password: "secret1".into(),
    };
    let errors = validate_register_form(&form);
    assert!(errors.is_empty());

    let gateway = setup_gateway();
    let profile = gateway
        .register(&form.email, &form.password, &form.name)
        .await
        .unwrap();
    assert_eq!(profile.email, form.email);
}

#[tokio::test]
async fn test_login_before_register_fails_closed() {
    let gateway = setup_gateway();
    let err = gateway.login("a@b.com", "secret1").await.unwrap_err();
    assert!(err.is_authentication_failure());
}

#[tokio::test]
async fn test_logout_terminates_provider_session() {
    let (gateway, provider) = setup_gateway_with_provider();
    register_account(&gateway, "a@b.com", "secret1", "Ann").await;
    assert!(gateway.current_identity().is_some());

    gateway.logout().await.unwrap();
    assert!(gateway.current_identity().is_none());
    let _ = provider;
}

#[tokio::test]
async fn test_email_exists_tracks_registrations() {
    let gateway = setup_gateway();
    assert!(!gateway.email_exists("a@b.com").await.unwrap());

    register_account(&gateway, "a@b.com", "secret1", "Ann").await;

    assert!(gateway.email_exists("a@b.com").await.unwrap());
    // The probe matches the stored email exactly; an unregistered address
    // stays clear even with other accounts present.
    assert!(!gateway.email_exists("c@d.com").await.unwrap());
}

#[tokio::test]
async fn test_profile_update_survives_relogin() {
    let gateway = setup_gateway();
    let created = register_account(&gateway, "a@b.com", "secret1", "Ann").await;

    gateway
        .update_profile(
            &created.id,
            ProfileUpdate {
                name: Some("Anne".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    gateway.logout().await.unwrap();
    let profile = gateway.login("a@b.com", "secret1").await.unwrap();
    assert_eq!(profile.name, "Anne");
    assert!(profile.updated_at >= profile.created_at);
}
