//! Tests for the session store.

use std::sync::Arc;

use super::SessionStore;
use crate::domain::ErrorCode;
use crate::domain::ports::{
    AuthGatewayError, AuthSession, Credentials, MockAuthGateway, MockTokenStore, TokenStoreError,
};
use crate::domain::user::User;

fn credentials(email: &str) -> Credentials {
    Credentials {
        email: email.to_owned(),
        password: "secret".to_owned(),
        name: None,
    }
}

fn user(email: &str) -> User {
    User {
        id: 1,
        name: "Utilisateur Test".to_owned(),
        email: email.to_owned(),
        role: "student".to_owned(),
        avatar: format!("https://i.pravatar.cc/150?u={email}"),
    }
}

fn session(email: &str) -> AuthSession {
    AuthSession {
        token: "issued-token".to_owned(),
        user: user(email),
    }
}

fn empty_storage() -> MockTokenStore {
    let mut tokens = MockTokenStore::new();
    tokens.expect_load().return_once(|| Ok(None));
    tokens
}

#[test]
fn construction_seeds_the_persisted_token() {
    let mut tokens = MockTokenStore::new();
    tokens
        .expect_load()
        .return_once(|| Ok(Some("stored-token".to_owned())));

    let store = SessionStore::new(Arc::new(MockAuthGateway::new()), Arc::new(tokens));
    let snapshot = store.snapshot();
    assert!(snapshot.is_authenticated());
    assert_eq!(snapshot.token.as_deref(), Some("stored-token"));
    // The user stays unset until the identity fetch resolves.
    assert!(snapshot.user.is_none());
}

#[test]
fn unreadable_storage_degrades_to_unauthenticated() {
    let mut tokens = MockTokenStore::new();
    tokens
        .expect_load()
        .return_once(|| Err(TokenStoreError::storage("disk on fire")));

    let store = SessionStore::new(Arc::new(MockAuthGateway::new()), Arc::new(tokens));
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn login_sets_token_and_user_together_and_persists() {
    let mut gateway = MockAuthGateway::new();
    gateway
        .expect_login()
        .withf(|credentials| credentials.email == "a@b.com")
        .times(1)
        .return_once(|_| Ok(session("a@b.com")));
    let mut tokens = empty_storage();
    tokens
        .expect_save()
        .withf(|token| token == "issued-token")
        .times(1)
        .return_once(|_| Ok(()));

    let store = SessionStore::new(Arc::new(gateway), Arc::new(tokens));
    store
        .login(&credentials("a@b.com"))
        .await
        .expect("login succeeds");

    let snapshot = store.snapshot();
    assert!(snapshot.is_authenticated());
    assert_eq!(snapshot.user.expect("user set").email, "a@b.com");
}

#[tokio::test]
async fn rejected_login_surfaces_the_gateway_message_and_keeps_state() {
    let mut gateway = MockAuthGateway::new();
    gateway
        .expect_login()
        .return_once(|_| Err(AuthGatewayError::rejected("Identifiants incorrects")));

    let store = SessionStore::new(Arc::new(gateway), Arc::new(empty_storage()));
    let error = store
        .login(&credentials("a@b.com"))
        .await
        .expect_err("login fails");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), "Identifiants incorrects");
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn blank_rejection_message_falls_back_to_the_login_error() {
    let mut gateway = MockAuthGateway::new();
    gateway
        .expect_login()
        .return_once(|_| Err(AuthGatewayError::rejected("")));

    let store = SessionStore::new(Arc::new(gateway), Arc::new(empty_storage()));
    let error = store
        .login(&credentials("a@b.com"))
        .await
        .expect_err("login fails");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), "Identifiants incorrects");
}

#[tokio::test]
async fn register_logs_the_new_account_in() {
    let mut gateway = MockAuthGateway::new();
    gateway
        .expect_register()
        .times(1)
        .return_once(|_| Ok(session("new@b.com")));
    let mut tokens = empty_storage();
    tokens.expect_save().return_once(|_| Ok(()));

    let store = SessionStore::new(Arc::new(gateway), Arc::new(tokens));
    store
        .register(&credentials("new@b.com"))
        .await
        .expect("registration succeeds");
    assert!(store.is_authenticated());
}

#[tokio::test]
async fn fetch_user_is_a_no_op_without_a_token() {
    // No expectation on current_user: a call would panic the mock.
    let store = SessionStore::new(Arc::new(MockAuthGateway::new()), Arc::new(empty_storage()));
    store.fetch_user().await.expect("no-op succeeds");
    assert!(store.snapshot().user.is_none());
}

#[tokio::test]
async fn fetch_user_failure_triggers_an_implicit_logout() {
    let mut gateway = MockAuthGateway::new();
    gateway
        .expect_current_user()
        .return_once(|_| Err(AuthGatewayError::rejected("token expired")));
    let mut tokens = MockTokenStore::new();
    tokens
        .expect_load()
        .return_once(|| Ok(Some("stale-token".to_owned())));
    tokens.expect_clear().times(1).return_once(|| Ok(()));

    let store = SessionStore::new(Arc::new(gateway), Arc::new(tokens));
    store.fetch_user().await.expect("failure is swallowed");

    let snapshot = store.snapshot();
    assert!(!snapshot.is_authenticated());
    assert!(snapshot.user.is_none());
}

#[tokio::test]
async fn logout_always_unauthenticates_and_clears_storage() {
    let mut gateway = MockAuthGateway::new();
    gateway.expect_login().return_once(|_| Ok(session("a@b.com")));
    let mut tokens = empty_storage();
    tokens.expect_save().return_once(|_| Ok(()));
    tokens.expect_clear().times(1).return_once(|| Ok(()));

    let store = SessionStore::new(Arc::new(gateway), Arc::new(tokens));
    store
        .login(&credentials("a@b.com"))
        .await
        .expect("login succeeds");

    store.logout();
    let snapshot = store.snapshot();
    assert!(!snapshot.is_authenticated());
    assert!(snapshot.user.is_none());
}

#[test]
fn logout_from_a_fresh_store_is_harmless() {
    let mut tokens = empty_storage();
    tokens.expect_clear().return_once(|| Ok(()));
    let store = SessionStore::new(Arc::new(MockAuthGateway::new()), Arc::new(tokens));
    store.logout();
    assert!(!store.is_authenticated());
}
