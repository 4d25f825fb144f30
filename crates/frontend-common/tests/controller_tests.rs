//! Auth session controller against a mock backend

use medadmin_core::{Navigator, RecordingNavigator};
use medadmin_frontend_common::auth::{AuthSessionController, AuthState, AuthStatus, LoginOutcome, Role};
use medadmin_http::SessionClient;
use mockall::mock;
use mockall::predicate::eq;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mock! {
    pub Navigator {}

    impl Navigator for Navigator {
        fn navigate(&self, path: &str);
    }
}

fn controller_for(server: &MockServer, navigator: MockNavigator) -> AuthSessionController {
    let client = SessionClient::builder()
        .base_url(server.uri())
        .navigator(Arc::new(RecordingNavigator::new()))
        .build()
        .unwrap();
    AuthSessionController::new(client, Arc::new(navigator))
}

fn no_navigation() -> MockNavigator {
    let mut navigator = MockNavigator::new();
    navigator.expect_navigate().never();
    navigator
}

async fn mount_me(server: &MockServer, user: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": user })))
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_initialize_restores_session_through_refresh_cookie() {
    let server = MockServer::start().await;
    mount_me(&server, json!({ "_id": "u1", "role": "admin" })).await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "accessToken": "fresh" })))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server, no_navigation());
    assert_eq!(controller.state().status(), AuthStatus::Loading);

    let state = controller.initialize().await;
    assert_eq!(state.status(), AuthStatus::Authenticated(Role::Admin));
    assert!(controller.is_admin());
    assert_eq!(controller.client().access_token().unwrap().as_str(), "fresh");
}

#[tokio::test]
async fn test_initialize_without_session_is_anonymous() {
    let server = MockServer::start().await;
    mount_me(&server, json!({ "_id": "u1" })).await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let controller = controller_for(&server, no_navigation());
    let state = controller.initialize().await;

    assert_eq!(state, AuthState::anonymous());
    assert!(!controller.is_loading());
    assert!(controller.client().access_token().is_none());
}

#[tokio::test]
async fn test_initialize_runs_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server, no_navigation());
    controller.initialize().await;
    let state = controller.initialize().await;
    assert_eq!(state.status(), AuthStatus::Anonymous);
}

#[tokio::test]
async fn test_login_installs_token_and_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "fresh",
            "user": { "_id": "u7", "name": "Nadia", "account": { "role": "admin" } }
        })))
        .mount(&server)
        .await;
    mount_me(&server, json!({ "_id": "u7", "name": "Nadia", "account": { "role": "admin" } }))
        .await;

    let controller = controller_for(&server, no_navigation());
    let outcome = controller.login("nadia@example.com", "secret").await;

    assert!(outcome.is_success());
    assert_eq!(outcome.user().unwrap().id(), Some("u7"));
    assert!(controller.is_authenticated());
    assert!(controller.is_admin());
    assert!(!controller.is_loading());

    // The installed token is what authorizes the next call
    let me = controller.get_me().await.unwrap();
    assert_eq!(me.display_name(), "Nadia");
}

#[tokio::test]
async fn test_login_failure_is_an_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let controller = controller_for(&server, no_navigation());
    let outcome = controller.login("a@b.c", "wrong").await;

    assert_eq!(outcome, LoginOutcome::Failure("Invalid credentials".into()));
    assert!(!controller.is_authenticated());
    assert!(controller.client().access_token().is_none());
}

#[tokio::test]
async fn test_login_without_server_message_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let controller = controller_for(&server, no_navigation());

    let outcome = controller.login("a@b.c", "pw").await;
    assert_eq!(outcome, LoginOutcome::Failure("Login failed".into()));

    let outcome = controller.login("a@b.c", "pw").await;
    assert_eq!(outcome.error(), Some("Login failed"));
}

#[tokio::test]
async fn test_initialize_accepts_user_with_both_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "_id": "65f0c1", "id": "65f0c1", "email": "admin@example.com", "role": "admin" }
        })))
        .mount(&server)
        .await;

    let controller = controller_for(&server, no_navigation());
    let state = controller.initialize().await;

    assert_eq!(state.status(), AuthStatus::Authenticated(Role::Admin));
    assert_eq!(controller.user().unwrap().id(), Some("65f0c1"));
}

#[tokio::test]
async fn test_login_network_failure_message() {
    let client = SessionClient::new("http://127.0.0.1:9").unwrap();
    let controller = AuthSessionController::new(client, Arc::new(no_navigation()));

    let outcome = controller.login("a@b.c", "pw").await;
    assert_eq!(outcome.error(), Some("Network error. Try again."));
}

#[tokio::test]
async fn test_get_me_failure_keeps_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "fresh",
            "user": { "_id": "u1", "role": "admin" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let controller = controller_for(&server, no_navigation());
    controller.login("a@b.c", "pw").await;

    let err = controller.get_me().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(controller.user().unwrap().id(), Some("u1"));
}

#[tokio::test]
async fn test_logout_clears_session_even_when_server_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "fresh",
            "user": { "_id": "u1", "role": "admin" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut navigator = MockNavigator::new();
    navigator
        .expect_navigate()
        .with(eq("/login"))
        .times(1)
        .return_const(());

    let controller = controller_for(&server, navigator);
    controller.login("a@b.c", "pw").await;
    controller.logout().await;

    assert!(controller.user().is_none());
    assert!(controller.client().access_token().is_none());
    assert_eq!(controller.state(), AuthState::anonymous());
}

#[tokio::test]
async fn test_subscribers_see_every_assignment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "fresh",
            "user": { "_id": "u1", "role": "doctor" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let mut navigator = MockNavigator::new();
    navigator.expect_navigate().return_const(());
    let controller = controller_for(&server, navigator);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let subscription = {
        let seen = Rc::clone(&seen);
        controller.subscribe(move |state| seen.borrow_mut().push(state.status()))
    };

    controller.login("a@b.c", "pw").await;
    controller.logout().await;
    assert_eq!(
        *seen.borrow(),
        vec![AuthStatus::Authenticated(Role::User), AuthStatus::Anonymous]
    );

    drop(subscription);
    controller.login("a@b.c", "pw").await;
    assert_eq!(seen.borrow().len(), 2);
}
