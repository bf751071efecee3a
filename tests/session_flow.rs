//! End-to-end session lifecycle against a mocked collaborator.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use eduwaka::{ApiClient, ApiError, SessionManager, SessionState, TokenStore};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_for(user_id: u64, email: &str) -> String {
    let payload = format!(r#"{{"user_id":{user_id},"email":"{email}","username":"{email}"}}"#);
    format!("header.{}.signature", URL_SAFE_NO_PAD.encode(payload))
}

fn session_against(server: &MockServer, tmp: &TempDir) -> SessionManager {
    let api = ApiClient::new(format!("{}/api/", server.uri())).unwrap();
    let store = TokenStore::new(tmp.path().join("credentials.json"));
    SessionManager::load(api, store)
}

async fn mount_token_endpoint(server: &MockServer, access: &str, refresh: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/token/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "access": access,
                "refresh": refresh,
            })),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_persists_tokens_and_authenticates() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    mount_token_endpoint(&server, &token_for(7, "a@test.com"), "refresh-1").await;

    let session = session_against(&server, &tmp);
    assert_eq!(session.state(), SessionState::Anonymous);

    let identity = session.login("a@test.com", "Secret123").await.unwrap();
    assert_eq!(identity.id, 7);
    assert_eq!(identity.email, "a@test.com");
    assert!(session.is_authenticated());

    // Both keys persisted together under their fixed names.
    let raw = std::fs::read_to_string(tmp.path().join("credentials.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored["access_token"], token_for(7, "a@test.com"));
    assert_eq!(stored["refresh_token"], "refresh-1");
}

#[tokio::test]
async fn restart_reproduces_identity_without_network() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    mount_token_endpoint(&server, &token_for(21, "b@test.com"), "refresh-2").await;

    let session = session_against(&server, &tmp);
    session.login("b@test.com", "Secret123").await.unwrap();
    drop(session);

    // A server with no mocks: any request would come back 404 and the
    // identity below could not appear.
    let silent = MockServer::start().await;
    let restarted = session_against(&silent, &tmp);
    let identity = restarted.current_identity().unwrap();
    assert_eq!(identity.id, 21);
    assert!(silent.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn logout_clears_both_keys_and_identity() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    mount_token_endpoint(&server, &token_for(3, "c@test.com"), "refresh-3").await;

    let session = session_against(&server, &tmp);
    session.login("c@test.com", "Secret123").await.unwrap();

    session.logout().unwrap();
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(session.access_token().is_none());
    assert!(!tmp.path().join("credentials.json").exists());
}

#[tokio::test]
async fn register_triggers_implicit_login() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .and(body_json(json!({
            "email": "a@test.com",
            "username": "a@test.com",
            "password": "Secret123",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 99,
            "username": "a@test.com",
            "email": "a@test.com",
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_token_endpoint(&server, &token_for(99, "a@test.com"), "refresh-99").await;

    let session = session_against(&server, &tmp);
    let identity = session.register("a@test.com", "Secret123").await.unwrap();

    assert_eq!(identity.id, 99);
    assert!(matches!(session.state(), SessionState::Authenticated(_)));
}

#[tokio::test]
async fn register_rejection_surfaces_email_field_error_first() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "email": ["user with this email already exists."],
            "username": ["user with this username already exists."],
        })))
        .mount(&server)
        .await;

    let session = session_against(&server, &tmp);
    let err = session
        .register("a@test.com", "Secret123")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "user with this email already exists.");
    assert_eq!(session.state(), SessionState::Anonymous);
}

#[tokio::test]
async fn register_rejection_without_fields_uses_fallback() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({})))
        .mount(&server)
        .await;

    let session = session_against(&server, &tmp);
    let err = session
        .register("a@test.com", "Secret123")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Signup failed.");
}

#[tokio::test]
async fn login_rejection_surfaces_detail_message() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/auth/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Invalid username or password.",
        })))
        .mount(&server)
        .await;

    let session = session_against(&server, &tmp);
    let err = session.login("a@test.com", "wrong").await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected(_)));
    assert_eq!(err.to_string(), "Invalid username or password.");
    assert_eq!(session.state(), SessionState::Anonymous);
}

#[tokio::test]
async fn login_with_undecodable_token_clears_store() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    mount_token_endpoint(&server, "not-a-decodable-token", "refresh-x").await;

    let session = session_against(&server, &tmp);
    let err = session.login("a@test.com", "Secret123").await.unwrap_err();

    assert!(matches!(err, ApiError::TokenDecode));
    assert_eq!(session.state(), SessionState::Anonymous);
    // No latent tokens-present/identity-null state survives.
    assert!(!tmp.path().join("credentials.json").exists());
}

#[tokio::test]
async fn refresh_replaces_access_token() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    mount_token_endpoint(&server, &token_for(5, "d@test.com"), "refresh-5").await;

    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .and(body_json(json!({ "refresh": "refresh-5" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": token_for(5, "d@renamed.com"),
        })))
        .mount(&server)
        .await;

    let session = session_against(&server, &tmp);
    session.login("d@test.com", "Secret123").await.unwrap();

    let identity = session.refresh().await.unwrap();
    assert_eq!(identity.email, "d@renamed.com");
    assert_eq!(
        session.access_token().unwrap(),
        token_for(5, "d@renamed.com")
    );

    // The refresh token is kept alongside the new access token.
    let raw = std::fs::read_to_string(tmp.path().join("credentials.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored["refresh_token"], "refresh-5");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_logout_keeps_disk_and_memory_together() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    mount_token_endpoint(&server, &token_for(11, "e@test.com"), "refresh-11").await;

    let session = std::sync::Arc::new(session_against(&server, &tmp));
    let path = tmp.path().join("credentials.json");

    for _ in 0..200 {
        let racer = session.clone();
        let logouts = tokio::task::spawn_blocking(move || {
            for _ in 0..20 {
                racer.logout().unwrap();
            }
        });
        let (login, logouts) = tokio::join!(session.login("e@test.com", "Secret123"), logouts);
        login.unwrap();
        logouts.unwrap();

        // Whatever the interleaving, once both calls have returned the
        // reported state and the credentials file must agree: a session the
        // process reports is one a restart can reproduce.
        assert_eq!(session.is_authenticated(), path.exists());
        session.logout().unwrap();
    }
}

#[tokio::test]
async fn refresh_while_anonymous_is_local_error() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();

    let session = session_against(&server, &tmp);
    let err = session.refresh().await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
