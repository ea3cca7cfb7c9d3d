use bazaar_common::{AuthProvider, Session};
use bazaar_session::{EntryRoute, GateState, SessionGate, SupabaseAuthProvider};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn stored_session(expires_in: i64) -> Session {
    Session {
        access_token: "access-1".to_string(),
        refresh_token: "refresh-1".to_string(),
        expires_at: Some(Utc::now().timestamp() + expires_in),
        user: None,
    }
}

fn provider(server: &MockServer, session: Option<Session>) -> Arc<SupabaseAuthProvider> {
    Arc::new(SupabaseAuthProvider::new(&server.uri(), "anon", session))
}

async fn mount_token_endpoint(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(header("apikey", "anon"))
        .and(body_json(json!({ "refresh_token": "refresh-1" })))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "access_token": "access-2",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh-2",
            "user": { "id": "user-1", "email": "reader@example.com" }
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_valid_session_routes_home() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("apikey", "anon"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-1",
            "email": "reader@example.com",
            "role": "authenticated"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gate = SessionGate::mount(provider(&server, Some(stored_session(3600))));
    let state = gate.resolve().await;

    assert_eq!(state.route(), Some(EntryRoute::Home));
    match state {
        GateState::Authenticated(session) => {
            assert_eq!(session.user.map(|u| u.id), Some("user-1".to_string()));
        }
        other => panic!("expected Authenticated, got {other:?}"),
    }
}

#[tokio::test]
async fn test_no_stored_session_skips_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let gate = SessionGate::mount(provider(&server, None));
    assert_eq!(gate.resolve().await, GateState::Unauthenticated);
}

#[tokio::test]
async fn test_rejected_access_token_routes_to_sign_up() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let provider = provider(&server, Some(stored_session(3600)));
    let gate = SessionGate::mount(provider.clone());

    assert_eq!(gate.resolve().await.route(), Some(EntryRoute::SignUp));
    assert_eq!(provider.stored_session().await, None);
}

#[tokio::test]
async fn test_auth_service_failure_routes_to_sign_up() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let provider = provider(&server, Some(stored_session(3600)));
    assert!(provider.get_session().await.is_err());

    let gate = SessionGate::mount(provider);
    assert_eq!(gate.resolve().await, GateState::Unauthenticated);
}

#[tokio::test]
async fn test_unreachable_auth_service_routes_to_sign_up() {
    // Nothing listens on port 9 (discard) locally.
    let provider = Arc::new(SupabaseAuthProvider::new(
        "http://127.0.0.1:9",
        "anon",
        Some(stored_session(3600)),
    ));
    let gate = SessionGate::mount(provider);
    assert_eq!(gate.resolve().await.route(), Some(EntryRoute::SignUp));
}

#[tokio::test]
async fn test_expired_session_is_refreshed() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 200).await;

    let provider = provider(&server, Some(stored_session(-10)));
    let gate = SessionGate::mount(provider.clone());

    assert_eq!(gate.resolve().await.route(), Some(EntryRoute::Home));
    let stored = provider.stored_session().await.unwrap();
    assert_eq!(stored.access_token, "access-2");
    assert_eq!(stored.refresh_token, "refresh-2");
    assert!(!stored.is_expired());
}

#[tokio::test]
async fn test_rejected_refresh_token_clears_session() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 400).await;

    let provider = provider(&server, Some(stored_session(-10)));
    assert_eq!(provider.refresh_session().await.unwrap(), None);
    assert_eq!(provider.stored_session().await, None);
}

#[tokio::test]
async fn test_refresh_if_expiring_respects_margin() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 200).await;

    // 100s left: outside a 30s margin, inside a 300s one.
    let provider = provider(&server, Some(stored_session(100)));

    let kept = provider
        .refresh_if_expiring(Duration::from_secs(30))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.access_token, "access-1");

    let refreshed = provider
        .refresh_if_expiring(Duration::from_secs(300))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refreshed.access_token, "access-2");
}

fn session_file_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("bazaar-gate-{}-{}", std::process::id(), name))
        .join("session.json")
}

async fn write_session_file(path: &std::path::Path, contents: &[u8]) {
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await.unwrap();
    }
    tokio::fs::write(path, contents).await.unwrap();
}

async fn remove_session_dir(path: &std::path::Path) {
    if let Some(dir) = path.parent() {
        tokio::fs::remove_dir_all(dir).await.ok();
    }
}

#[tokio::test]
async fn test_corrupt_session_file_routes_to_sign_up() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let path = session_file_path("corrupt");
    write_session_file(&path, b"{not json").await;

    let provider = Arc::new(
        SupabaseAuthProvider::new(&server.uri(), "anon", None).with_session_file(&path),
    );
    let gate = SessionGate::mount(provider);
    let state = gate.resolve().await;

    assert_eq!(state, GateState::Unauthenticated);
    assert_eq!(state.route(), Some(EntryRoute::SignUp));
    remove_session_dir(&path).await;
}

#[tokio::test]
async fn test_session_file_is_read_on_first_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-1",
            "email": "reader@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let path = session_file_path("valid");
    let contents = serde_json::to_vec(&stored_session(3600)).unwrap();
    write_session_file(&path, &contents).await;

    let provider = Arc::new(
        SupabaseAuthProvider::new(&server.uri(), "anon", None).with_session_file(&path),
    );
    let gate = SessionGate::mount(provider.clone());

    assert_eq!(gate.resolve().await.route(), Some(EntryRoute::Home));
    assert_eq!(
        provider.stored_session().await.map(|s| s.access_token),
        Some("access-1".to_string())
    );
    remove_session_dir(&path).await;
}

#[tokio::test]
async fn test_missing_session_file_routes_to_sign_up() {
    let server = MockServer::start().await;
    let path = session_file_path("missing");

    let provider = Arc::new(
        SupabaseAuthProvider::new(&server.uri(), "anon", None).with_session_file(&path),
    );
    let gate = SessionGate::mount(provider);

    assert_eq!(gate.resolve().await.route(), Some(EntryRoute::SignUp));
}
