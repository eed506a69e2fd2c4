use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Value, json};

use sustindex_api::ApiClient;
use sustindex_auth::credentials::{CredentialStore, StoredCredential};
use sustindex_auth::error::AuthError;
use sustindex_auth::{AuthGate, Session, SessionState};
use sustindex_core::models::user::{ProfileUpdate, Registration};

fn jwt(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(json!({"token_type": "access", "exp": exp, "user_id": 3}).to_string());
    format!("{header}.{body}.sig")
}

fn fresh_token() -> String {
    jwt(jiff::Timestamp::now().as_second() + 3600)
}

fn stale_token() -> String {
    jwt(jiff::Timestamp::now().as_second() - 3600)
}

#[derive(Clone)]
struct Backend {
    valid_access: String,
    refresh_calls: Arc<Mutex<usize>>,
    registered: Arc<Mutex<Vec<Value>>>,
}

fn user(first_name: &str) -> Value {
    json!({
        "id": 3,
        "username": "greenco",
        "email": "ops@greenco.example",
        "first_name": first_name,
        "last_name": "",
        "membership_type": "free",
        "company_name": "GreenCo",
        "phone": ""
    })
}

async fn token(State(b): State<Backend>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["password"] == "correct-horse" {
        (
            StatusCode::OK,
            Json(json!({"access": b.valid_access, "refresh": "good-refresh"})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "No active account found with the given credentials"})),
        )
    }
}

async fn refresh(State(b): State<Backend>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    *b.refresh_calls.lock().unwrap() += 1;
    if body["refresh"] == "good-refresh" {
        (StatusCode::OK, Json(json!({"access": b.valid_access})))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Token is invalid or expired"})),
        )
    }
}

async fn me(State(b): State<Backend>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let expected = format!("Bearer {}", b.valid_access);
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(h) if h == expected => (StatusCode::OK, Json(user("Ada"))),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Given token not valid for any token type"})),
        ),
    }
}

async fn register(State(b): State<Backend>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    b.registered.lock().unwrap().push(body);
    (StatusCode::CREATED, Json(user("Ada")))
}

async fn update(Json(body): Json<Value>) -> Json<Value> {
    Json(user(body["first_name"].as_str().unwrap_or("Ada")))
}

async fn spawn_backend() -> (ApiClient, Backend) {
    let backend = Backend {
        valid_access: fresh_token(),
        refresh_calls: Arc::new(Mutex::new(0)),
        registered: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/api/auth/token/", post(token))
        .route("/api/auth/token/refresh/", post(refresh))
        .route("/api/users/me/", get(me))
        .route("/api/users/register/", post(register))
        .route("/api/users/{id}/", patch(update))
        .with_state(backend.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (ApiClient::new(&format!("http://{addr}/api/")).unwrap(), backend)
}

#[tokio::test]
async fn loading_is_distinct_from_anonymous() {
    let (client, _) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(client, CredentialStore::new(dir.path()));

    assert!(session.is_loading());
    assert_eq!(session.gate(), AuthGate::Pending);

    session.initialize().await;
    assert_eq!(session.state(), &SessionState::Anonymous);
    assert_eq!(session.gate(), AuthGate::RedirectToLogin);
}

#[tokio::test]
async fn login_persists_and_next_run_restores() {
    let (client, backend) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::new(dir.path());

    let mut session = Session::new(client.clone(), store.clone());
    session.initialize().await;
    let user = session.login("greenco", "correct-horse").await.unwrap();
    assert_eq!(user.username, "greenco");

    let stored = store.load().unwrap().unwrap();
    assert_eq!(stored.access, backend.valid_access);
    assert_eq!(stored.username.as_deref(), Some("greenco"));

    let mut next_run = Session::new(client, store);
    next_run.initialize().await;
    match next_run.gate() {
        AuthGate::Allowed(user) => assert_eq!(user.first_name, "Ada"),
        other => panic!("expected restored session, got {other:?}"),
    }
    assert_eq!(*backend.refresh_calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn wrong_password_stays_anonymous() {
    let (client, _) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::new(dir.path());
    let mut session = Session::new(client, store.clone());
    session.initialize().await;

    let err = session.login("greenco", "nope").await.unwrap_err();
    assert!(matches!(err, AuthError::AuthFailed(_)));
    assert!(session.current_user().is_none());
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn expired_access_token_is_refreshed_once() {
    let (client, backend) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::new(dir.path());
    store
        .save(&StoredCredential {
            access: stale_token(),
            refresh: "good-refresh".to_string(),
            username: Some("greenco".to_string()),
            saved_at: jiff::Timestamp::now(),
        })
        .unwrap();

    let mut session = Session::new(client, store.clone());
    session.initialize().await;

    assert!(session.current_user().is_some());
    assert_eq!(*backend.refresh_calls.lock().unwrap(), 1);
    let stored = store.load().unwrap().unwrap();
    assert_eq!(stored.access, backend.valid_access);
    assert_eq!(stored.refresh, "good-refresh");
}

#[tokio::test]
async fn rejected_refresh_clears_the_credential() {
    let (client, _) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::new(dir.path());
    store
        .save(&StoredCredential {
            access: stale_token(),
            refresh: "revoked".to_string(),
            username: None,
            saved_at: jiff::Timestamp::now(),
        })
        .unwrap();

    let mut session = Session::new(client, store.clone());
    assert_eq!(session.initialize().await, &SessionState::Anonymous);
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn unreachable_backend_keeps_the_credential() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = ApiClient::new(&format!("http://{addr}/api/")).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::new(dir.path());
    let saved = StoredCredential {
        access: stale_token(),
        refresh: "good-refresh".to_string(),
        username: Some("greenco".to_string()),
        saved_at: jiff::Timestamp::now(),
    };
    store.save(&saved).unwrap();

    let mut session = Session::new(client, store.clone());
    assert_eq!(session.initialize().await, &SessionState::Anonymous);
    assert_eq!(store.load().unwrap(), Some(saved));
}

#[tokio::test]
async fn logout_clears_identity_and_store() {
    let (client, _) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::new(dir.path());
    let mut session = Session::new(client, store.clone());
    session.login("greenco", "correct-horse").await.unwrap();
    assert!(session.client().token().is_some());

    session.logout().unwrap();
    assert_eq!(session.gate(), AuthGate::RedirectToLogin);
    assert!(session.client().token().is_none());
    assert!(!store.path().exists());
}

#[tokio::test]
async fn register_validates_before_calling_backend() {
    let (client, backend) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(client, CredentialStore::new(dir.path()));

    let mut form = Registration {
        username: "greenco".to_string(),
        email: "ops@greenco.example".to_string(),
        password: "correct-horse".to_string(),
        password_confirm: "correct-hose".to_string(),
        ..Default::default()
    };
    let err = session.register(&form).await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
    assert!(backend.registered.lock().unwrap().is_empty());

    form.password_confirm = form.password.clone();
    let user = session.register(&form).await.unwrap();
    assert_eq!(user.username, "greenco");
    assert_eq!(backend.registered.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn profile_update_replaces_held_user() {
    let (client, _) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(client, CredentialStore::new(dir.path()));

    let update = ProfileUpdate {
        first_name: Some("Deniz".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        session.update_profile(&update).await,
        Err(AuthError::NotLoggedIn)
    ));

    session.login("greenco", "correct-horse").await.unwrap();
    let user = session.update_profile(&update).await.unwrap();
    assert_eq!(user.first_name, "Deniz");
    assert_eq!(session.current_user().unwrap().first_name, "Deniz");
}
