//! Shared harness for the integration tests.
//!
//! One background thread runs two axum servers on fixed ports for the whole
//! test run: a mock provider + Gmail upstream, and the real proxy routers.
//! Fixed ports keep the endpoint env vars constant, which matters because
//! the library reads them through LazyLock statics exactly once.

use std::net::TcpStream;
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Form, Path, Query},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::collections::HashMap;

use gmail_proxy::{Credential, CredentialScope, CredentialStore, ScopeMode};
use gmail_proxy_axum::{AppState, auth_router, gmail_router};

const MOCK_PORT: u16 = 9917;
const APP_PORT: u16 = 9918;

pub const MOCK_BASE: &str = "http://127.0.0.1:9917";
pub const APP_BASE: &str = "http://127.0.0.1:9918";

/// Start the servers (first call only) and wait until they accept connections.
pub fn setup() {
    static SERVERS: OnceLock<()> = OnceLock::new();
    SERVERS.get_or_init(|| {
        // Before any LazyLock static is touched
        unsafe {
            std::env::set_var("GOOGLE_CLIENT_ID", "test-client-id");
            std::env::set_var("GOOGLE_CLIENT_SECRET", "test-client-secret");
            std::env::set_var(
                "OAUTH2_REDIRECT_URI",
                format!("{APP_BASE}/auth/callback"),
            );
            std::env::set_var("OAUTH2_AUTH_URL", format!("{MOCK_BASE}/authorize"));
            std::env::set_var("OAUTH2_TOKEN_URL", format!("{MOCK_BASE}/token"));
            std::env::set_var("OAUTH2_USERINFO_URL", format!("{MOCK_BASE}/userinfo"));
            std::env::set_var("OAUTH2_REVOKE_URL", format!("{MOCK_BASE}/revoke"));
            std::env::set_var("GMAIL_API_BASE", format!("{MOCK_BASE}/gmail"));
            std::env::set_var("SESSION_SECRET", "integration-test-secret");
            std::env::set_var("CREDENTIAL_SCOPE", "process");
        }

        // The servers need a runtime that outlives any single #[tokio::test]
        thread::spawn(|| {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            rt.block_on(async {
                let state = AppState::from_env();
                let app = Router::new()
                    .nest("/auth", auth_router(state.clone()))
                    .nest("/api/gmail", gmail_router(state));

                let mock_listener = tokio::net::TcpListener::bind(("127.0.0.1", MOCK_PORT))
                    .await
                    .expect("Failed to bind mock server port");
                let app_listener = tokio::net::TcpListener::bind(("127.0.0.1", APP_PORT))
                    .await
                    .expect("Failed to bind app server port");

                let _ = tokio::join!(
                    axum::serve(mock_listener, mock_router()),
                    axum::serve(app_listener, app),
                );
            });
        });

        for _ in 0..100 {
            if TcpStream::connect(("127.0.0.1", MOCK_PORT)).is_ok()
                && TcpStream::connect(("127.0.0.1", APP_PORT)).is_ok()
            {
                return;
            }
            thread::sleep(Duration::from_millis(50));
        }
        panic!("Test servers did not come up");
    });
}

/// Fresh cookie-jar client that does not follow redirects, so tests can
/// inspect Location headers.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build test client")
}

fn process_store() -> CredentialStore {
    CredentialStore::new(ScopeMode::Process)
}

/// Wipe the process-scoped credential between tests.
pub async fn reset_credentials() {
    process_store()
        .clear(&CredentialScope::Process)
        .await
        .expect("Failed to clear credential");
}

pub async fn inject_credential(credential: Credential) {
    process_store()
        .put(&CredentialScope::Process, credential)
        .await
        .expect("Failed to inject credential");
}

pub async fn stored_credential() -> Option<Credential> {
    process_store()
        .get(&CredentialScope::Process)
        .await
        .expect("Failed to read credential")
}

/// Run the login + callback round trip with the mock provider's good code.
pub async fn login(client: &reqwest::Client, return_to: &str) -> reqwest::Response {
    let login_response = client
        .get(format!("{APP_BASE}/auth/login"))
        .query(&[("returnTo", return_to)])
        .send()
        .await
        .expect("login request failed");
    assert!(login_response.status().is_redirection());

    client
        .get(format!("{APP_BASE}/auth/callback"))
        .query(&[("code", "good-code")])
        .send()
        .await
        .expect("callback request failed")
}

// ---- mock provider + Gmail upstream ----

fn mock_router() -> Router {
    Router::new()
        .route("/token", post(token_endpoint))
        .route("/userinfo", get(userinfo_endpoint))
        .route("/revoke", post(revoke_endpoint))
        .route("/gmail/users/me/messages", get(gmail_list_endpoint))
        .route("/gmail/users/me/messages/{id}", get(gmail_get_endpoint))
}

async fn token_endpoint(Form(params): Form<HashMap<String, String>>) -> impl IntoResponse {
    match params.get("grant_type").map(String::as_str) {
        Some("authorization_code") if params.get("code").map(String::as_str) == Some("good-code") => (
            StatusCode::OK,
            Json(json!({
                "access_token": "access-1",
                "expires_in": 3600,
                "refresh_token": "refresh-1",
                "scope": "https://www.googleapis.com/auth/gmail.readonly",
                "token_type": "Bearer"
            })),
        ),
        Some("refresh_token")
            if params.get("refresh_token").map(String::as_str) == Some("refresh-1") =>
        {
            (
                StatusCode::OK,
                Json(json!({
                    "access_token": "access-2",
                    "expires_in": 3600,
                    "scope": "https://www.googleapis.com/auth/gmail.readonly",
                    "token_type": "Bearer"
                })),
            )
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_grant"})),
        ),
    }
}

async fn userinfo_endpoint(headers: HeaderMap) -> impl IntoResponse {
    if !has_valid_bearer(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid_token"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"id": "123", "email": "user@example.com", "verified_email": true})),
    )
}

/// Always fails: logout must succeed regardless.
async fn revoke_endpoint() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "revocation_unavailable"})),
    )
}

fn has_valid_bearer(headers: &HeaderMap) -> bool {
    matches!(
        headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
        Some("Bearer access-1") | Some("Bearer access-2")
    )
}

fn gmail_unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": {"code": 401, "message": "Invalid Credentials"}})),
    )
}

/// The fixed upstream list payload the raw pass-through tests compare against.
pub fn raw_list_payload() -> Value {
    json!({
        "messages": [
            {"id": "m1", "threadId": "t1", "snippet": "list snippet 1"},
            {"id": "m2", "threadId": "t2", "snippet": "list snippet 2"}
        ],
        "resultSizeEstimate": 2
    })
}

async fn gmail_list_endpoint(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !has_valid_bearer(&headers) {
        return gmail_unauthorized();
    }
    (StatusCode::OK, Json(raw_list_payload()))
}

/// The fixed upstream message payload for format=full requests.
pub fn full_message_payload() -> Value {
    json!({
        "id": "m1",
        "threadId": "t1",
        "snippet": "full snippet",
        "payload": {"headers": [{"name": "From", "value": "a@x.com"}]},
        "sizeEstimate": 2048
    })
}

async fn gmail_get_endpoint(
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if !has_valid_bearer(&headers) {
        return gmail_unauthorized();
    }

    if params.get("format").map(String::as_str) == Some("metadata") {
        return match id.as_str() {
            "m1" => (
                StatusCode::OK,
                Json(json!({
                    "id": "m1",
                    "threadId": "t1",
                    "snippet": "detail snippet 1",
                    "payload": {"headers": [
                        {"name": "From", "value": "a@x.com"},
                        {"name": "Subject", "value": "Hi"},
                        {"name": "Date", "value": "Mon, 1 Jan 2024 00:00:00 +0000"}
                    ]}
                })),
            ),
            "m2" => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": {"code": 500, "message": "metadata boom"}})),
            ),
            _ => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": {"code": 404, "message": "Not Found"}})),
            ),
        };
    }

    match id.as_str() {
        "m1" => (StatusCode::OK, Json(full_message_payload())),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"code": 404, "message": "Not Found"}})),
        ),
    }
}
