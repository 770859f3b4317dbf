//! Handlers for the login / callback / status / logout flow.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::REFERER},
    response::Redirect,
    routing::{get, post},
};
use serde_json::{Value, json};

use gmail_proxy::{
    AuthStatus, ScopeMode, auth_status, clear_session_cookie_headers, ensure_session,
    get_session_id_from_headers, handle_callback, logout, prepare_auth_request,
};

use super::AppState;
use super::error::IntoResponseError;

pub fn auth_router(state: AppState) -> Router {
    Router::new()
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/status", get(status))
        .route("/logout", post(logout_handler))
        .with_state(state)
}

/// GET /login?returnTo=... — kick off the authorization flow.
async fn login(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<(HeaderMap, Redirect), (StatusCode, String)> {
    let (session_id, cookie_headers) = ensure_session(&headers).into_response_error()?;

    let referer = headers.get(REFERER).and_then(|value| value.to_str().ok());
    let auth_url = prepare_auth_request(
        params.get("returnTo").map(String::as_str),
        referer,
        &session_id,
    )
    .await
    .into_response_error()?;

    Ok((cookie_headers, Redirect::to(&auth_url)))
}

/// GET /callback?code=... — provider redirect target.
async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Redirect, (StatusCode, String)> {
    let session_id = get_session_id_from_headers(&headers).into_response_error()?;

    let return_url = handle_callback(
        params.get("code").map(String::as_str),
        session_id.as_deref(),
        &state.credentials,
    )
    .await
    .into_response_error()?;

    Ok(Redirect::to(&return_url))
}

/// GET /status — authentication state for the frontend.
async fn status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AuthStatus>, (StatusCode, String)> {
    let session_id = get_session_id_from_headers(&headers).into_response_error()?;
    let status = auth_status(&state.credentials, session_id.as_deref())
        .await
        .into_response_error()?;
    Ok(Json(status))
}

/// POST /logout — clear the credential; always succeeds once it is gone.
async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(HeaderMap, Json<Value>), (StatusCode, String)> {
    let session_id = get_session_id_from_headers(&headers).into_response_error()?;

    logout(&state.credentials, session_id.as_deref())
        .await
        .into_response_error()?;

    // Session-scoped credentials die with their session, so drop the cookie too
    let response_headers = if state.credentials.mode() == ScopeMode::Session
        && session_id.is_some()
    {
        clear_session_cookie_headers().into_response_error()?
    } else {
        HeaderMap::new()
    };

    Ok((response_headers, Json(json!({"success": true}))))
}
