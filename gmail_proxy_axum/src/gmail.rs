//! Gated proxy handlers for the Gmail read endpoints.

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;

use gmail_proxy::{
    GmailError, ListParams, OAuth2Error, ensure_authenticated, get_message,
    get_session_id_from_headers, list_messages,
};

use super::AppState;

/// Access token resolved by the gate, handed to handlers via extensions.
#[derive(Clone)]
struct AccessToken(String);

pub fn gmail_router(state: AppState) -> Router {
    Router::new()
        .route("/messages", get(list_messages_handler))
        .route("/messages/{id}", get(get_message_handler))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

/// Reject requests without a usable credential before they reach a handler.
///
/// An expired credential with a refresh token gets exactly one refresh here;
/// failure to refresh reads as not authorized. The resolved access token is
/// inserted into the request's extensions.
async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session_id = get_session_id_from_headers(request.headers())
        .ok()
        .flatten();

    let Some(scope) = state.credentials.scope_for(session_id.as_deref()) else {
        return unauthorized();
    };

    match ensure_authenticated(&state.credentials, &scope).await {
        Ok(credential) => {
            request
                .extensions_mut()
                .insert(AccessToken(credential.access_token));
            next.run(request).await
        }
        Err(OAuth2Error::Unauthorized) => unauthorized(),
        Err(e) => {
            tracing::error!("Authentication gate failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Not authorized"})),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    q: Option<String>,
    #[serde(rename = "maxResults")]
    max_results: Option<u32>,
    #[serde(rename = "pageToken")]
    page_token: Option<String>,
    expand: Option<String>,
}

/// GET /messages — list, optionally expanded with per-message metadata.
async fn list_messages_handler(
    Extension(token): Extension<AccessToken>,
    Query(query): Query<ListQuery>,
) -> Response {
    let params = ListParams {
        q: query.q,
        max_results: query.max_results,
        page_token: query.page_token,
        // Anything but an explicit "false" opts in
        expand: query.expand.as_deref() != Some("false"),
    };

    match list_messages(&token.0, &params).await {
        Ok(value) => Json(value).into_response(),
        Err(e) => gmail_error_response(e),
    }
}

#[derive(Debug, Deserialize)]
struct GetQuery {
    format: Option<String>,
}

/// GET /messages/{id} — single message pass-through.
async fn get_message_handler(
    Extension(token): Extension<AccessToken>,
    Path(id): Path<String>,
    Query(query): Query<GetQuery>,
) -> Response {
    match get_message(&token.0, &id, query.format.as_deref()).await {
        Ok(value) => Json(value).into_response(),
        Err(e) => gmail_error_response(e),
    }
}

/// Answer with the upstream status when there is one, 500 otherwise, and the
/// error detail under an "error" key either way.
fn gmail_error_response(e: GmailError) -> Response {
    let status =
        StatusCode::from_u16(e.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({"error": e.error_body()}))).into_response()
}
