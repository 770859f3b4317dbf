//! Core library for a single-user Gmail read proxy.
//!
//! Handles the Google OAuth2 authorization-code flow for one user, keeps the
//! resulting credential in a pluggable cache store, refreshes it transparently
//! when it expires, and proxies read-only Gmail API calls with the stored
//! access token. Framework integration lives in the companion
//! `gmail-proxy-axum` crate; this crate is HTTP-framework agnostic.

mod config;
mod credential;
mod gmail;
mod oauth2;
mod session;
mod storage;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::{AUTH_ROUTE_PREFIX, GMAIL_ROUTE_PREFIX};
pub use credential::{Credential, CredentialError, CredentialScope, CredentialStore, ScopeMode};
pub use gmail::{GmailError, ListParams, get_message, list_messages};
pub use oauth2::{
    AuthStatus, OAuth2Error, auth_status, ensure_authenticated, handle_callback, logout,
    prepare_auth_request,
};
pub use session::{
    SessionError, clear_session_cookie_headers, ensure_session, get_session_id_from_headers,
};

/// Initialize the library.
///
/// Validates required environment variables and connects the cache store.
/// Call once at startup; a missing `GOOGLE_CLIENT_ID` or `GOOGLE_CLIENT_SECRET`
/// aborts the process here rather than on the first login.
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    oauth2::init().await?;
    Ok(())
}
