//! Axum bindings for the gmail-proxy core: the auth flow router, the gated
//! Gmail proxy router, and the error-to-status mapping between them.

mod auth;
mod error;
mod gmail;

pub use auth::auth_router;
pub use gmail::gmail_router;

use gmail_proxy::CredentialStore;

/// Shared handler state. The credential store is the only dependency the
/// handlers need; everything else is configuration read by the core.
#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialStore,
}

impl AppState {
    pub fn new(credentials: CredentialStore) -> Self {
        Self { credentials }
    }

    pub fn from_env() -> Self {
        Self::new(CredentialStore::from_env())
    }
}
