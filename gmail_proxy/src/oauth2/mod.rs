mod config;
mod errors;
mod main;
mod types;

pub use errors::OAuth2Error;
pub use main::{
    auth_status, ensure_authenticated, handle_callback, logout, prepare_auth_request,
};
pub use types::AuthStatus;

use crate::storage;

pub(crate) async fn init() -> Result<(), OAuth2Error> {
    // Validate required environment variables early
    let _ = *config::GOOGLE_CLIENT_ID;
    let _ = *config::GOOGLE_CLIENT_SECRET;
    let _ = *config::OAUTH2_REDIRECT_URI;

    storage::init()
        .await
        .map_err(|e| OAuth2Error::Storage(e.to_string()))?;
    Ok(())
}
