use thiserror::Error;

use crate::credential::CredentialError;
use crate::session::SessionError;
use crate::utils::UtilError;

#[derive(Debug, Error, Clone)]
pub enum OAuth2Error {
    #[error("Missing return URL: pass a returnTo query parameter or a Referer header")]
    MissingReturnTo,

    #[error("No authorization code provided")]
    MissingAuthorizationCode,

    #[error("No login attempt pending for this session")]
    MissingPendingReturn,

    #[error("Not authorized")]
    Unauthorized,

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Token refresh failed: {0}")]
    TokenRefresh(String),

    #[error("Fetch user info error: {0}")]
    FetchUserInfo(String),

    #[error("Token revocation failed: {0}")]
    Revocation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serde error: {0}")]
    Serde(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),

    /// Error from session operations
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Error from credential store operations
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),
}
