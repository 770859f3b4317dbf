use serde::{Deserialize, Serialize};

/// Provider token endpoint response, for both the authorization-code exchange
/// and the refresh grant (the latter usually omits `refresh_token`).
#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub(super) access_token: String,
    pub(super) expires_in: i64,
    #[serde(default)]
    pub(super) refresh_token: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    pub(super) scope: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    pub(super) token_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserInfoResponse {
    pub(super) email: String,
}

/// Projection returned by the status endpoint. Never exposes tokens.
#[derive(Debug, PartialEq, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub email: Option<String>,
}
