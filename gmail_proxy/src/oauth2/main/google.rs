//! Calls against the provider's token, userinfo and revocation endpoints.

use crate::oauth2::config::{
    GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET, OAUTH2_REDIRECT_URI, OAUTH2_REVOKE_URL,
    OAUTH2_TOKEN_URL, OAUTH2_USERINFO_URL,
};
use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::{TokenResponse, UserInfoResponse};
use crate::utils::http_client;

/// Exchange an authorization code for tokens.
pub(super) async fn exchange_code_for_token(code: &str) -> Result<TokenResponse, OAuth2Error> {
    let response = http_client()
        .post(OAUTH2_TOKEN_URL.as_str())
        .form(&[
            ("code", code),
            ("client_id", GOOGLE_CLIENT_ID.as_str()),
            ("client_secret", GOOGLE_CLIENT_SECRET.as_str()),
            ("redirect_uri", OAUTH2_REDIRECT_URI.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

    if !status.is_success() {
        tracing::error!("Token exchange failed, status {status}: {body}");
        return Err(OAuth2Error::TokenExchange(format!("{status}: {body}")));
    }

    serde_json::from_str(&body).map_err(|e| OAuth2Error::TokenExchange(e.to_string()))
}

/// Trade a refresh token for a new access token.
pub(super) async fn refresh_access_token(
    refresh_token: &str,
) -> Result<TokenResponse, OAuth2Error> {
    let response = http_client()
        .post(OAUTH2_TOKEN_URL.as_str())
        .form(&[
            ("refresh_token", refresh_token),
            ("client_id", GOOGLE_CLIENT_ID.as_str()),
            ("client_secret", GOOGLE_CLIENT_SECRET.as_str()),
            ("grant_type", "refresh_token"),
        ])
        .send()
        .await
        .map_err(|e| OAuth2Error::TokenRefresh(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| OAuth2Error::TokenRefresh(e.to_string()))?;

    if !status.is_success() {
        tracing::error!("Token refresh failed, status {status}: {body}");
        return Err(OAuth2Error::TokenRefresh(format!("{status}: {body}")));
    }

    serde_json::from_str(&body).map_err(|e| OAuth2Error::TokenRefresh(e.to_string()))
}

/// Look up the account email for a freshly issued access token.
pub(super) async fn fetch_user_email(access_token: &str) -> Result<String, OAuth2Error> {
    let response = http_client()
        .get(OAUTH2_USERINFO_URL.as_str())
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| OAuth2Error::FetchUserInfo(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(OAuth2Error::FetchUserInfo(format!("{status}: {body}")));
    }

    let userinfo: UserInfoResponse = response
        .json()
        .await
        .map_err(|e| OAuth2Error::FetchUserInfo(e.to_string()))?;
    Ok(userinfo.email)
}

/// Ask the provider to revoke an access token.
pub(super) async fn revoke_token(access_token: &str) -> Result<(), OAuth2Error> {
    let response = http_client()
        .post(OAUTH2_REVOKE_URL.as_str())
        .form(&[("token", access_token)])
        .send()
        .await
        .map_err(|e| OAuth2Error::Revocation(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(OAuth2Error::Revocation(format!("{status}: {body}")));
    }
    Ok(())
}
