//! The login / callback / status / logout flow.

use chrono::{Duration, Utc};

use crate::credential::{Credential, CredentialScope, CredentialStore};
use crate::oauth2::config::{
    GOOGLE_CLIENT_ID, OAUTH2_AUTH_URL, OAUTH2_REDIRECT_URI, OAUTH2_SCOPE, PENDING_RETURN_TTL,
};
use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::AuthStatus;
use crate::storage::{CacheData, GENERIC_CACHE_STORE};

use super::google::{exchange_code_for_token, fetch_user_email, revoke_token};

const PENDING_RETURN_PREFIX: &str = "pending_return";

/// Start a login attempt.
///
/// Resolves the post-login return URL (explicit `returnTo` wins over the
/// Referer, neither is an error), records it against the session, and returns
/// the provider authorization URL to redirect the browser to.
pub async fn prepare_auth_request(
    return_to: Option<&str>,
    referer: Option<&str>,
    session_id: &str,
) -> Result<String, OAuth2Error> {
    let return_to = return_to
        .filter(|value| !value.is_empty())
        .or(referer)
        .ok_or(OAuth2Error::MissingReturnTo)?;

    GENERIC_CACHE_STORE
        .lock()
        .await
        .put_with_ttl(
            PENDING_RETURN_PREFIX,
            session_id,
            CacheData {
                value: return_to.to_string(),
            },
            *PENDING_RETURN_TTL,
        )
        .await
        .map_err(|e| OAuth2Error::Storage(e.to_string()))?;

    let auth_url = format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&scope={}\
         &access_type=offline&prompt=consent",
        OAUTH2_AUTH_URL.as_str(),
        GOOGLE_CLIENT_ID.as_str(),
        urlencoding::encode(OAUTH2_REDIRECT_URI.as_str()),
        urlencoding::encode(OAUTH2_SCOPE.as_str()),
    );

    tracing::debug!("Authorization request for return URL {return_to}");
    Ok(auth_url)
}

/// Consume the pending return URL for a session. A second take returns None.
async fn take_pending_return(session_id: &str) -> Result<Option<String>, OAuth2Error> {
    let mut cache = GENERIC_CACHE_STORE.lock().await;
    let data = cache
        .get(PENDING_RETURN_PREFIX, session_id)
        .await
        .map_err(|e| OAuth2Error::Storage(e.to_string()))?;
    if data.is_some() {
        cache
            .remove(PENDING_RETURN_PREFIX, session_id)
            .await
            .map_err(|e| OAuth2Error::Storage(e.to_string()))?;
    }
    Ok(data.map(|d| d.value))
}

/// Complete a login attempt with the authorization code from the provider.
///
/// Exchanges the code, stores the credential (expiry fixed now, at receipt),
/// kicks off the detached email lookup, consumes the pending return URL and
/// returns where to redirect the browser.
pub async fn handle_callback(
    code: Option<&str>,
    session_id: Option<&str>,
    store: &CredentialStore,
) -> Result<String, OAuth2Error> {
    let code = code
        .filter(|code| !code.is_empty())
        .ok_or(OAuth2Error::MissingAuthorizationCode)?;

    // In session scope a request without a session has nowhere to store the
    // credential, so it fails before the exchange.
    let scope = store
        .scope_for(session_id)
        .ok_or(OAuth2Error::MissingPendingReturn)?;

    let token = exchange_code_for_token(code).await?;
    let credential = Credential {
        access_token: token.access_token.clone(),
        refresh_token: token.refresh_token,
        expires_at: Utc::now() + Duration::seconds(token.expires_in),
        user_email: None,
    };
    store.put(&scope, credential).await?;
    tracing::info!("Authorization code exchanged, credential stored");

    spawn_user_email_lookup(store.clone(), scope, token.access_token);

    let return_url = match session_id {
        Some(session_id) => take_pending_return(session_id).await?,
        None => None,
    }
    .ok_or(OAuth2Error::MissingPendingReturn)?;

    Ok(format!("{return_url}?auth=success"))
}

/// Fill in the user's email in the background. The credential is already
/// usable; a failed lookup only costs the email in the status endpoint.
fn spawn_user_email_lookup(store: CredentialStore, scope: CredentialScope, access_token: String) {
    tokio::spawn(async move {
        match fetch_user_email(&access_token).await {
            Ok(email) => {
                tracing::debug!("User email lookup succeeded");
                if let Err(e) = store.set_user_email(&scope, email).await {
                    tracing::warn!("Failed to record user email: {e}");
                }
            }
            Err(e) => tracing::warn!("User email lookup failed: {e}"),
        }
    });
}

/// Report whether a usable credential is stored and for whom.
pub async fn auth_status(
    store: &CredentialStore,
    session_id: Option<&str>,
) -> Result<AuthStatus, OAuth2Error> {
    let Some(scope) = store.scope_for(session_id) else {
        return Ok(AuthStatus {
            authenticated: false,
            email: None,
        });
    };

    Ok(match store.get(&scope).await? {
        Some(credential) if !credential.access_token.is_empty() => AuthStatus {
            authenticated: true,
            email: credential.user_email,
        },
        _ => AuthStatus {
            authenticated: false,
            email: None,
        },
    })
}

/// Drop the stored credential and any half-finished login state.
///
/// Revocation at the provider is fired off detached: its failure is logged
/// and never delays or fails the logout.
pub async fn logout(
    store: &CredentialStore,
    session_id: Option<&str>,
) -> Result<(), OAuth2Error> {
    let Some(scope) = store.scope_for(session_id) else {
        return Ok(());
    };

    if let Some(credential) = store.get(&scope).await?
        && !credential.access_token.is_empty()
    {
        tokio::spawn(async move {
            if let Err(e) = revoke_token(&credential.access_token).await {
                tracing::warn!("Token revocation failed: {e}");
            }
        });
    }

    store.clear(&scope).await?;
    if let Some(session_id) = session_id {
        let _ = take_pending_return(session_id).await;
    }
    tracing::info!("Logged out, credential cleared");
    Ok(())
}
