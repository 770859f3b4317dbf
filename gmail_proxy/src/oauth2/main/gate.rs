//! Authentication gate in front of the proxied API calls.

use chrono::{DateTime, Duration, Utc};

use crate::credential::{Credential, CredentialScope, CredentialStore};
use crate::oauth2::errors::OAuth2Error;

use super::google::refresh_access_token;

#[derive(Debug, Eq, PartialEq)]
pub(super) enum GateDecision {
    /// Credential is usable as-is. Also chosen for an expired credential with
    /// no refresh token: the stale token goes through and the upstream API's
    /// rejection is what the caller sees.
    Proceed,
    /// Credential expired and a refresh token is available.
    Refresh { refresh_token: String },
    /// No usable credential at all.
    Unauthorized,
}

pub(super) fn evaluate_credential(
    credential: Option<&Credential>,
    now: DateTime<Utc>,
) -> GateDecision {
    match credential {
        None => GateDecision::Unauthorized,
        Some(credential) if credential.access_token.is_empty() => GateDecision::Unauthorized,
        Some(credential) if credential.is_expired(now) => match &credential.refresh_token {
            Some(refresh_token) => GateDecision::Refresh {
                refresh_token: refresh_token.clone(),
            },
            None => GateDecision::Proceed,
        },
        Some(_) => GateDecision::Proceed,
    }
}

/// Resolve a usable credential for a request, refreshing it if needed.
///
/// At most one refresh is performed per call. On success the new access token
/// and expiry are written back in place; the refresh token and user email are
/// untouched. A failed refresh leaves the stored credential as it was and the
/// caller gets `Unauthorized`, so a later login can simply overwrite it.
pub async fn ensure_authenticated(
    store: &CredentialStore,
    scope: &CredentialScope,
) -> Result<Credential, OAuth2Error> {
    let Some(mut credential) = store.get(scope).await? else {
        return Err(OAuth2Error::Unauthorized);
    };

    match evaluate_credential(Some(&credential), Utc::now()) {
        GateDecision::Unauthorized => Err(OAuth2Error::Unauthorized),
        GateDecision::Proceed => Ok(credential),
        GateDecision::Refresh { refresh_token } => {
            tracing::debug!("Access token expired, refreshing");
            let token = refresh_access_token(&refresh_token).await.map_err(|e| {
                tracing::warn!("Token refresh failed: {e}");
                OAuth2Error::Unauthorized
            })?;

            let expires_at = Utc::now() + Duration::seconds(token.expires_in);
            store
                .update_tokens(scope, token.access_token.clone(), expires_at)
                .await?;

            credential.access_token = token.access_token;
            credential.expires_at = expires_at;
            Ok(credential)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::credential::ScopeMode;

    use super::*;

    fn credential(
        access_token: &str,
        refresh_token: Option<&str>,
        expires_at: DateTime<Utc>,
    ) -> Credential {
        Credential {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.map(str::to_string),
            expires_at,
            user_email: None,
        }
    }

    #[test]
    fn test_no_credential_is_unauthorized() {
        assert_eq!(
            evaluate_credential(None, Utc::now()),
            GateDecision::Unauthorized
        );
    }

    #[test]
    fn test_empty_access_token_is_unauthorized() {
        let now = Utc::now();
        let cred = credential("", Some("rt"), now + Duration::hours(1));
        assert_eq!(
            evaluate_credential(Some(&cred), now),
            GateDecision::Unauthorized
        );
    }

    #[test]
    fn test_valid_credential_proceeds() {
        let now = Utc::now();
        let cred = credential("at", Some("rt"), now + Duration::hours(1));
        assert_eq!(evaluate_credential(Some(&cred), now), GateDecision::Proceed);
    }

    #[test]
    fn test_expired_with_refresh_token_refreshes() {
        let now = Utc::now();
        let cred = credential("at", Some("rt"), now - Duration::minutes(5));
        assert_eq!(
            evaluate_credential(Some(&cred), now),
            GateDecision::Refresh {
                refresh_token: "rt".to_string()
            }
        );
    }

    #[test]
    fn test_expired_without_refresh_token_proceeds_with_stale_token() {
        let now = Utc::now();
        let cred = credential("at", None, now - Duration::minutes(5));
        assert_eq!(evaluate_credential(Some(&cred), now), GateDecision::Proceed);
    }

    #[test]
    fn test_exactly_expired_counts_as_expired() {
        let now = Utc::now();
        let cred = credential("at", Some("rt"), now);
        assert!(matches!(
            evaluate_credential(Some(&cred), now),
            GateDecision::Refresh { .. }
        ));
    }

    #[tokio::test]
    async fn test_ensure_authenticated_without_credential() {
        let store = CredentialStore::new(ScopeMode::Session);
        let scope = CredentialScope::Session("gate-test-none".to_string());

        let result = ensure_authenticated(&store, &scope).await;
        assert!(matches!(result, Err(OAuth2Error::Unauthorized)));
    }

    #[tokio::test]
    async fn test_ensure_authenticated_with_valid_credential() {
        let store = CredentialStore::new(ScopeMode::Session);
        let scope = CredentialScope::Session("gate-test-valid".to_string());

        let cred = credential("at", Some("rt"), Utc::now() + Duration::hours(1));
        store.put(&scope, cred).await.unwrap();

        let result = ensure_authenticated(&store, &scope).await.unwrap();
        assert_eq!(result.access_token, "at");

        store.clear(&scope).await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_authenticated_expired_no_refresh_returns_stale() {
        let store = CredentialStore::new(ScopeMode::Session);
        let scope = CredentialScope::Session("gate-test-stale".to_string());

        let cred = credential("stale", None, Utc::now() - Duration::minutes(5));
        store.put(&scope, cred).await.unwrap();

        let result = ensure_authenticated(&store, &scope).await.unwrap();
        assert_eq!(result.access_token, "stale");

        store.clear(&scope).await.unwrap();
    }
}
