use chrono::{DateTime, Utc};

use crate::storage::GENERIC_CACHE_STORE;

use super::config::{CREDENTIAL_SCOPE_MODE, ScopeMode};
use super::errors::CredentialError;
use super::types::{Credential, CredentialScope};

const CREDENTIAL_CACHE_PREFIX: &str = "credential";

/// Owned handle to the stored credential.
///
/// Cheap to clone; every method resolves against the shared cache store, so
/// clones observe each other's writes. The scope mode decides whether all
/// requests share one credential or each browser session has its own.
#[derive(Clone, Debug)]
pub struct CredentialStore {
    mode: ScopeMode,
}

impl CredentialStore {
    pub fn new(mode: ScopeMode) -> Self {
        Self { mode }
    }

    /// Build a store with the scope mode taken from `CREDENTIAL_SCOPE`.
    pub fn from_env() -> Self {
        Self::new(*CREDENTIAL_SCOPE_MODE)
    }

    pub fn mode(&self) -> ScopeMode {
        self.mode
    }

    /// Resolve the scope a request's credential lives in.
    ///
    /// Session mode without a session id has no scope: such a request can
    /// never see a credential.
    pub fn scope_for(&self, session_id: Option<&str>) -> Option<CredentialScope> {
        match self.mode {
            ScopeMode::Process => Some(CredentialScope::Process),
            ScopeMode::Session => {
                session_id.map(|session_id| CredentialScope::Session(session_id.to_string()))
            }
        }
    }

    pub async fn get(
        &self,
        scope: &CredentialScope,
    ) -> Result<Option<Credential>, CredentialError> {
        let data = GENERIC_CACHE_STORE
            .lock()
            .await
            .get(CREDENTIAL_CACHE_PREFIX, scope.cache_key())
            .await
            .map_err(|e| CredentialError::Storage(e.to_string()))?;
        data.map(Credential::try_from).transpose()
    }

    pub async fn put(
        &self,
        scope: &CredentialScope,
        credential: Credential,
    ) -> Result<(), CredentialError> {
        GENERIC_CACHE_STORE
            .lock()
            .await
            .put(CREDENTIAL_CACHE_PREFIX, scope.cache_key(), credential.into())
            .await
            .map_err(|e| CredentialError::Storage(e.to_string()))
    }

    pub async fn clear(&self, scope: &CredentialScope) -> Result<(), CredentialError> {
        GENERIC_CACHE_STORE
            .lock()
            .await
            .remove(CREDENTIAL_CACHE_PREFIX, scope.cache_key())
            .await
            .map_err(|e| CredentialError::Storage(e.to_string()))
    }

    /// Whether the stored credential (if any) has passed its expiry.
    pub async fn is_expired(&self, scope: &CredentialScope) -> Result<bool, CredentialError> {
        Ok(self
            .get(scope)
            .await?
            .map(|credential| credential.is_expired(Utc::now()))
            .unwrap_or(false))
    }

    /// Write back a refreshed access token, leaving the refresh token and
    /// user email untouched. No-op when no credential is stored.
    pub async fn update_tokens(
        &self,
        scope: &CredentialScope,
        access_token: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), CredentialError> {
        if let Some(mut credential) = self.get(scope).await? {
            credential.access_token = access_token;
            credential.expires_at = expires_at;
            self.put(scope, credential).await?;
        }
        Ok(())
    }

    /// Record the user's email once the lookup lands. No-op when the
    /// credential was cleared in the meantime.
    pub async fn set_user_email(
        &self,
        scope: &CredentialScope,
        user_email: String,
    ) -> Result<(), CredentialError> {
        if let Some(mut credential) = self.get(scope).await? {
            credential.user_email = Some(user_email);
            self.put(scope, credential).await?;
        }
        Ok(())
    }
}
