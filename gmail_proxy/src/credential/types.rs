use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::CacheData;

use super::errors::CredentialError;

/// The single user's provider tokens.
///
/// `expires_at` is fixed once when the token response is received
/// (`now + expires_in`); a refresh replaces it together with the access
/// token. `user_email` is filled in after the fact by a best-effort lookup
/// and stays `None` if that lookup fails.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub user_email: Option<String>,
}

impl Credential {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl From<Credential> for CacheData {
    fn from(credential: Credential) -> Self {
        Self {
            value: serde_json::to_string(&credential).expect("Failed to serialize credential"),
        }
    }
}

impl TryFrom<CacheData> for Credential {
    type Error = CredentialError;

    fn try_from(data: CacheData) -> Result<Self, Self::Error> {
        serde_json::from_str(&data.value).map_err(|e| CredentialError::Serde(e.to_string()))
    }
}

/// Identifies which credential a request operates on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CredentialScope {
    /// The one process-wide credential.
    Process,
    /// The credential tied to a browser session.
    Session(String),
}

impl CredentialScope {
    pub(crate) fn cache_key(&self) -> &str {
        match self {
            Self::Process => "process",
            Self::Session(session_id) => session_id.as_str(),
        }
    }
}
