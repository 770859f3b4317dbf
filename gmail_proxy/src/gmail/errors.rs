use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum GmailError {
    /// The Gmail API answered with a non-success status.
    #[error("Gmail API error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Request error: {0}")]
    Http(String),

    #[error("Serde error: {0}")]
    Serde(String),
}

impl GmailError {
    /// HTTP status to answer the proxied request with.
    pub fn status(&self) -> u16 {
        match self {
            Self::Upstream { status, .. } => *status,
            _ => 500,
        }
    }

    /// Error detail for the response body: the upstream JSON error when it
    /// parses, otherwise the error text.
    pub fn error_body(&self) -> Value {
        match self {
            Self::Upstream { body, .. } => {
                serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.clone()))
            }
            other => Value::String(other.to_string()),
        }
    }

    pub(super) fn from_transport(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}
