use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum CredentialError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serde error: {0}")]
    Serde(String),
}
