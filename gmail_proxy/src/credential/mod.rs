mod config;
mod errors;
mod store;
mod types;

pub use config::ScopeMode;
pub use errors::CredentialError;
pub use store::CredentialStore;
pub use types::{Credential, CredentialScope};
