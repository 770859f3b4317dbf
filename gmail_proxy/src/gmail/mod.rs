mod client;
mod config;
mod errors;
mod types;

pub use client::{get_message, list_messages};
pub use errors::GmailError;
pub use types::ListParams;
