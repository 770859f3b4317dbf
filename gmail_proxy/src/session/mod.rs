mod config;
mod errors;
mod main;

pub use errors::SessionError;
pub use main::{clear_session_cookie_headers, ensure_session, get_session_id_from_headers};
