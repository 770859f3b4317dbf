mod core;
mod gate;
mod google;

pub use core::{auth_status, handle_callback, logout, prepare_auth_request};
pub use gate::ensure_authenticated;
