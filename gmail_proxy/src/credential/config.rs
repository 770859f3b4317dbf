use std::env;
use std::sync::LazyLock;

/// Where the stored credential lives: one per process (single-user dev tool)
/// or one per browser session.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScopeMode {
    Process,
    Session,
}

pub(super) static CREDENTIAL_SCOPE_MODE: LazyLock<ScopeMode> = LazyLock::new(|| {
    match env::var("CREDENTIAL_SCOPE").as_deref() {
        Ok("process") | Err(_) => ScopeMode::Process,
        Ok("session") => ScopeMode::Session,
        Ok(other) => {
            panic!("Unsupported CREDENTIAL_SCOPE: {other}. Supported values are 'process' and 'session'")
        }
    }
});
