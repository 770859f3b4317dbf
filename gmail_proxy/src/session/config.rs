use std::env;
use std::sync::LazyLock;

use crate::utils::gen_random_string;

pub(super) static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "__ProxySessionId".to_string())
});

pub(super) static SESSION_COOKIE_MAX_AGE: LazyLock<i64> = LazyLock::new(|| {
    env::var("SESSION_COOKIE_MAX_AGE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(86400) // 24 hours
});

/// Key the session-id cookie is signed with. Without SESSION_SECRET a random
/// per-process key is used, so sessions do not survive a restart.
pub(super) static SESSION_SECRET: LazyLock<Vec<u8>> = LazyLock::new(|| {
    env::var("SESSION_SECRET")
        .map(String::into_bytes)
        .unwrap_or_else(|_| {
            tracing::warn!("SESSION_SECRET not set, using a process-local random secret");
            gen_random_string(32)
                .expect("Failed to generate session secret")
                .into_bytes()
        })
});
