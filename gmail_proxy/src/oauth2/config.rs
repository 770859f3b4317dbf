use std::env;
use std::sync::LazyLock;

use crate::config::AUTH_ROUTE_PREFIX;

pub(super) static GOOGLE_CLIENT_ID: LazyLock<String> =
    LazyLock::new(|| env::var("GOOGLE_CLIENT_ID").expect("GOOGLE_CLIENT_ID must be set"));

pub(super) static GOOGLE_CLIENT_SECRET: LazyLock<String> =
    LazyLock::new(|| env::var("GOOGLE_CLIENT_SECRET").expect("GOOGLE_CLIENT_SECRET must be set"));

/// Redirect URI registered with the provider. Derived from ORIGIN unless set
/// explicitly.
pub(super) static OAUTH2_REDIRECT_URI: LazyLock<String> = LazyLock::new(|| {
    env::var("OAUTH2_REDIRECT_URI").unwrap_or_else(|_| {
        let origin =
            env::var("ORIGIN").expect("Either OAUTH2_REDIRECT_URI or ORIGIN must be set");
        format!("{origin}{}/callback", AUTH_ROUTE_PREFIX.as_str())
    })
});

// Provider endpoints default to Google's; overridable for tests.
pub(super) static OAUTH2_AUTH_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("OAUTH2_AUTH_URL")
        .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/v2/auth".to_string())
});

pub(super) static OAUTH2_TOKEN_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("OAUTH2_TOKEN_URL").unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string())
});

pub(super) static OAUTH2_USERINFO_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("OAUTH2_USERINFO_URL")
        .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v2/userinfo".to_string())
});

pub(super) static OAUTH2_REVOKE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("OAUTH2_REVOKE_URL")
        .unwrap_or_else(|_| "https://oauth2.googleapis.com/revoke".to_string())
});

pub(super) static OAUTH2_SCOPE: LazyLock<String> = LazyLock::new(|| {
    env::var("OAUTH2_SCOPE").unwrap_or_else(|_| {
        "https://www.googleapis.com/auth/gmail.readonly \
         https://www.googleapis.com/auth/userinfo.email"
            .to_string()
    })
});

/// Seconds a pending return URL stays valid for between /login and /callback.
pub(super) static PENDING_RETURN_TTL: LazyLock<usize> = LazyLock::new(|| {
    env::var("OAUTH2_PENDING_RETURN_TTL")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(600)
});
