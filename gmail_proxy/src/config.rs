use std::env;
use std::sync::LazyLock;

/// Route prefix the auth endpoints are nested under.
pub static AUTH_ROUTE_PREFIX: LazyLock<String> = LazyLock::new(|| {
    env::var("AUTH_ROUTE_PREFIX")
        .map(|prefix| validate_route_prefix(&prefix, "AUTH_ROUTE_PREFIX"))
        .unwrap_or_else(|_| "/auth".to_string())
});

/// Route prefix the Gmail proxy endpoints are nested under.
pub static GMAIL_ROUTE_PREFIX: LazyLock<String> = LazyLock::new(|| {
    env::var("GMAIL_ROUTE_PREFIX")
        .map(|prefix| validate_route_prefix(&prefix, "GMAIL_ROUTE_PREFIX"))
        .unwrap_or_else(|_| "/api/gmail".to_string())
});

fn validate_route_prefix(prefix: &str, var: &str) -> String {
    if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
        panic!("{var} must begin with '/' and must not end with '/', got: {prefix}");
    }
    prefix.to_string()
}
