use std::env;
use std::sync::LazyLock;

pub(super) static GMAIL_API_BASE: LazyLock<String> = LazyLock::new(|| {
    env::var("GMAIL_API_BASE")
        .unwrap_or_else(|_| "https://gmail.googleapis.com/gmail/v1".to_string())
});

/// Cap on concurrent per-message metadata fetches during list expansion.
pub(super) static GMAIL_METADATA_CONCURRENCY: LazyLock<usize> = LazyLock::new(|| {
    env::var("GMAIL_METADATA_CONCURRENCY")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(8)
});
