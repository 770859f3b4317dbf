use std::{env, sync::LazyLock};
use tokio::sync::Mutex;

use super::types::{CacheStore, InMemoryCacheStore, RedisCacheStore};

static CACHE_STORE_TYPE: LazyLock<String> = LazyLock::new(|| {
    env::var("GMAIL_PROXY_CACHE_STORE").unwrap_or_else(|_| "memory".to_string())
});

static CACHE_STORE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("GMAIL_PROXY_CACHE_STORE_URL").unwrap_or_default()
});

pub(crate) static GENERIC_CACHE_STORE: LazyLock<Mutex<Box<dyn CacheStore>>> =
    LazyLock::new(|| {
        let store_type = CACHE_STORE_TYPE.as_str();

        tracing::info!("Initializing cache store with type: {}", store_type);

        let store: Box<dyn CacheStore> = match store_type {
            "memory" => Box::new(InMemoryCacheStore::new()),
            "redis" => {
                let store_url = CACHE_STORE_URL.as_str();
                if store_url.is_empty() {
                    panic!("GMAIL_PROXY_CACHE_STORE_URL must be set when using the redis store");
                }
                let client = match redis::Client::open(store_url) {
                    Ok(client) => client,
                    Err(e) => {
                        tracing::error!("Failed to create Redis client: {}", e);
                        panic!("Failed to create Redis client: {e}");
                    }
                };
                Box::new(RedisCacheStore { client })
            }
            t => {
                panic!("Unsupported cache store type: {t}. Supported types are 'memory' and 'redis'")
            }
        };

        Mutex::new(store)
    });
