use serde::{Deserialize, Serialize};

/// JSON envelope every cache entry is stored as.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub(crate) struct CacheData {
    pub(crate) value: String,
}
