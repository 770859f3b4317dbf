use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query parameters for a message list request, passed through to the API.
#[derive(Clone, Debug, Default)]
pub struct ListParams {
    pub q: Option<String>,
    pub max_results: Option<u32>,
    pub page_token: Option<String>,
    /// Fetch From/Subject/Date metadata for every listed message.
    pub expand: bool,
}

/// The subset of the upstream list response the expansion path reads.
#[derive(Debug, Deserialize)]
pub(super) struct MessageList {
    #[serde(default)]
    pub(super) messages: Vec<MessageRef>,
    #[serde(rename = "resultSizeEstimate")]
    pub(super) result_size_estimate: Option<u64>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct MessageRef {
    pub(super) id: String,
    #[serde(rename = "threadId")]
    pub(super) thread_id: Option<String>,
    pub(super) snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MessageMetadata {
    pub(super) snippet: Option<String>,
    pub(super) payload: Option<MessagePayload>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MessagePayload {
    #[serde(default)]
    pub(super) headers: Vec<MessageHeader>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MessageHeader {
    pub(super) name: String,
    pub(super) value: String,
}

/// One item of an expanded list response: the merged metadata, or the
/// per-message error when its metadata fetch failed (the list call itself
/// still succeeds).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(super) enum MessageSummary {
    Expanded {
        id: String,
        #[serde(rename = "threadId")]
        thread_id: Option<String>,
        snippet: Option<String>,
        from: Option<String>,
        subject: Option<String>,
        date: Option<String>,
    },
    Failed {
        id: String,
        error: Value,
    },
}

#[derive(Debug, Serialize)]
pub(super) struct ExpandedList {
    pub(super) messages: Vec<MessageSummary>,
    #[serde(
        rename = "resultSizeEstimate",
        skip_serializing_if = "Option::is_none"
    )]
    pub(super) result_size_estimate: Option<u64>,
}
