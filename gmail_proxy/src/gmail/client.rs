//! Read-only proxy calls against the Gmail API.

use std::collections::HashMap;

use futures::{StreamExt, stream};
use serde_json::Value;

use crate::utils::http_client;

use super::config::{GMAIL_API_BASE, GMAIL_METADATA_CONCURRENCY};
use super::errors::GmailError;
use super::types::{
    ExpandedList, ListParams, MessageHeader, MessageList, MessageMetadata, MessageRef,
    MessageSummary,
};

/// List the user's messages.
///
/// Without expansion the upstream response is returned untouched. With
/// expansion each listed id gets a parallel (bounded) metadata fetch and the
/// result is the merged `{messages, resultSizeEstimate}` shape; a message
/// whose metadata fetch failed is reported in place as `{id, error}` without
/// failing the call.
pub async fn list_messages(access_token: &str, params: &ListParams) -> Result<Value, GmailError> {
    let url = format!("{}/users/me/messages", GMAIL_API_BASE.as_str());

    let mut query: Vec<(&str, String)> = vec![
        (
            "q",
            params.q.clone().unwrap_or_else(|| "is:unread".to_string()),
        ),
        ("maxResults", params.max_results.unwrap_or(20).to_string()),
    ];
    if let Some(page_token) = &params.page_token {
        query.push(("pageToken", page_token.clone()));
    }

    let response = http_client()
        .get(&url)
        .bearer_auth(access_token)
        .query(&query)
        .send()
        .await
        .map_err(GmailError::from_transport)?;
    let raw = read_json(response).await?;

    if !params.expand {
        return Ok(raw);
    }

    let list: MessageList =
        serde_json::from_value(raw.clone()).map_err(|e| GmailError::Serde(e.to_string()))?;
    if list.messages.is_empty() {
        return Ok(raw);
    }

    tracing::debug!("Expanding metadata for {} messages", list.messages.len());
    let details = fetch_metadata_batch(access_token, &list.messages).await;
    let merged = merge_messages(&list.messages, details);

    serde_json::to_value(ExpandedList {
        messages: merged,
        result_size_estimate: list.result_size_estimate,
    })
    .map_err(|e| GmailError::Serde(e.to_string()))
}

/// Fetch a single message, passing the upstream JSON through unchanged.
pub async fn get_message(
    access_token: &str,
    id: &str,
    format: Option<&str>,
) -> Result<Value, GmailError> {
    let url = format!("{}/users/me/messages/{id}", GMAIL_API_BASE.as_str());

    let response = http_client()
        .get(&url)
        .bearer_auth(access_token)
        .query(&[("format", format.unwrap_or("full"))])
        .send()
        .await
        .map_err(GmailError::from_transport)?;
    read_json(response).await
}

async fn read_json(response: reqwest::Response) -> Result<Value, GmailError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(GmailError::from_transport)?;

    if !status.is_success() {
        tracing::warn!("Gmail API returned {status}");
        return Err(GmailError::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| GmailError::Serde(e.to_string()))
}

async fn fetch_metadata(access_token: &str, id: &str) -> Result<MessageMetadata, GmailError> {
    let url = format!("{}/users/me/messages/{id}", GMAIL_API_BASE.as_str());

    let response = http_client()
        .get(&url)
        .bearer_auth(access_token)
        .query(&[
            ("format", "metadata"),
            ("metadataHeaders", "From"),
            ("metadataHeaders", "Subject"),
            ("metadataHeaders", "Date"),
        ])
        .send()
        .await
        .map_err(GmailError::from_transport)?;
    let value = read_json(response).await?;
    serde_json::from_value(value).map_err(|e| GmailError::Serde(e.to_string()))
}

async fn fetch_metadata_batch(
    access_token: &str,
    refs: &[MessageRef],
) -> HashMap<String, Result<MessageMetadata, GmailError>> {
    let ids: Vec<String> = refs.iter().map(|message| message.id.clone()).collect();
    stream::iter(ids)
        .map(|id| async move {
            let result = fetch_metadata(access_token, &id).await;
            (id, result)
        })
        .buffer_unordered(*GMAIL_METADATA_CONCURRENCY)
        .collect()
        .await
}

/// Merge list entries with their fetched metadata, preserving list order.
fn merge_messages(
    refs: &[MessageRef],
    mut details: HashMap<String, Result<MessageMetadata, GmailError>>,
) -> Vec<MessageSummary> {
    refs.iter()
        .map(|message| match details.remove(&message.id) {
            Some(Ok(detail)) => {
                let headers = detail
                    .payload
                    .map(|payload| payload.headers)
                    .unwrap_or_default();
                MessageSummary::Expanded {
                    id: message.id.clone(),
                    thread_id: message.thread_id.clone(),
                    snippet: detail.snippet.or_else(|| message.snippet.clone()),
                    from: header_value(&headers, "From"),
                    subject: header_value(&headers, "Subject"),
                    date: header_value(&headers, "Date"),
                }
            }
            Some(Err(e)) => {
                tracing::warn!("Metadata fetch for message {} failed: {e}", message.id);
                MessageSummary::Failed {
                    id: message.id.clone(),
                    error: e.error_body(),
                }
            }
            // Every listed id was enqueued, so this arm is unreachable in
            // practice; report it like a failed fetch rather than panic.
            None => MessageSummary::Failed {
                id: message.id.clone(),
                error: Value::String("metadata missing".to_string()),
            },
        })
        .collect()
}

fn header_value(headers: &[MessageHeader], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|header| header.name.eq_ignore_ascii_case(name))
        .map(|header| header.value.clone())
}
