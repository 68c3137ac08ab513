use serde::Deserialize;

use crate::domain::{BatchMetadata, CreatedItem, CreatedItems};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct BatchJsonResponse {
    #[serde(default)]
    response: Vec<BatchJsonItem>,
    #[serde(default)]
    metadata: Option<BatchJsonMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
struct BatchJsonItem {
    code: u16,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Option<ItemJsonData>,
    #[serde(default)]
    error_data: Option<ErrorJsonData>,
}

#[derive(Debug, Clone, Deserialize)]
struct ItemJsonData {
    #[serde(default)]
    sid: Option<String>,
    #[serde(default)]
    list_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorJsonData {
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
struct BatchJsonMetadata {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    success: u64,
    #[serde(default)]
    failed: u64,
}

/// Error bodies come in two shapes: v1 / v2 beta wrap a `RestException`,
/// v2 returns the batch envelope with `error_data` on one or many items.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ErrorJsonBody {
    Legacy {
        #[serde(rename = "RestException")]
        rest_exception: RestExceptionJson,
    },
    Batch {
        response: ErrorJsonItems,
    },
}

#[derive(Debug, Clone, Deserialize)]
struct RestExceptionJson {
    #[serde(rename = "Message", default)]
    message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ErrorJsonItems {
    Many(Vec<ErrorJsonItem>),
    One(ErrorJsonItem),
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorJsonItem {
    #[serde(default)]
    error_data: Option<ErrorJsonData>,
}

pub fn decode_created_items(json: &str) -> Result<CreatedItems, TransportError> {
    let parsed: BatchJsonResponse = serde_json::from_str(json)?;
    let metadata = parsed.metadata.unwrap_or_default();

    let items = parsed
        .response
        .into_iter()
        .map(|item| {
            let (sid, list_id) = match item.data {
                Some(data) => (data.sid, data.list_id),
                None => (None, None),
            };
            CreatedItem {
                code: item.code,
                status: item.status,
                sid,
                list_id,
                error_description: item.error_data.and_then(|err| err.description),
            }
        })
        .collect();

    Ok(CreatedItems {
        items,
        metadata: BatchMetadata {
            total: metadata.total,
            success: metadata.success,
            failed: metadata.failed,
        },
    })
}

/// Extract the human-readable error description from an Exotel error body, if any.
pub fn decode_error_description(body: &str) -> Option<String> {
    let parsed: ErrorJsonBody = serde_json::from_str(body).ok()?;
    match parsed {
        ErrorJsonBody::Legacy { rest_exception } => rest_exception.message,
        ErrorJsonBody::Batch { response } => {
            let item = match response {
                ErrorJsonItems::Many(items) => items.into_iter().next()?,
                ErrorJsonItems::One(item) => item,
            };
            item.error_data?.description
        }
    }
}
