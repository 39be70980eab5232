use crate::error::{Result, ScreeningError, TransportError};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Response;
use serde_json::Value;

/// Whether the response headers announce a JSON body
pub fn is_json_response(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|content_type| content_type.contains("application/json"))
        .unwrap_or(false)
}

/// Pick the human-readable message out of an error envelope:
/// `error`, else `message`, else a generic status line
pub fn extract_error_message(data: &Value, status: u16) -> String {
    ["error", "message"]
        .iter()
        .filter_map(|key| data.get(key))
        .find_map(|value| match value {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Null | Value::Bool(false) | Value::String(_) => None,
            other => Some(other.to_string()),
        })
        .unwrap_or_else(|| format!("HTTP Error {status}"))
}

/// Turn a raw response into parsed JSON or a classified failure
pub async fn classify_response(response: Response) -> Result<Value> {
    let status = response.status();

    // HTML error pages must never be parsed as data
    if !is_json_response(response.headers()) {
        return Err(ScreeningError::Server {
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await.map_err(TransportError::from)?;
    let data: Value = serde_json::from_slice(&bytes).map_err(TransportError::from)?;

    if !status.is_success() {
        return Err(ScreeningError::Api {
            status: status.as_u16(),
            message: extract_error_message(&data, status.as_u16()),
        });
    }

    Ok(data)
}
