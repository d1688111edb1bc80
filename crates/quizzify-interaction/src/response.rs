//! Response decoding for the gateway's two body styles.
//!
//! `/api/*` wraps everything in `{code, error, payload}`; `/sso/*` returns the
//! object itself.

use quizzify_core::{QuizzifyError, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
    pub payload: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Decodes a plain JSON body.
pub fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}

/// Decodes an `/api/*` envelope and returns its payload.
pub fn decode_payload<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: ApiEnvelope<T> = serde_json::from_str(body)?;
    envelope
        .payload
        .ok_or_else(|| QuizzifyError::json("response envelope has no payload"))
}

/// Like [`decode_payload`] for collection endpoints, where an empty result
/// arrives as `"payload": null`.
pub fn decode_list_payload<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    let envelope: ApiEnvelope<Vec<T>> = serde_json::from_str(body)?;
    Ok(envelope.payload.unwrap_or_default())
}

/// Decodes a body the client does not model.
///
/// Empty bodies become `Null`; non-JSON bodies are kept as a string.
pub fn decode_raw(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// Builds the error for a non-success response.
///
/// Prefers the envelope's `error.message`, then a top-level `error` or
/// `message` string, then the raw body.
pub fn http_error(status: u16, reason: Option<&str>, body: &str) -> QuizzifyError {
    QuizzifyError::http(status, error_message(reason, body))
}

fn error_message(reason: Option<&str>, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ApiEnvelope<Value>>(body)
        && let Some(error) = envelope.error
        && !error.message.is_empty()
    {
        return error.message;
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            if let Some(Value::String(text)) = map.get(key) {
                return text.clone();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        reason.unwrap_or("request failed").to_string()
    } else {
        trimmed.to_string()
    }
}
