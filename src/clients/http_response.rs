//! Response types for the Shopee transport.
//!
//! The transport decides once whether a response is a success; managers
//! receive either a [`ResponseEnvelope`] or a typed [`ApiResponse`].

use serde::{Deserialize, Serialize};

use crate::clients::errors::ApiError;

/// A successful response body.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseEnvelope {
    /// A parsed JSON document (declared `application/json`).
    Json(serde_json::Value),
    /// A raw text body (declared `text/*`).
    Text(String),
}

impl ResponseEnvelope {
    /// Returns the JSON value, if this is a JSON response.
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Returns the text, if this is a text response.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Converts the body into a JSON value; text becomes a JSON string.
    #[must_use]
    pub fn into_value(self) -> serde_json::Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => serde_json::Value::String(text),
        }
    }
}

/// The standard Open Platform body: metadata plus a `response` payload.
///
/// # Example
///
/// ```rust
/// use shopee_sdk::clients::ApiResponse;
///
/// let body = r#"{"request_id":"abc","error":"","message":"","response":{"total":3}}"#;
/// let parsed: ApiResponse<serde_json::Value> = serde_json::from_str(body).unwrap();
/// assert_eq!(parsed.request_id, "abc");
/// assert_eq!(parsed.response.unwrap()["total"], 3);
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ApiResponse<T> {
    /// Request identifier assigned by the gateway.
    #[serde(default)]
    pub request_id: String,
    /// Error code; always empty on responses that reach the caller.
    #[serde(default)]
    pub error: String,
    /// Message accompanying the error or warning.
    #[serde(default)]
    pub message: String,
    /// Non-fatal warning, shape varies by endpoint.
    #[serde(default)]
    pub warning: Option<serde_json::Value>,
    /// The endpoint payload.
    #[serde(default = "Option::default")]
    pub response: Option<T>,
}

/// Returns `true` if a JSON value would count as "set" for the `error` field.
///
/// Empty strings, `false`, `0` and `null` are unset.
#[must_use]
pub fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

/// Extracts an [`ApiError`] from a parsed body, if it carries one.
///
/// Only JSON objects are inspected; a truthy `error` field marks a failure
/// regardless of the HTTP status. A body without one is a success, whatever
/// the status.
#[must_use]
pub fn extract_api_error(status: u16, body: &serde_json::Value) -> Option<ApiError> {
    let error = body
        .as_object()
        .and_then(|object| object.get("error"))
        .filter(|value| is_truthy(value));

    let code = match error {
        Some(serde_json::Value::String(code)) => code.clone(),
        Some(other) => other.to_string(),
        None => return None,
    };

    let field = |name: &str| body.get(name).and_then(serde_json::Value::as_str);

    Some(ApiError {
        status,
        error: code,
        message: field("message").unwrap_or_default().to_string(),
        request_id: field("request_id").map(String::from),
        body: body.clone(),
    })
}
