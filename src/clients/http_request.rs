//! Request options for the Shopee transport.
//!
//! [`RequestOptions`] describes one logical call: method, query parameters,
//! JSON body, whether shop credentials must be attached, header overrides and
//! an optional timeout.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// HTTP methods used by the Open Platform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET.
    #[default]
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP DELETE.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A query parameter value.
///
/// Lists are sent as repeated keys (`k=a&k=b`). `Null` is a real value and is
/// sent as the string `null`; to omit a parameter, don't add it (see
/// [`RequestOptions::query_opt`]).
///
/// ```rust
/// use shopee_sdk::clients::QueryValue;
///
/// assert_eq!(QueryValue::from(0).render(), "0");
/// assert_eq!(QueryValue::from(false).render(), "false");
/// assert_eq!(QueryValue::from("").render(), "");
/// assert_eq!(QueryValue::Null.render(), "null");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum QueryValue {
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// String.
    Str(String),
    /// List, serialized as repeated keys.
    List(Vec<QueryValue>),
}

impl QueryValue {
    /// Renders a scalar value. Nested lists render comma-joined.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::UInt(u) => u.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => s.clone(),
            Self::List(items) => items
                .iter()
                .map(Self::render)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Returns the `(key, value)` pairs this value expands to.
    #[must_use]
    pub fn expand(&self, key: &str) -> Vec<(String, String)> {
        match self {
            Self::List(items) => items
                .iter()
                .map(|item| (key.to_string(), item.render()))
                .collect(),
            scalar => vec![(key.to_string(), scalar.render())],
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Options for a single transport call.
///
/// # Example
///
/// ```rust
/// use shopee_sdk::clients::{HttpMethod, RequestOptions};
///
/// let options = RequestOptions::get()
///     .authenticated()
///     .query("offset", 0)
///     .query("page_size", 50)
///     .query("item_status", vec!["NORMAL", "BANNED"])
///     .query_opt("update_time_from", None::<i64>);
///
/// assert_eq!(options.method, HttpMethod::Get);
/// assert!(options.auth);
/// assert_eq!(options.params.len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    /// HTTP method; defaults to GET.
    pub method: HttpMethod,
    /// Query parameters in insertion order.
    pub params: Vec<(String, QueryValue)>,
    /// JSON body, sent only for non-GET requests.
    pub body: Option<serde_json::Value>,
    /// Attach shop credentials and sign with them.
    pub auth: bool,
    /// Header overrides; these win over the transport defaults.
    pub headers: HashMap<String, String>,
    /// Per-call timeout overriding the configured default.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates options for `method`.
    #[must_use]
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Creates GET options.
    #[must_use]
    pub fn get() -> Self {
        Self::new(HttpMethod::Get)
    }

    /// Creates POST options with a JSON body.
    #[must_use]
    pub fn post(body: impl Into<serde_json::Value>) -> Self {
        Self::new(HttpMethod::Post).body(body)
    }

    /// Marks the call as requiring shop credentials.
    #[must_use]
    pub const fn authenticated(mut self) -> Self {
        self.auth = true;
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Adds a query parameter only when `value` is `Some`.
    #[must_use]
    pub fn query_opt<V: Into<QueryValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a header override.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets a timeout for this call.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
