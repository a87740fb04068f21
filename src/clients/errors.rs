//! Error types returned by the request transport.
//!
//! - [`ApiError`]: the gateway answered with a non-empty `error` code
//! - [`SdkError`]: a failure inside the client (no credential, network,
//!   unreadable response)
//! - [`ShopeeError`]: the unified error returned by every call
//!
//! # Example
//!
//! ```rust,ignore
//! use shopee_sdk::{ShopeeError, SdkError};
//!
//! match sdk.product().get_item_list(&params).await {
//!     Ok(page) => println!("{} items", page.item.len()),
//!     Err(ShopeeError::Api(e)) => println!("{} ({}): {}", e.error, e.status, e.message),
//!     Err(ShopeeError::Sdk(SdkError::MissingCredential)) => println!("authorize the shop first"),
//!     Err(e) => println!("{e}"),
//! }
//! ```

use thiserror::Error;

use crate::auth::StoreError;
use crate::error::ConfigError;

/// Error code the gateway returns for an expired or revoked access token.
pub const INVALID_ACCESS_TOKEN_ERROR: &str = "invalid_acceess_token";

/// A domain-level failure reported by the gateway.
///
/// The HTTP status may be 2xx; the failure is signalled by the `error` field
/// of the JSON body.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("Shopee API error '{error}' (HTTP {status}): {message}")]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status: u16,
    /// The `error` code from the body.
    pub error: String,
    /// The `message` from the body, empty if absent.
    pub message: String,
    /// The gateway's `request_id`, if present.
    pub request_id: Option<String>,
    /// The full parsed body.
    pub body: serde_json::Value,
}

impl ApiError {
    /// Returns `true` if this error means the access token must be refreshed.
    #[must_use]
    pub fn is_invalid_access_token(&self) -> bool {
        self.error == INVALID_ACCESS_TOKEN_ERROR
    }
}

/// A failure that originates in the client rather than the gateway.
#[derive(Debug, Error)]
pub enum SdkError {
    /// An authenticated call was made but no credential could be obtained.
    #[error("No credential available. Authorize the shop or store a credential before calling authenticated endpoints.")]
    MissingCredential,

    /// An authenticated call has no shop id to sign with.
    #[error("No shop id available. Set one on the configuration or the stored credential.")]
    MissingShopId,

    /// The response declared a content type the client cannot interpret.
    #[error("Unknown response type '{content_type}' (HTTP {status}).")]
    UnknownResponseType {
        /// The declared `Content-Type`, empty if none.
        content_type: String,
        /// HTTP status code of the response.
        status: u16,
    },

    /// A response declared JSON but its body could not be parsed.
    #[error("Invalid JSON response (HTTP {status}): {message}")]
    InvalidJson {
        /// HTTP status code of the response.
        status: u16,
        /// Parser error message.
        message: String,
    },

    /// Request parameters could not be serialized to JSON.
    #[error("Failed to encode request for {path}: {message}")]
    Encode {
        /// The API path being called.
        path: String,
        /// Encoder error message.
        message: String,
    },

    /// A successful payload did not match the expected shape.
    #[error("Failed to decode response for {path}: {message}")]
    Decode {
        /// The API path that was called.
        path: String,
        /// Decoder error message.
        message: String,
    },

    /// Connection, TLS or timeout failure below HTTP.
    #[error("Network error: {message}")]
    Network {
        /// The original error message.
        message: String,
        /// The underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Configuration was invalid or unavailable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The credential store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<reqwest::Error> for SdkError {
    fn from(source: reqwest::Error) -> Self {
        Self::Network {
            message: source.to_string(),
            source,
        }
    }
}

/// Unified error for every SDK call.
#[derive(Debug, Error)]
pub enum ShopeeError {
    /// The gateway reported a failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The client failed.
    #[error(transparent)]
    Sdk(#[from] SdkError),
}

impl ShopeeError {
    /// Returns the API error, if this is one.
    #[must_use]
    pub const fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            Self::Sdk(_) => None,
        }
    }
}

impl From<ConfigError> for ShopeeError {
    fn from(error: ConfigError) -> Self {
        Self::Sdk(SdkError::Config(error))
    }
}

impl From<StoreError> for ShopeeError {
    fn from(error: StoreError) -> Self {
        Self::Sdk(SdkError::Store(error))
    }
}

impl From<reqwest::Error> for ShopeeError {
    fn from(error: reqwest::Error) -> Self {
        Self::Sdk(error.into())
    }
}
