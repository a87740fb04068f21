//! HTTP transport for the Shopee Open Platform.
//!
//! This module is the single place where requests are signed, sent and
//! normalized. Domain managers build [`RequestOptions`] and hand them to
//! [`HttpClient`].
//!
//! # Overview
//!
//! - [`HttpClient`]: signs and sends requests, refreshes tokens on rejection
//! - [`RequestOptions`]: method, query, body and auth flag for one call
//! - [`QueryValue`]: scalar or list query parameter
//! - [`ResponseEnvelope`]: a successful JSON or text body
//! - [`ApiResponse`]: the standard `{request_id, error, message, response}` body
//! - [`ShopeeError`]: `Api` (gateway error code) or `Sdk` (client failure)
//!
//! # Example
//!
//! ```rust,ignore
//! use shopee_sdk::clients::{HttpClient, RequestOptions};
//!
//! let client = HttpClient::new(config)?;
//! let ranges: serde_json::Value = client
//!     .execute("/public/get_shopee_ip_ranges", &RequestOptions::get())
//!     .await?;
//! ```
//!
//! # Token Refresh
//!
//! When an authenticated call fails with `invalid_acceess_token`, the client
//! asks its [`CredentialProvider`](crate::auth::CredentialProvider) for a new
//! credential once and replays the request. A second rejection is returned
//! as a normal [`ApiError`].

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{ApiError, SdkError, ShopeeError, INVALID_ACCESS_TOKEN_ERROR};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, QueryValue, RequestOptions};
pub use http_response::{extract_api_error, is_truthy, ApiResponse, ResponseEnvelope};

pub(crate) use http_client::build_url;
