//! # Shopee Open Platform Rust SDK
//!
//! A Rust SDK for the Shopee Open Platform v2 API, providing typed
//! configuration, request signing, credential management with automatic
//! token refresh, and per-domain API managers.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ShopeeConfig`] and [`ShopeeConfigBuilder`]
//! - Validated newtypes for partner credentials and base URLs
//! - HMAC-SHA256 request signing via [`auth::signature`]
//! - Shop authorization links and code exchange
//! - Pluggable credential persistence via [`auth::CredentialStore`]
//! - An async transport that refreshes rejected tokens and retries once
//! - Managers for the shop, product, order, logistics, payment and push APIs
//!
//! ## Quick Start
//!
//! ```rust
//! use shopee_sdk::{PartnerId, PartnerKey, Region, ShopeeConfig};
//!
//! let config = ShopeeConfig::builder()
//!     .partner_id(PartnerId::new(2_001_234).unwrap())
//!     .partner_key(PartnerKey::new("your-partner-key").unwrap())
//!     .region(Region::TestGlobal)
//!     .shop_id(123_456)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.region().is_sandbox());
//! ```
//!
//! ## Authorizing a Shop
//!
//! ```rust,ignore
//! use shopee_sdk::ShopeeSdk;
//!
//! let sdk = ShopeeSdk::new(config)?;
//!
//! // Step 1: redirect the seller
//! let url = sdk.get_authorization_url("https://your-app.com/callback")?;
//!
//! // Step 2: exchange the code from the callback; the credential is persisted
//! let credential = sdk.authenticate_with_code(&code, Some(shop_id), None).await?;
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use shopee_sdk::managers::{GetItemListParams, ItemStatus};
//!
//! let page = sdk
//!     .product()
//!     .get_item_list(&GetItemListParams::new(0, 50).item_status(vec![ItemStatus::Normal]))
//!     .await?;
//! ```
//!
//! Endpoints without a manager go through the transport directly:
//!
//! ```rust,ignore
//! use shopee_sdk::clients::RequestOptions;
//!
//! let options = RequestOptions::get().authenticated().query("order_sn", "240101ABC");
//! let body: serde_json::Value = sdk
//!     .client()
//!     .execute("/returns/get_return_detail", &options)
//!     .await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Secrets stay secret**: The partner key and tokens never appear in `Debug` output

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod managers;
mod sdk;

// Re-export public types at crate root for convenience
pub use auth::{Credential, CredentialManager, CredentialProvider, CredentialStore};
pub use config::{
    BaseUrl, PartnerId, PartnerKey, Region, SharedConfig, ShopeeConfig, ShopeeConfigBuilder,
};
pub use error::ConfigError;
pub use sdk::{ShopeeSdk, DEFAULT_TOKEN_DIR};

// Re-export HTTP client types
pub use clients::{
    ApiError, ApiResponse, HttpClient, HttpMethod, QueryValue, RequestOptions, ResponseEnvelope,
    SdkError, ShopeeError,
};
