//! Signing, credentials and shop authorization.
//!
//! # Overview
//!
//! - [`signature`]: HMAC-SHA256 request signing and push verification
//! - [`Credential`]: access / refresh token pair for one shop or merchant
//! - [`CredentialStore`]: persistence seam, with [`FileCredentialStore`] and
//!   [`MemoryCredentialStore`]
//! - [`CredentialProvider`]: what the transport asks for credentials
//! - [`CredentialManager`]: the provider used by the SDK facade
//! - [`authorization_url`]: the link a seller follows to authorize the app
//!
//! # Authorization Flow
//!
//! ```rust,ignore
//! use shopee_sdk::ShopeeSdk;
//!
//! // 1. Send the seller to the authorization page
//! let url = sdk.get_authorization_url("https://example.com/callback")?;
//!
//! // 2. Exchange the code from the callback and persist the credential
//! let credential = sdk.authenticate_with_code(&code, Some(shop_id), None).await?;
//!
//! // 3. Authenticated calls now attach the token automatically
//! let info = sdk.shop().get_shop_info().await?;
//! ```

mod auth_url;
mod credential;
mod provider;
pub mod signature;
mod store;

pub use auth_url::{
    authorization_url, cancel_authorization_url, AUTH_PARTNER_PATH, CANCEL_AUTH_PARTNER_PATH,
};
pub use credential::{AccessTokenResponse, Credential, EXPIRY_SAFETY_MARGIN_SECS};
pub use provider::{CredentialManager, CredentialProvider};
pub use signature::verify_push_signature;
pub use store::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, StoreError,
    DEFAULT_CREDENTIAL_FILE,
};
