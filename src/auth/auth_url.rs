//! Shop authorization links.
//!
//! A seller authorizes the partner app by visiting the link built here; the
//! platform then redirects to `redirect` with `code` and `shop_id` (or
//! `main_account_id`) in the query string. The code is exchanged through
//! [`CredentialManager::authenticate_with_code`](crate::auth::CredentialManager::authenticate_with_code).
//!
//! Unlike API calls, these links are signed over the full gateway path
//! including the `/api/v2` prefix.

use crate::auth::signature::sign_base;
use crate::clients::build_url;
use crate::config::ShopeeConfig;

/// Path of the authorization page, relative to the base URL.
pub const AUTH_PARTNER_PATH: &str = "/shop/auth_partner";

/// Path of the cancel-authorization page, relative to the base URL.
pub const CANCEL_AUTH_PARTNER_PATH: &str = "/shop/cancel_auth_partner";

const SIGNED_PATH_PREFIX: &str = "/api/v2";

/// Builds the authorization link for `redirect` at `timestamp`.
///
/// # Example
///
/// ```rust
/// use shopee_sdk::auth::authorization_url;
/// use shopee_sdk::{PartnerId, PartnerKey, ShopeeConfig};
///
/// let config = ShopeeConfig::builder()
///     .partner_id(PartnerId::new(12345).unwrap())
///     .partner_key(PartnerKey::new("k").unwrap())
///     .build()
///     .unwrap();
///
/// let url = authorization_url(&config, "https://example.com/callback", 1_700_000_000);
/// assert!(url.starts_with("https://partner.shopeemobile.com/api/v2/shop/auth_partner?partner_id=12345&timestamp=1700000000&redirect=https%3A%2F%2Fexample.com%2Fcallback&sign="));
/// ```
#[must_use]
pub fn authorization_url(config: &ShopeeConfig, redirect: &str, timestamp: i64) -> String {
    partner_link(config, AUTH_PARTNER_PATH, redirect, timestamp)
}

/// Builds the link that revokes a shop's authorization.
#[must_use]
pub fn cancel_authorization_url(config: &ShopeeConfig, redirect: &str, timestamp: i64) -> String {
    partner_link(config, CANCEL_AUTH_PARTNER_PATH, redirect, timestamp)
}

fn partner_link(config: &ShopeeConfig, path: &str, redirect: &str, timestamp: i64) -> String {
    let partner_id = config.partner_id().get();
    let signed_path = format!("{SIGNED_PATH_PREFIX}{path}");
    let signature = sign_base(config.partner_key().as_ref(), partner_id, &signed_path, timestamp);

    let query = [
        ("partner_id".to_string(), partner_id.to_string()),
        ("timestamp".to_string(), timestamp.to_string()),
        ("redirect".to_string(), redirect.to_string()),
        ("sign".to_string(), signature),
    ];
    build_url(config.base_url().as_ref(), path, &query)
}
