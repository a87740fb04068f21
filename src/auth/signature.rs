//! HMAC-SHA256 request signing and push verification.
//!
//! Every Open Platform call carries a `sign` query parameter: the lowercase
//! hex HMAC-SHA256 of an ordered concatenation of request fragments, keyed
//! with the partner key. The order of the fragments is significant and must
//! match what the gateway recomputes.
//!
//! # Example
//!
//! ```rust
//! use shopee_sdk::auth::signature::sign;
//!
//! let signature = sign("k", &["12345", "/product/get_item_list", "1700000000"]);
//! assert_eq!(signature.len(), 64);
//! assert!(signature.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
//! ```

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Signs `parts` with `secret`.
///
/// The parts are concatenated in order with no separator and the
/// HMAC-SHA256 digest is returned as lowercase hex.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn sign<S: AsRef<str>>(secret: &str, parts: &[S]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    for part in parts {
        mac.update(part.as_ref().as_bytes());
    }
    hex::encode(mac.finalize().into_bytes())
}

/// Signs the common request fragments `partner_id + path + timestamp`.
#[must_use]
pub fn sign_base(secret: &str, partner_id: u64, path: &str, timestamp: i64) -> String {
    sign(
        secret,
        &[partner_id.to_string(), path.to_string(), timestamp.to_string()],
    )
}

/// Signs the fragments of a shop-authenticated request:
/// `partner_id + path + timestamp + access_token + shop_id`.
#[must_use]
pub fn sign_authenticated(
    secret: &str,
    partner_id: u64,
    path: &str,
    timestamp: i64,
    access_token: &str,
    shop_id: u64,
) -> String {
    sign(
        secret,
        &[
            partner_id.to_string(),
            path.to_string(),
            timestamp.to_string(),
            access_token.to_string(),
            shop_id.to_string(),
        ],
    )
}

/// Performs constant-time comparison of two strings.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Verifies the `Authorization` header of a push notification.
///
/// The platform signs `url + "|" + body` with the partner key, where `url` is
/// the full callback URL that received the push.
///
/// ```rust
/// use shopee_sdk::auth::signature::{sign, verify_push_signature};
///
/// let url = "https://example.com/shopee/push";
/// let body = r#"{"code":3}"#;
/// let header = sign("partner-key", &[url, "|", body]);
///
/// assert!(verify_push_signature(url, body, &header, "partner-key"));
/// assert!(!verify_push_signature(url, body, &header, "other-key"));
/// ```
#[must_use]
pub fn verify_push_signature(
    url: &str,
    body: &str,
    authorization: &str,
    partner_key: &str,
) -> bool {
    let expected = sign(partner_key, &[url, "|", body]);
    constant_time_compare(&expected, authorization.trim())
}
