//! Shop credentials and token responses.
//!
//! A [`Credential`] is the access-token / refresh-token bundle for one
//! authorized shop or merchant. It is created by an authorization-code
//! exchange or a refresh, persisted through a
//! [`CredentialStore`](crate::auth::CredentialStore), and replaced wholesale
//! on every refresh.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Seconds subtracted from the server-declared lifetime so a token is
/// refreshed before the gateway starts rejecting it.
pub const EXPIRY_SAFETY_MARGIN_SECS: i64 = 60;

/// Raw body returned by `/auth/token/get` and `/auth/access_token/get`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AccessTokenResponse {
    /// Request identifier assigned by the gateway.
    pub request_id: Option<String>,
    /// Error code; empty on success.
    pub error: Option<String>,
    /// Human-readable error description.
    pub message: Option<String>,
    /// The issued access token.
    pub access_token: Option<String>,
    /// The issued refresh token.
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds.
    pub expire_in: Option<i64>,
    /// Absolute expiry, when the gateway sends one.
    pub expired_at: Option<DateTime<Utc>>,
    /// Partner the token was issued to.
    pub partner_id: Option<u64>,
    /// Shop the token is bound to (refresh responses).
    pub shop_id: Option<u64>,
    /// Merchant the token is bound to (refresh responses).
    pub merchant_id: Option<u64>,
    /// Shops authorized by a main-account code exchange.
    pub shop_id_list: Option<Vec<u64>>,
    /// Merchants authorized by a main-account code exchange.
    pub merchant_id_list: Option<Vec<u64>>,
}

/// Access and refresh tokens for one authorized shop or merchant.
///
/// # Example
///
/// ```rust
/// use chrono::{Duration, Utc};
/// use shopee_sdk::auth::Credential;
///
/// let credential = Credential::new("access", "refresh", Some(123), None)
///     .with_expiry(Utc::now() + Duration::hours(4));
///
/// assert!(!credential.expired());
/// assert_eq!(credential.shop_id, Some(123));
/// ```
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Credential {
    /// Token attached to authenticated requests.
    pub access_token: String,
    /// Token exchanged for a new credential on refresh.
    pub refresh_token: String,
    /// Shop the credential acts for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<u64>,
    /// Merchant the credential acts for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<u64>,
    /// Lifetime in seconds as declared by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_in: Option<i64>,
    /// Instant after which the access token must be refreshed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired_at: Option<DateTime<Utc>>,
    /// Shops covered by a main-account authorization.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shop_id_list: Vec<u64>,
    /// Merchants covered by a main-account authorization.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merchant_id_list: Vec<u64>,
    /// Request id of the call that issued this credential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl Credential {
    /// Creates a credential without expiry information.
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        shop_id: Option<u64>,
        merchant_id: Option<u64>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            shop_id,
            merchant_id,
            expire_in: None,
            expired_at: None,
            shop_id_list: Vec::new(),
            merchant_id_list: Vec::new(),
            request_id: None,
        }
    }

    /// Sets the expiry instant.
    #[must_use]
    pub const fn with_expiry(mut self, expired_at: DateTime<Utc>) -> Self {
        self.expired_at = Some(expired_at);
        self
    }

    /// Builds a credential from a token response received at `now`.
    ///
    /// Returns `None` when the response carries no access token. When the
    /// response has no absolute expiry but declares `expire_in`, the expiry
    /// becomes `now + expire_in - 60s`.
    #[must_use]
    pub fn from_token_response(
        response: AccessTokenResponse,
        shop_id: Option<u64>,
        merchant_id: Option<u64>,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let access_token = response.access_token.filter(|t| !t.is_empty())?;

        let expired_at = response.expired_at.or_else(|| {
            response
                .expire_in
                .map(|secs| now + Duration::seconds(secs - EXPIRY_SAFETY_MARGIN_SECS))
        });

        Some(Self {
            access_token,
            refresh_token: response.refresh_token.unwrap_or_default(),
            shop_id: response.shop_id.or(shop_id),
            merchant_id: response.merchant_id.or(merchant_id),
            expire_in: response.expire_in,
            expired_at,
            shop_id_list: response.shop_id_list.unwrap_or_default(),
            merchant_id_list: response.merchant_id_list.unwrap_or_default(),
            request_id: response.request_id,
        })
    }

    /// Returns `true` if the access token is expired at `now`.
    ///
    /// Credentials without an expiry are never considered expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expired_at.is_some_and(|expires| now >= expires)
    }

    /// Returns `true` if the access token is expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"*****")
            .field("refresh_token", &"*****")
            .field("shop_id", &self.shop_id)
            .field("merchant_id", &self.merchant_id)
            .field("expire_in", &self.expire_in)
            .field("expired_at", &self.expired_at)
            .field("shop_id_list", &self.shop_id_list)
            .field("merchant_id_list", &self.merchant_id_list)
            .field("request_id", &self.request_id)
            .finish()
    }
}

// Verify Credential is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Credential>();
};
