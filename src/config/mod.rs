//! Configuration types for the Shopee SDK.
//!
//! # Overview
//!
//! - [`ShopeeConfig`]: partner credentials, endpoint and transport settings
//! - [`ShopeeConfigBuilder`]: builder for [`ShopeeConfig`]
//! - [`PartnerId`], [`PartnerKey`], [`BaseUrl`]: validated newtypes
//! - [`Region`]: the platform deployment to talk to
//! - [`SharedConfig`]: the handle shared by the transport and the facade
//!
//! # Example
//!
//! ```rust
//! use shopee_sdk::{PartnerId, PartnerKey, Region, ShopeeConfig};
//!
//! let config = ShopeeConfig::builder()
//!     .partner_id(PartnerId::new(2001887).unwrap())
//!     .partner_key(PartnerKey::new("my-partner-key").unwrap())
//!     .region(Region::TestGlobal)
//!     .shop_id(123456)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     config.base_url().as_ref(),
//!     "https://partner.test-stable.shopeemobile.com/api/v2"
//! );
//! ```

mod newtypes;
mod region;

pub use newtypes::{BaseUrl, PartnerId, PartnerKey};
pub use region::Region;

use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the partner id.
pub const ENV_PARTNER_ID: &str = "SHOPEE_PARTNER_ID";
/// Environment variable holding the partner key.
pub const ENV_PARTNER_KEY: &str = "SHOPEE_PARTNER_KEY";
/// Environment variable holding the region name.
pub const ENV_REGION: &str = "SHOPEE_REGION";
/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "SHOPEE_BASE_URL";
/// Environment variable holding the default shop id.
pub const ENV_SHOP_ID: &str = "SHOPEE_SHOP_ID";
/// Environment variable holding the default merchant id.
pub const ENV_MERCHANT_ID: &str = "SHOPEE_MERCHANT_ID";

/// Configuration for the Shopee SDK.
///
/// `ShopeeConfig` is `Clone + Send + Sync`. Once built it is only changed
/// through [`crate::ShopeeSdk::set_region`] and [`crate::ShopeeSdk::set_base_url`].
#[derive(Clone, Debug)]
pub struct ShopeeConfig {
    partner_id: PartnerId,
    partner_key: PartnerKey,
    region: Region,
    base_url: BaseUrl,
    shop_id: Option<u64>,
    merchant_id: Option<u64>,
    proxy: Option<String>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ShopeeConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> ShopeeConfigBuilder {
        ShopeeConfigBuilder::new()
    }

    /// Builds a configuration from `SHOPEE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required variable is missing or any
    /// variable fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ShopeeConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse_id = |name: &str, field: &'static str| -> Result<Option<u64>, ConfigError> {
            lookup(name)
                .map(|value| {
                    value
                        .trim()
                        .parse::<u64>()
                        .map_err(|_| ConfigError::InvalidIdentifier { field, value })
                })
                .transpose()
        };

        let mut builder = Self::builder();
        if let Some(id) = lookup(ENV_PARTNER_ID) {
            builder = builder.partner_id(id.parse()?);
        }
        if let Some(key) = lookup(ENV_PARTNER_KEY) {
            builder = builder.partner_key(PartnerKey::new(key)?);
        }
        if let Some(region) = lookup(ENV_REGION) {
            builder = builder.region(region.parse()?);
        }
        if let Some(url) = lookup(ENV_BASE_URL) {
            builder = builder.base_url(BaseUrl::new(url)?);
        }
        if let Some(shop_id) = parse_id(ENV_SHOP_ID, "shop_id")? {
            builder = builder.shop_id(shop_id);
        }
        if let Some(merchant_id) = parse_id(ENV_MERCHANT_ID, "merchant_id")? {
            builder = builder.merchant_id(merchant_id);
        }
        builder.build()
    }

    /// Returns the partner id.
    #[must_use]
    pub const fn partner_id(&self) -> PartnerId {
        self.partner_id
    }

    /// Returns the partner key.
    #[must_use]
    pub const fn partner_key(&self) -> &PartnerKey {
        &self.partner_key
    }

    /// Returns the configured region.
    #[must_use]
    pub const fn region(&self) -> Region {
        self.region
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default shop id, if configured.
    #[must_use]
    pub const fn shop_id(&self) -> Option<u64> {
        self.shop_id
    }

    /// Returns the default merchant id, if configured.
    #[must_use]
    pub const fn merchant_id(&self) -> Option<u64> {
        self.merchant_id
    }

    /// Returns the outbound proxy URL, if configured.
    #[must_use]
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Returns the default request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Switches to `region` and its gateway root.
    pub(crate) fn set_region(&mut self, region: Region) {
        self.region = region;
        self.base_url = region.base_url();
    }

    pub(crate) fn set_base_url(&mut self, base_url: BaseUrl) {
        self.base_url = base_url;
    }
}

// Verify ShopeeConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopeeConfig>();
};

/// Builder for [`ShopeeConfig`].
///
/// `partner_id` and `partner_key` are required.
///
/// # Defaults
///
/// - `region`: [`Region::Global`]
/// - `base_url`: the region's gateway root
/// - everything else: `None`
#[derive(Debug, Default)]
pub struct ShopeeConfigBuilder {
    partner_id: Option<PartnerId>,
    partner_key: Option<PartnerKey>,
    region: Option<Region>,
    base_url: Option<BaseUrl>,
    shop_id: Option<u64>,
    merchant_id: Option<u64>,
    proxy: Option<String>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ShopeeConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the partner id (required).
    #[must_use]
    pub const fn partner_id(mut self, id: PartnerId) -> Self {
        self.partner_id = Some(id);
        self
    }

    /// Sets the partner key (required).
    #[must_use]
    pub fn partner_key(mut self, key: PartnerKey) -> Self {
        self.partner_key = Some(key);
        self
    }

    /// Sets the region.
    #[must_use]
    pub const fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Overrides the base URL. Takes precedence over the region's gateway.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the default shop id.
    #[must_use]
    pub const fn shop_id(mut self, shop_id: u64) -> Self {
        self.shop_id = Some(shop_id);
        self
    }

    /// Sets the default merchant id.
    #[must_use]
    pub const fn merchant_id(mut self, merchant_id: u64) -> Self {
        self.merchant_id = Some(merchant_id);
        self
    }

    /// Routes all traffic through a proxy (e.g. `http://proxy.internal:3128`).
    #[must_use]
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Sets the default timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ShopeeConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `partner_id` or
    /// `partner_key` are not set.
    pub fn build(self) -> Result<ShopeeConfig, ConfigError> {
        let partner_id = self
            .partner_id
            .ok_or(ConfigError::MissingRequiredField {
                field: "partner_id",
            })?;
        let partner_key = self
            .partner_key
            .ok_or(ConfigError::MissingRequiredField {
                field: "partner_key",
            })?;
        let region = self.region.unwrap_or_default();

        Ok(ShopeeConfig {
            partner_id,
            partner_key,
            region,
            base_url: self.base_url.unwrap_or_else(|| region.base_url()),
            shop_id: self.shop_id,
            merchant_id: self.merchant_id,
            proxy: self.proxy,
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

/// Shared, runtime-mutable handle to a [`ShopeeConfig`].
///
/// Readers take a snapshot; the lock is never held across an `.await`.
#[derive(Clone, Debug)]
pub struct SharedConfig(Arc<RwLock<ShopeeConfig>>);

impl SharedConfig {
    /// Wraps a configuration for sharing.
    #[must_use]
    pub fn new(config: ShopeeConfig) -> Self {
        Self(Arc::new(RwLock::new(config)))
    }

    /// Returns a copy of the current configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Poisoned`] if a writer panicked.
    pub fn snapshot(&self) -> Result<ShopeeConfig, ConfigError> {
        self.0
            .read()
            .map(|config| config.clone())
            .map_err(|_| ConfigError::Poisoned)
    }

    pub(crate) fn update<F>(&self, apply: F) -> Result<(), ConfigError>
    where
        F: FnOnce(&mut ShopeeConfig),
    {
        let mut guard = self.0.write().map_err(|_| ConfigError::Poisoned)?;
        apply(&mut guard);
        Ok(())
    }
}

impl From<ShopeeConfig> for SharedConfig {
    fn from(config: ShopeeConfig) -> Self {
        Self::new(config)
    }
}
