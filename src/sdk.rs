//! The SDK facade.
//!
//! [`ShopeeSdk`] wires one configuration, one credential manager and one
//! transport together and hands out the domain managers.

use std::sync::Arc;

use chrono::Utc;

use crate::auth::{
    authorization_url, cancel_authorization_url, Credential, CredentialManager, CredentialStore,
    FileCredentialStore,
};
use crate::clients::{HttpClient, SdkError, ShopeeError};
use crate::config::{BaseUrl, Region, SharedConfig, ShopeeConfig};
use crate::error::ConfigError;
use crate::managers::{
    AuthManager, LogisticsManager, OrderManager, PaymentManager, ProductManager, PublicManager,
    PushManager, ShopManager,
};

/// Directory the default file store writes to, relative to the working
/// directory.
pub const DEFAULT_TOKEN_DIR: &str = ".token";

/// Entry point of the SDK.
///
/// # Example
///
/// ```rust,ignore
/// use shopee_sdk::{ShopeeConfig, ShopeeSdk};
///
/// let sdk = ShopeeSdk::new(ShopeeConfig::from_env()?)?;
///
/// // Once per shop: send the seller to this URL, then exchange the code.
/// let url = sdk.get_authorization_url("https://example.com/callback")?;
/// sdk.authenticate_with_code(&code, Some(shop_id), None).await?;
///
/// // Tokens are attached and refreshed automatically from here on.
/// let info = sdk.shop().get_shop_info().await?;
/// println!("{}", info.shop_name);
/// ```
///
/// # Thread Safety
///
/// `ShopeeSdk` is `Send + Sync`; share it behind an `Arc`.
#[derive(Debug)]
pub struct ShopeeSdk {
    config: SharedConfig,
    credentials: Arc<CredentialManager>,
    client: HttpClient,
    auth: AuthManager,
    public: PublicManager,
    shop: ShopManager,
    product: ProductManager,
    order: OrderManager,
    logistics: LogisticsManager,
    payment: PaymentManager,
    push: PushManager,
}

// Verify ShopeeSdk is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopeeSdk>();
};

impl ShopeeSdk {
    /// Creates an SDK that persists credentials under [`DEFAULT_TOKEN_DIR`].
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: ShopeeConfig) -> Result<Self, SdkError> {
        let store = Arc::new(FileCredentialStore::new(DEFAULT_TOKEN_DIR, config.shop_id()));
        Self::with_store(config, store)
    }

    /// Creates an SDK that persists credentials in `store`.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::ClientBuild`] if the HTTP client cannot be built.
    pub fn with_store(
        config: ShopeeConfig,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, SdkError> {
        let config = SharedConfig::new(config);
        let unauthenticated = HttpClient::new(config.clone())?;
        let credentials = Arc::new(CredentialManager::new(unauthenticated.clone(), store));
        let client = unauthenticated.with_credentials(credentials.clone());

        Ok(Self {
            auth: AuthManager::new(unauthenticated),
            public: PublicManager::new(client.clone()),
            shop: ShopManager::new(client.clone()),
            product: ProductManager::new(client.clone()),
            order: OrderManager::new(client.clone()),
            logistics: LogisticsManager::new(client.clone()),
            payment: PaymentManager::new(client.clone()),
            push: PushManager::new(client.clone()),
            config,
            credentials,
            client,
        })
    }

    /// Returns the shared configuration.
    #[must_use]
    pub const fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// Returns the authenticated transport, for endpoints without a manager.
    #[must_use]
    pub const fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Returns the credential manager.
    #[must_use]
    pub fn credentials(&self) -> &CredentialManager {
        &self.credentials
    }

    /// Token endpoints.
    #[must_use]
    pub const fn auth(&self) -> &AuthManager {
        &self.auth
    }

    /// Partner-level endpoints.
    #[must_use]
    pub const fn public(&self) -> &PublicManager {
        &self.public
    }

    /// Shop endpoints.
    #[must_use]
    pub const fn shop(&self) -> &ShopManager {
        &self.shop
    }

    /// Catalogue endpoints.
    #[must_use]
    pub const fn product(&self) -> &ProductManager {
        &self.product
    }

    /// Order endpoints.
    #[must_use]
    pub const fn order(&self) -> &OrderManager {
        &self.order
    }

    /// Logistics endpoints.
    #[must_use]
    pub const fn logistics(&self) -> &LogisticsManager {
        &self.logistics
    }

    /// Payment endpoints.
    #[must_use]
    pub const fn payment(&self) -> &PaymentManager {
        &self.payment
    }

    /// Push endpoints.
    #[must_use]
    pub const fn push(&self) -> &PushManager {
        &self.push
    }

    /// Switches to `region`, replacing the base URL with the region's.
    ///
    /// Takes effect for every request started afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Poisoned`] if the configuration lock is poisoned.
    pub fn set_region(&self, region: Region) -> Result<(), ConfigError> {
        tracing::info!("Switching region to {}", region);
        self.config.update(|config| config.set_region(region))
    }

    /// Overrides the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Poisoned`] if the configuration lock is poisoned.
    pub fn set_base_url(&self, base_url: BaseUrl) -> Result<(), ConfigError> {
        tracing::info!("Switching base URL to {}", base_url);
        self.config.update(|config| config.set_base_url(base_url))
    }

    /// Builds the link a seller follows to authorize the app.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Poisoned`] if the configuration lock is poisoned.
    pub fn get_authorization_url(&self, redirect: &str) -> Result<String, ConfigError> {
        let config = self.config.snapshot()?;
        Ok(authorization_url(&config, redirect, Utc::now().timestamp()))
    }

    /// Builds the link a seller follows to revoke the app's authorization.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Poisoned`] if the configuration lock is poisoned.
    pub fn get_cancel_authorization_url(&self, redirect: &str) -> Result<String, ConfigError> {
        let config = self.config.snapshot()?;
        Ok(cancel_authorization_url(
            &config,
            redirect,
            Utc::now().timestamp(),
        ))
    }

    /// Exchanges an authorization code and persists the credential.
    ///
    /// # Errors
    ///
    /// See [`CredentialManager::authenticate_with_code`].
    pub async fn authenticate_with_code(
        &self,
        code: &str,
        shop_id: Option<u64>,
        main_account_id: Option<u64>,
    ) -> Result<Option<Credential>, ShopeeError> {
        self.credentials
            .authenticate_with_code(code, shop_id, main_account_id)
            .await
    }

    /// Refreshes the stored credential.
    ///
    /// # Errors
    ///
    /// See [`CredentialManager::refresh_token`].
    pub async fn refresh_token(
        &self,
        shop_id: Option<u64>,
        merchant_id: Option<u64>,
    ) -> Result<Option<Credential>, ShopeeError> {
        self.credentials.refresh_token(shop_id, merchant_id).await
    }

    /// Returns the stored credential.
    ///
    /// # Errors
    ///
    /// Returns a store error if the credential cannot be read.
    pub async fn get_auth_token(&self) -> Result<Option<Credential>, ShopeeError> {
        self.credentials.get_auth_token().await
    }
}
