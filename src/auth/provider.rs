//! Credential resolution and refresh.
//!
//! The transport never talks to a store directly. It asks a
//! [`CredentialProvider`] for the current credential and, when the gateway
//! rejects it, for a refreshed one. [`CredentialManager`] is the provider the
//! SDK facade installs: it owns an unauthenticated transport for the token
//! endpoints and a [`CredentialStore`] for persistence.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::auth::{Credential, CredentialStore};
use crate::clients::{HttpClient, SdkError, ShopeeError};
use crate::config::SharedConfig;
use crate::managers::AuthManager;

/// Source of shop credentials for authenticated calls.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns the credential to use now, if one exists.
    async fn current(&self) -> Result<Option<Credential>, ShopeeError>;

    /// Obtains a fresh credential.
    ///
    /// `stale` is the credential that was found expired or was rejected by
    /// the gateway. Returns `Ok(None)` if no credential could be issued.
    async fn refresh(&self, stale: Option<&Credential>)
        -> Result<Option<Credential>, ShopeeError>;
}

/// Obtains, refreshes and persists the credential of one shop.
///
/// Refreshes are serialized: when several requests hit an expired token at
/// once, the first one refreshes and the others reuse its result.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use shopee_sdk::auth::{CredentialManager, FileCredentialStore};
/// use shopee_sdk::clients::HttpClient;
///
/// let transport = HttpClient::new(config.clone())?;
/// let store = Arc::new(FileCredentialStore::new(".token", Some(123456)));
/// let manager = CredentialManager::new(transport, store);
///
/// let credential = manager
///     .authenticate_with_code("code-from-redirect", Some(123456), None)
///     .await?;
/// ```
pub struct CredentialManager {
    config: SharedConfig,
    auth: AuthManager,
    store: Arc<dyn CredentialStore>,
    refresh_lock: Mutex<()>,
}

impl fmt::Debug for CredentialManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialManager")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CredentialManager {
    /// Creates a manager that calls the token endpoints through `client`.
    ///
    /// `client` should not carry a credential provider itself; the token
    /// endpoints are unauthenticated.
    #[must_use]
    pub fn new(client: HttpClient, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            config: client.config().clone(),
            auth: AuthManager::new(client),
            store,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Returns the backing store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Exchanges an authorization code and persists the resulting credential.
    ///
    /// Returns `Ok(None)` if the gateway answered without an access token.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError::Api`] if the exchange is rejected, or a store
    /// error if the credential cannot be persisted.
    pub async fn authenticate_with_code(
        &self,
        code: &str,
        shop_id: Option<u64>,
        main_account_id: Option<u64>,
    ) -> Result<Option<Credential>, ShopeeError> {
        let response = self
            .auth
            .get_access_token(code, shop_id, main_account_id)
            .await?;

        let Some(credential) = Credential::from_token_response(response, shop_id, None, Utc::now())
        else {
            tracing::warn!("Authorization code exchange returned no access token");
            return Ok(None);
        };

        self.store.store(&credential).await?;
        tracing::info!(
            "Authorized shop {:?} (main account {:?}), token expires at {:?}",
            credential.shop_id,
            main_account_id,
            credential.expired_at
        );
        Ok(Some(credential))
    }

    /// Refreshes the stored credential and persists the new one.
    ///
    /// The shop and merchant ids default to those of the stored credential,
    /// then to the configuration. Returns `Ok(None)` if the gateway answered
    /// without an access token.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::MissingCredential`] if nothing is stored, and
    /// [`ShopeeError::Api`] if the refresh token is rejected.
    pub async fn refresh_token(
        &self,
        shop_id: Option<u64>,
        merchant_id: Option<u64>,
    ) -> Result<Option<Credential>, ShopeeError> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_stored(shop_id, merchant_id).await
    }

    /// Returns the stored credential without contacting the gateway.
    ///
    /// # Errors
    ///
    /// Returns a store error if the credential cannot be read.
    pub async fn get_auth_token(&self) -> Result<Option<Credential>, ShopeeError> {
        Ok(self.store.get().await?)
    }

    async fn refresh_stored(
        &self,
        shop_id: Option<u64>,
        merchant_id: Option<u64>,
    ) -> Result<Option<Credential>, ShopeeError> {
        let stored = self
            .store
            .get()
            .await?
            .ok_or(SdkError::MissingCredential)?;

        let config = self.config.snapshot()?;
        let shop_id = shop_id.or(stored.shop_id).or_else(|| config.shop_id());
        let merchant_id = merchant_id
            .or(stored.merchant_id)
            .or_else(|| config.merchant_id());

        let response = self
            .auth
            .refresh_access_token(&stored.refresh_token, shop_id, merchant_id)
            .await?;

        let Some(mut credential) =
            Credential::from_token_response(response, shop_id, merchant_id, Utc::now())
        else {
            tracing::warn!("Token refresh for shop {:?} returned no access token", shop_id);
            return Ok(None);
        };
        if credential.refresh_token.is_empty() {
            credential.refresh_token = stored.refresh_token;
        }

        self.store.store(&credential).await?;
        tracing::info!(
            "Refreshed access token for shop {:?}, expires at {:?}",
            credential.shop_id,
            credential.expired_at
        );
        Ok(Some(credential))
    }
}

#[async_trait]
impl CredentialProvider for CredentialManager {
    async fn current(&self) -> Result<Option<Credential>, ShopeeError> {
        self.get_auth_token().await
    }

    async fn refresh(
        &self,
        stale: Option<&Credential>,
    ) -> Result<Option<Credential>, ShopeeError> {
        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited for the lock.
        if let (Some(stale), Some(stored)) = (stale, self.store.get().await?) {
            if stored.access_token != stale.access_token && !stored.expired() {
                tracing::debug!("Reusing credential refreshed by a concurrent request");
                return Ok(Some(stored));
            }
        }

        self.refresh_stored(None, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryCredentialStore;
    use crate::config::{BaseUrl, PartnerId, PartnerKey, ShopeeConfig};
    use chrono::Duration;

    fn offline_manager(store: Arc<dyn CredentialStore>) -> CredentialManager {
        // Port 9 (discard) is never contacted by these tests.
        let config = ShopeeConfig::builder()
            .partner_id(PartnerId::new(1).unwrap())
            .partner_key(PartnerKey::new("k").unwrap())
            .base_url(BaseUrl::new("http://127.0.0.1:9").unwrap())
            .build()
            .unwrap();
        CredentialManager::new(HttpClient::new(config).unwrap(), store)
    }

    #[tokio::test]
    async fn test_refresh_without_stored_credential_is_missing_credential() {
        let manager = offline_manager(Arc::new(MemoryCredentialStore::new()));

        let result = manager.refresh_token(None, None).await;
        assert!(matches!(
            result,
            Err(ShopeeError::Sdk(SdkError::MissingCredential))
        ));
    }

    #[tokio::test]
    async fn test_refresh_reuses_newer_stored_credential() {
        let fresh = Credential::new("fresh", "r2", Some(7), None)
            .with_expiry(Utc::now() + Duration::hours(4));
        let manager = offline_manager(Arc::new(MemoryCredentialStore::with_credential(
            fresh.clone(),
        )));

        let stale = Credential::new("stale", "r1", Some(7), None);
        let refreshed = manager.refresh(Some(&stale)).await.unwrap();
        assert_eq!(refreshed, Some(fresh));
    }

    #[tokio::test]
    async fn test_current_reads_store() {
        let stored = Credential::new("a", "r", Some(1), None);
        let manager = offline_manager(Arc::new(MemoryCredentialStore::with_credential(
            stored.clone(),
        )));

        assert_eq!(manager.current().await.unwrap(), Some(stored));
    }
}
