//! Shop profile and settings.

use serde::{Deserialize, Serialize};

use crate::clients::{ApiResponse, HttpClient, RequestOptions, ShopeeError};
use crate::managers::encode_body;

/// Body of `/shop/get_shop_info`.
///
/// Unlike most endpoints, the shop fields sit at the top level of the body
/// rather than under `response`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ShopInfo {
    /// Request identifier assigned by the gateway.
    pub request_id: String,
    /// Display name of the shop.
    pub shop_name: String,
    /// Two-letter market code, e.g. `SG`.
    pub region: String,
    /// `NORMAL`, `BANNED` or `FROZEN`.
    pub status: String,
    /// Whether the shop is a cross-border seller.
    pub is_cb: bool,
    /// Whether this is a Shopee Integrated Partner shop.
    pub is_sip: bool,
    /// Unix time the authorization was granted.
    pub auth_time: Option<i64>,
    /// Unix time the authorization expires.
    pub expire_time: Option<i64>,
    /// Merchant the shop belongs to, for main-account shops.
    pub merchant_id: Option<u64>,
}

/// Shop-level endpoints.
#[derive(Clone, Debug)]
pub struct ShopManager {
    client: HttpClient,
}

impl ShopManager {
    /// Creates a manager over `client`.
    #[must_use]
    pub const fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Returns basic information about the authorized shop.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_shop_info(&self) -> Result<ShopInfo, ShopeeError> {
        self.client
            .execute("/shop/get_shop_info", &RequestOptions::get().authenticated())
            .await
    }

    /// Returns the shop's public profile (logo, name, description).
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_profile(&self) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        self.client
            .execute("/shop/get_profile", &RequestOptions::get().authenticated())
            .await
    }

    /// Updates the shop's public profile.
    ///
    /// `profile` may contain any of `shop_logo`, `description` and
    /// `shop_name`.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn update_profile<T: Serialize + Sync>(
        &self,
        profile: &T,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        const PATH: &str = "/shop/update_profile";
        let body = encode_body(PATH, profile)?;
        self.client
            .execute(PATH, &RequestOptions::post(body).authenticated())
            .await
    }

    /// Returns the shop's warehouses.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_warehouse_detail(
        &self,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        self.client
            .execute(
                "/shop/get_warehouse_detail",
                &RequestOptions::get().authenticated(),
            )
            .await
    }
}
