//! Partner-level endpoints that need no shop credential.

use crate::clients::{HttpClient, RequestOptions, ShopeeError};

/// Paging for the partner listing endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartnerPageParams {
    /// Page size, 1..=100.
    pub page_size: u32,
    /// 1-based page number.
    pub page_no: u32,
}

impl Default for PartnerPageParams {
    fn default() -> Self {
        Self {
            page_size: 100,
            page_no: 1,
        }
    }
}

impl PartnerPageParams {
    fn to_options(self) -> RequestOptions {
        RequestOptions::get()
            .query("page_size", self.page_size)
            .query("page_no", self.page_no)
    }
}

/// Public endpoints.
#[derive(Clone, Debug)]
pub struct PublicManager {
    client: HttpClient,
}

impl PublicManager {
    /// Creates a manager over `client`.
    #[must_use]
    pub const fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Lists shops that have authorized the partner.
    ///
    /// The body is returned as-is (`authed_shop_list`, `more`, ...).
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_shops_by_partner(
        &self,
        params: PartnerPageParams,
    ) -> Result<serde_json::Value, ShopeeError> {
        self.client
            .execute("/public/get_shops_by_partner", &params.to_options())
            .await
    }

    /// Lists merchants that have authorized the partner.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_merchants_by_partner(
        &self,
        params: PartnerPageParams,
    ) -> Result<serde_json::Value, ShopeeError> {
        self.client
            .execute("/public/get_merchants_by_partner", &params.to_options())
            .await
    }

    /// Returns the IP ranges push notifications are sent from.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_shopee_ip_ranges(&self) -> Result<serde_json::Value, ShopeeError> {
        self.client
            .execute("/public/get_shopee_ip_ranges", &RequestOptions::get())
            .await
    }
}
