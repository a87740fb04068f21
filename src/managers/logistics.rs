//! Shipping channels, fulfilment and tracking.

use serde::Serialize;

use crate::clients::{ApiResponse, HttpClient, RequestOptions, ShopeeError};
use crate::managers::encode_body;

/// Body of `/logistics/ship_order`.
///
/// Exactly one of `pickup`, `dropoff` and `non_integrated` should be set,
/// as returned by [`LogisticsManager::get_shipping_parameter`].
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct ShipOrderParams {
    /// Order to ship.
    pub order_sn: String,
    /// Package, for split orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_number: Option<String>,
    /// Pickup arrangement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup: Option<serde_json::Value>,
    /// Drop-off arrangement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff: Option<serde_json::Value>,
    /// Tracking number for non-integrated channels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_integrated: Option<serde_json::Value>,
}

/// Logistics endpoints.
#[derive(Clone, Debug)]
pub struct LogisticsManager {
    client: HttpClient,
}

impl LogisticsManager {
    /// Creates a manager over `client`.
    #[must_use]
    pub const fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Returns the logistics channels enabled for the shop.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_channel_list(&self) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        self.client
            .execute(
                "/logistics/get_channel_list",
                &RequestOptions::get().authenticated(),
            )
            .await
    }

    /// Returns the parameters needed to ship an order.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_shipping_parameter(
        &self,
        order_sn: &str,
        package_number: Option<&str>,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        self.client
            .execute(
                "/logistics/get_shipping_parameter",
                &Self::order_query(order_sn, package_number),
            )
            .await
    }

    /// Arranges shipment of an order.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn ship_order(
        &self,
        params: &ShipOrderParams,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        const PATH: &str = "/logistics/ship_order";
        let body = encode_body(PATH, params)?;
        self.client
            .execute(PATH, &RequestOptions::post(body).authenticated())
            .await
    }

    /// Returns the tracking number of a shipped order.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_tracking_number(
        &self,
        order_sn: &str,
        package_number: Option<&str>,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        self.client
            .execute(
                "/logistics/get_tracking_number",
                &Self::order_query(order_sn, package_number),
            )
            .await
    }

    /// Returns the tracking history of a shipped order.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_tracking_info(
        &self,
        order_sn: &str,
        package_number: Option<&str>,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        self.client
            .execute(
                "/logistics/get_tracking_info",
                &Self::order_query(order_sn, package_number),
            )
            .await
    }

    /// Returns the shop's pickup and return addresses.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_address_list(&self) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        self.client
            .execute(
                "/logistics/get_address_list",
                &RequestOptions::get().authenticated(),
            )
            .await
    }

    fn order_query(order_sn: &str, package_number: Option<&str>) -> RequestOptions {
        RequestOptions::get()
            .authenticated()
            .query("order_sn", order_sn)
            .query_opt("package_number", package_number)
    }
}
