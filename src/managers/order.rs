//! Order endpoints.

use serde::{Deserialize, Serialize};

use crate::clients::{ApiResponse, HttpClient, RequestOptions, ShopeeError};
use crate::managers::{encode_body, join_ids};

/// Which timestamp an order-list window applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeRangeField {
    /// Order creation time.
    #[default]
    CreateTime,
    /// Last update time.
    UpdateTime,
}

impl TimeRangeField {
    const fn as_str(self) -> &'static str {
        match self {
            Self::CreateTime => "create_time",
            Self::UpdateTime => "update_time",
        }
    }
}

/// Query for `/order/get_order_list`.
///
/// The window between `time_from` and `time_to` may not exceed 15 days.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GetOrderListParams {
    /// Field the window applies to.
    pub time_range_field: TimeRangeField,
    /// Window start, Unix seconds.
    pub time_from: i64,
    /// Window end, Unix seconds.
    pub time_to: i64,
    /// Page size, 1..=100.
    pub page_size: u32,
    /// Cursor from the previous page.
    pub cursor: Option<String>,
    /// Only orders in this status, e.g. `READY_TO_SHIP`.
    pub order_status: Option<String>,
    /// Extra fields to include, e.g. `order_status`.
    pub response_optional_fields: Option<String>,
}

impl GetOrderListParams {
    fn to_options(&self) -> RequestOptions {
        RequestOptions::get()
            .authenticated()
            .query("time_range_field", self.time_range_field.as_str())
            .query("time_from", self.time_from)
            .query("time_to", self.time_to)
            .query("page_size", self.page_size)
            .query_opt("cursor", self.cursor.as_deref())
            .query_opt("order_status", self.order_status.as_deref())
            .query_opt(
                "response_optional_fields",
                self.response_optional_fields.as_deref(),
            )
    }
}

/// One row of an order list page.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct OrderListEntry {
    /// Order serial number.
    pub order_sn: String,
    /// Present when requested through `response_optional_fields`.
    pub order_status: Option<String>,
}

/// Payload of `/order/get_order_list`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct OrderListPage {
    /// Whether another page exists.
    pub more: bool,
    /// Cursor for the next page.
    pub next_cursor: String,
    /// Orders on this page.
    pub order_list: Vec<OrderListEntry>,
}

/// Body of `/order/cancel_order`.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct CancelOrderParams {
    /// Order to cancel.
    pub order_sn: String,
    /// One of the platform's cancel reasons, e.g. `OUT_OF_STOCK`.
    pub cancel_reason: String,
    /// Items out of stock, required for `OUT_OF_STOCK`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_list: Option<Vec<serde_json::Value>>,
}

#[derive(Serialize)]
struct NoteBody<'a> {
    order_sn: &'a str,
    note: &'a str,
}

/// Order endpoints.
#[derive(Clone, Debug)]
pub struct OrderManager {
    client: HttpClient,
}

impl OrderManager {
    /// Creates a manager over `client`.
    #[must_use]
    pub const fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Returns one page of orders in a time window.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_order_list(
        &self,
        params: &GetOrderListParams,
    ) -> Result<ApiResponse<OrderListPage>, ShopeeError> {
        self.client
            .execute("/order/get_order_list", &params.to_options())
            .await
    }

    /// Returns details for up to 50 orders.
    ///
    /// `optional_fields` names extra fields to include, e.g. `buyer_user_id`
    /// or `item_list`.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_order_detail(
        &self,
        order_sns: &[&str],
        optional_fields: &[&str],
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        let mut options = RequestOptions::get()
            .authenticated()
            .query("order_sn_list", join_ids(order_sns));
        if !optional_fields.is_empty() {
            options = options.query("response_optional_fields", join_ids(optional_fields));
        }
        self.client.execute("/order/get_order_detail", &options).await
    }

    /// Returns orders waiting to be shipped.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_shipment_list(
        &self,
        page_size: u32,
        cursor: Option<&str>,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        let options = RequestOptions::get()
            .authenticated()
            .query("page_size", page_size)
            .query_opt("cursor", cursor);
        self.client
            .execute("/order/get_shipment_list", &options)
            .await
    }

    /// Cancels an order.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn cancel_order(
        &self,
        params: &CancelOrderParams,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        const PATH: &str = "/order/cancel_order";
        let body = encode_body(PATH, params)?;
        self.client
            .execute(PATH, &RequestOptions::post(body).authenticated())
            .await
    }

    /// Sets the seller note on an order.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn set_note(
        &self,
        order_sn: &str,
        note: &str,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        const PATH: &str = "/order/set_note";
        let body = encode_body(PATH, &NoteBody { order_sn, note })?;
        self.client
            .execute(PATH, &RequestOptions::post(body).authenticated())
            .await
    }
}
