//! Catalogue endpoints: categories, items and models.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopee_sdk::managers::{GetItemListParams, ItemStatus};
//!
//! let params = GetItemListParams::new(0, 50)
//!     .item_status(vec![ItemStatus::Normal, ItemStatus::Unlist]);
//! let page = sdk.product().get_item_list(&params).await?;
//!
//! let ids: Vec<u64> = page.response.unwrap_or_default().item.iter().map(|i| i.item_id).collect();
//! let details = sdk.product().get_item_base_info(&ids).await?;
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clients::{ApiResponse, HttpClient, QueryValue, RequestOptions, ShopeeError};
use crate::managers::{encode_body, join_ids};

/// Listing status of an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    /// Live and purchasable.
    Normal,
    /// Banned by the platform.
    Banned,
    /// Hidden by the seller.
    Unlist,
    /// Pending platform review.
    Reviewing,
    /// Deleted by the seller.
    SellerDelete,
    /// Deleted by the platform.
    ShopeeDelete,
}

impl ItemStatus {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Banned => "BANNED",
            Self::Unlist => "UNLIST",
            Self::Reviewing => "REVIEWING",
            Self::SellerDelete => "SELLER_DELETE",
            Self::ShopeeDelete => "SHOPEE_DELETE",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ItemStatus> for QueryValue {
    fn from(status: ItemStatus) -> Self {
        Self::Str(status.as_str().to_string())
    }
}

/// Query for `/product/get_item_list`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GetItemListParams {
    /// Index of the first item to return.
    pub offset: u32,
    /// Page size, 1..=100.
    pub page_size: u32,
    /// Statuses to include; sent as repeated `item_status` keys.
    pub item_status: Vec<ItemStatus>,
    /// Only items updated at or after this Unix time.
    pub update_time_from: Option<i64>,
    /// Only items updated before this Unix time.
    pub update_time_to: Option<i64>,
}

impl GetItemListParams {
    /// Creates a query for one page with no status filter.
    #[must_use]
    pub const fn new(offset: u32, page_size: u32) -> Self {
        Self {
            offset,
            page_size,
            item_status: Vec::new(),
            update_time_from: None,
            update_time_to: None,
        }
    }

    /// Sets the status filter.
    #[must_use]
    pub fn item_status(mut self, statuses: Vec<ItemStatus>) -> Self {
        self.item_status = statuses;
        self
    }

    /// Restricts the query to an update-time window.
    #[must_use]
    pub const fn updated_between(mut self, from: i64, to: i64) -> Self {
        self.update_time_from = Some(from);
        self.update_time_to = Some(to);
        self
    }

    fn to_options(&self) -> RequestOptions {
        let mut options = RequestOptions::get()
            .authenticated()
            .query("offset", self.offset)
            .query("page_size", self.page_size);
        if !self.item_status.is_empty() {
            options = options.query("item_status", self.item_status.clone());
        }
        options
            .query_opt("update_time_from", self.update_time_from)
            .query_opt("update_time_to", self.update_time_to)
    }
}

/// One row of an item list page.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ItemListEntry {
    /// Item identifier.
    pub item_id: u64,
    /// Listing status as sent by the gateway.
    pub item_status: String,
    /// Unix time of the last update.
    pub update_time: Option<i64>,
}

/// Payload of `/product/get_item_list`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ItemListPage {
    /// Items on this page.
    pub item: Vec<ItemListEntry>,
    /// Total number of matching items.
    pub total_count: u64,
    /// Whether another page exists.
    pub has_next_page: bool,
    /// Offset of the next page.
    pub next_offset: u64,
}

/// Query for `/product/search_item`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchItemParams {
    /// Cursor returned by the previous page; empty for the first page.
    pub offset: Option<String>,
    /// Page size, 1..=100.
    pub page_size: u32,
    /// Substring of the item name.
    pub item_name: Option<String>,
    /// Attribute completeness filter (1 = missing required, 2 = missing optional).
    pub attribute_status: Option<u8>,
    /// Exact item SKU.
    pub item_sku: Option<String>,
}

#[derive(Serialize)]
struct ItemIdBody {
    item_id: u64,
}

#[derive(Serialize)]
struct UnlistEntry {
    item_id: u64,
    unlist: bool,
}

#[derive(Serialize)]
struct UnlistBody {
    item_list: Vec<UnlistEntry>,
}

#[derive(Serialize)]
struct PriceBody<'a, T> {
    item_id: u64,
    price_list: &'a T,
}

#[derive(Serialize)]
struct StockBody<'a, T> {
    item_id: u64,
    stock_list: &'a T,
}

/// Catalogue endpoints.
#[derive(Clone, Debug)]
pub struct ProductManager {
    client: HttpClient,
}

impl ProductManager {
    /// Creates a manager over `client`.
    #[must_use]
    pub const fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Returns the category tree, optionally localized.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_category(
        &self,
        language: Option<&str>,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        let options = RequestOptions::get()
            .authenticated()
            .query_opt("language", language);
        self.client.execute("/product/get_category", &options).await
    }

    /// Returns one page of item ids and statuses.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_item_list(
        &self,
        params: &GetItemListParams,
    ) -> Result<ApiResponse<ItemListPage>, ShopeeError> {
        self.client
            .execute("/product/get_item_list", &params.to_options())
            .await
    }

    /// Returns base information for up to 50 items.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_item_base_info(
        &self,
        item_ids: &[u64],
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        let options = RequestOptions::get()
            .authenticated()
            .query("item_id_list", join_ids(item_ids));
        self.client
            .execute("/product/get_item_base_info", &options)
            .await
    }

    /// Returns the models (variations) of an item.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_model_list(
        &self,
        item_id: u64,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        let options = RequestOptions::get()
            .authenticated()
            .query("item_id", item_id);
        self.client.execute("/product/get_model_list", &options).await
    }

    /// Creates an item. `item` is sent as the request body.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Encode`](crate::clients::SdkError::Encode) if
    /// `item` cannot be serialized, otherwise the transport error unchanged.
    pub async fn add_item<T: Serialize + Sync>(
        &self,
        item: &T,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        self.post("/product/add_item", item).await
    }

    /// Updates an item. `item` must carry `item_id`.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn update_item<T: Serialize + Sync>(
        &self,
        item: &T,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        self.post("/product/update_item", item).await
    }

    /// Deletes an item.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn delete_item(
        &self,
        item_id: u64,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        self.post("/product/delete_item", &ItemIdBody { item_id })
            .await
    }

    /// Lists or unlists items.
    ///
    /// The payload carries per-item `success_list` / `failure_list`.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn unlist_item(
        &self,
        item_ids: &[u64],
        unlist: bool,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        let body = UnlistBody {
            item_list: item_ids
                .iter()
                .map(|&item_id| UnlistEntry { item_id, unlist })
                .collect(),
        };
        self.post("/product/unlist_item", &body).await
    }

    /// Updates prices of an item or its models.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn update_price<T: Serialize + Sync>(
        &self,
        item_id: u64,
        price_list: &T,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        self.post(
            "/product/update_price",
            &PriceBody {
                item_id,
                price_list,
            },
        )
        .await
    }

    /// Updates stock of an item or its models.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn update_stock<T: Serialize + Sync>(
        &self,
        item_id: u64,
        stock_list: &T,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        self.post(
            "/product/update_stock",
            &StockBody {
                item_id,
                stock_list,
            },
        )
        .await
    }

    /// Searches items by name, SKU or attribute completeness.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn search_item(
        &self,
        params: &SearchItemParams,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        let options = RequestOptions::get()
            .authenticated()
            .query_opt("offset", params.offset.as_deref())
            .query("page_size", params.page_size)
            .query_opt("item_name", params.item_name.as_deref())
            .query_opt("attribute_status", params.attribute_status.map(u32::from))
            .query_opt("item_sku", params.item_sku.as_deref());
        self.client.execute("/product/search_item", &options).await
    }

    async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        let body = encode_body(path, body)?;
        self.client
            .execute(path, &RequestOptions::post(body).authenticated())
            .await
    }
}
