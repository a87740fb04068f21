//! Escrow and wallet endpoints.

use crate::clients::{ApiResponse, HttpClient, RequestOptions, ShopeeError};

/// Query for `/payment/get_escrow_list`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GetEscrowListParams {
    /// Escrow release window start, Unix seconds.
    pub release_time_from: i64,
    /// Escrow release window end, Unix seconds.
    pub release_time_to: i64,
    /// Page size, up to 100.
    pub page_size: Option<u32>,
    /// 1-based page number.
    pub page_no: Option<u32>,
}

/// Query for `/payment/get_wallet_transaction_list`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GetWalletTransactionListParams {
    /// 0-based page number.
    pub page_no: u32,
    /// Page size, up to 100.
    pub page_size: u32,
    /// Window start, Unix seconds.
    pub create_time_from: Option<i64>,
    /// Window end, Unix seconds.
    pub create_time_to: Option<i64>,
    /// Wallet to list, e.g. `seller_wallet`.
    pub wallet_type: Option<String>,
    /// Transaction type filter.
    pub transaction_type: Option<String>,
}

/// Payment endpoints.
#[derive(Clone, Debug)]
pub struct PaymentManager {
    client: HttpClient,
}

impl PaymentManager {
    /// Creates a manager over `client`.
    #[must_use]
    pub const fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Returns the escrow breakdown of one order.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_escrow_detail(
        &self,
        order_sn: &str,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        let options = RequestOptions::get()
            .authenticated()
            .query("order_sn", order_sn);
        self.client
            .execute("/payment/get_escrow_detail", &options)
            .await
    }

    /// Returns orders whose escrow was released in a window.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_escrow_list(
        &self,
        params: &GetEscrowListParams,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        let options = RequestOptions::get()
            .authenticated()
            .query("release_time_from", params.release_time_from)
            .query("release_time_to", params.release_time_to)
            .query_opt("page_size", params.page_size)
            .query_opt("page_no", params.page_no);
        self.client
            .execute("/payment/get_escrow_list", &options)
            .await
    }

    /// Returns wallet transactions.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_wallet_transaction_list(
        &self,
        params: &GetWalletTransactionListParams,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        let options = RequestOptions::get()
            .authenticated()
            .query("page_no", params.page_no)
            .query("page_size", params.page_size)
            .query_opt("create_time_from", params.create_time_from)
            .query_opt("create_time_to", params.create_time_to)
            .query_opt("wallet_type", params.wallet_type.as_deref())
            .query_opt("transaction_type", params.transaction_type.as_deref());
        self.client
            .execute("/payment/get_wallet_transaction_list", &options)
            .await
    }
}
