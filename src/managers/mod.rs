//! Per-domain API managers.
//!
//! Each manager wraps a clone of the shared [`HttpClient`](crate::clients::HttpClient)
//! and maps one method to one Open Platform endpoint: it builds the path,
//! method, query and body, and returns the decoded payload. Managers never
//! reinterpret transport errors.
//!
//! Managers are obtained from the [`ShopeeSdk`](crate::ShopeeSdk) facade:
//!
//! ```rust,ignore
//! let page = sdk
//!     .product()
//!     .get_item_list(&GetItemListParams::new(0, 50).item_status(vec![ItemStatus::Normal]))
//!     .await?;
//! ```

mod auth;
mod logistics;
mod order;
mod payment;
mod product;
mod public;
mod push;
mod shop;

pub use auth::AuthManager;
pub use logistics::{LogisticsManager, ShipOrderParams};
pub use order::{
    CancelOrderParams, GetOrderListParams, OrderListEntry, OrderListPage, OrderManager,
    TimeRangeField,
};
pub use payment::{GetEscrowListParams, GetWalletTransactionListParams, PaymentManager};
pub use product::{
    GetItemListParams, ItemListEntry, ItemListPage, ItemStatus, ProductManager, SearchItemParams,
};
pub use public::{PartnerPageParams, PublicManager};
pub use push::{PushConfig, PushManager};
pub use shop::{ShopInfo, ShopManager};

use serde::Serialize;

use crate::clients::{SdkError, ShopeeError};

/// Serializes a request body, attributing failures to `path`.
pub(crate) fn encode_body<T: Serialize>(
    path: &str,
    body: &T,
) -> Result<serde_json::Value, ShopeeError> {
    serde_json::to_value(body).map_err(|e| {
        SdkError::Encode {
            path: path.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Joins identifiers into the comma-separated form list endpoints expect.
pub(crate) fn join_ids<T: ToString>(ids: &[T]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids(&[1_u64, 22, 333]), "1,22,333");
        assert_eq!(join_ids::<u64>(&[]), "");
        assert_eq!(join_ids(&["240101ABC", "240101DEF"]), "240101ABC,240101DEF");
    }

    #[test]
    fn test_encode_body_failure_names_path() {
        use std::collections::HashMap;

        // Non-string map keys cannot become JSON object keys.
        let mut body: HashMap<(u8, u8), u8> = HashMap::new();
        body.insert((1, 2), 3);

        let error = encode_body("/product/add_item", &body).unwrap_err();
        assert!(matches!(
            error,
            ShopeeError::Sdk(SdkError::Encode { ref path, .. }) if path == "/product/add_item"
        ));
    }
}
