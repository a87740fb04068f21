//! Push (webhook) configuration and lost-message recovery.
//!
//! These are partner-level endpoints: they are signed with the partner key
//! only. To verify an incoming push, see
//! [`verify_push_signature`](crate::auth::verify_push_signature).

use serde::{Deserialize, Serialize};

use crate::clients::{ApiResponse, HttpClient, RequestOptions, ShopeeError};
use crate::managers::encode_body;

/// Push configuration sent to `/push/set_app_push_config`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PushConfig {
    /// URL push messages are delivered to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Push codes to enable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_push_config_on: Option<Vec<u32>>,
    /// Push codes to disable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_push_config_off: Option<Vec<u32>>,
    /// Shops that should not receive pushes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_shop_id_list: Option<Vec<u64>>,
}

#[derive(Serialize)]
struct ConfirmBody {
    last_message_id: u64,
}

/// Push endpoints.
#[derive(Clone, Debug)]
pub struct PushManager {
    client: HttpClient,
}

impl PushManager {
    /// Creates a manager over `client`.
    #[must_use]
    pub const fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Updates the partner's push configuration.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn set_app_push_config(
        &self,
        config: &PushConfig,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        const PATH: &str = "/push/set_app_push_config";
        let body = encode_body(PATH, config)?;
        self.client.execute(PATH, &RequestOptions::post(body)).await
    }

    /// Returns the partner's push configuration.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_app_push_config(&self) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        self.client
            .execute("/push/get_app_push_config", &RequestOptions::get())
            .await
    }

    /// Returns push messages that could not be delivered.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn get_lost_push_message(
        &self,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        self.client
            .execute("/push/get_lost_push_message", &RequestOptions::get())
            .await
    }

    /// Acknowledges lost messages up to and including `last_message_id`.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    pub async fn confirm_consumed_lost_push_message(
        &self,
        last_message_id: u64,
    ) -> Result<ApiResponse<serde_json::Value>, ShopeeError> {
        const PATH: &str = "/push/confirm_consumed_lost_push_message";
        let body = encode_body(PATH, &ConfirmBody { last_message_id })?;
        self.client.execute(PATH, &RequestOptions::post(body)).await
    }
}
