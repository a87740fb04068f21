//! Token endpoints of the Open Platform.
//!
//! Both calls are unauthenticated: they are signed with the partner key only
//! and carry the partner id in the JSON body as well as the query string.

use serde::Serialize;

use crate::auth::AccessTokenResponse;
use crate::clients::{HttpClient, RequestOptions, ShopeeError};
use crate::managers::encode_body;

const TOKEN_GET_PATH: &str = "/auth/token/get";
const ACCESS_TOKEN_GET_PATH: &str = "/auth/access_token/get";

#[derive(Debug, Serialize)]
struct TokenGetRequest<'a> {
    code: &'a str,
    partner_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    shop_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    main_account_id: Option<u64>,
}

#[derive(Debug, Serialize)]
struct AccessTokenGetRequest<'a> {
    refresh_token: &'a str,
    partner_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    shop_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_id: Option<u64>,
}

/// Exchanges authorization codes and refresh tokens for access tokens.
#[derive(Clone, Debug)]
pub struct AuthManager {
    client: HttpClient,
}

impl AuthManager {
    /// Creates a manager over `client`.
    #[must_use]
    pub const fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Exchanges an authorization `code` for a token pair.
    ///
    /// Pass `shop_id` for a shop authorization or `main_account_id` for a
    /// main-account authorization.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError::Api`] if the code is invalid or already used.
    pub async fn get_access_token(
        &self,
        code: &str,
        shop_id: Option<u64>,
        main_account_id: Option<u64>,
    ) -> Result<AccessTokenResponse, ShopeeError> {
        let partner_id = self.client.config().snapshot()?.partner_id().get();
        let body = encode_body(
            TOKEN_GET_PATH,
            &TokenGetRequest {
                code,
                partner_id,
                shop_id,
                main_account_id,
            },
        )?;

        self.client
            .execute(TOKEN_GET_PATH, &RequestOptions::post(body))
            .await
    }

    /// Exchanges a refresh token for a new token pair.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError::Api`] if the refresh token is invalid or
    /// expired.
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
        shop_id: Option<u64>,
        merchant_id: Option<u64>,
    ) -> Result<AccessTokenResponse, ShopeeError> {
        let partner_id = self.client.config().snapshot()?.partner_id().get();
        let body = encode_body(
            ACCESS_TOKEN_GET_PATH,
            &AccessTokenGetRequest {
                refresh_token,
                partner_id,
                shop_id,
                merchant_id,
            },
        )?;

        self.client
            .execute(ACCESS_TOKEN_GET_PATH, &RequestOptions::post(body))
            .await
    }
}
