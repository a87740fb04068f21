//! Signed request transport for the Shopee Open Platform.
//!
//! [`HttpClient`] executes one logical API call: it signs the request,
//! attaches shop credentials when the call needs them, normalizes the
//! response, and transparently refreshes the access token and retries once
//! when the gateway rejects it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::auth::signature::{sign_authenticated, sign_base};
use crate::auth::{Credential, CredentialProvider};
use crate::clients::errors::{ApiError, SdkError, ShopeeError};
use crate::clients::http_request::{HttpMethod, RequestOptions};
use crate::clients::http_response::{extract_api_error, ResponseEnvelope};
use crate::config::SharedConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Query keys the transport owns on every request.
const BASE_RESERVED_KEYS: [&str; 3] = ["partner_id", "timestamp", "sign"];
/// Query keys the transport owns on authenticated requests.
const AUTH_RESERVED_KEYS: [&str; 2] = ["access_token", "shop_id"];

/// HTTP transport for the Open Platform.
///
/// Cloning is cheap: clones share the connection pool, the configuration
/// handle and the credential provider.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`.
///
/// # Example
///
/// ```rust,ignore
/// use shopee_sdk::clients::{HttpClient, RequestOptions};
///
/// let client = HttpClient::new(shared_config)?.with_credentials(provider);
///
/// let options = RequestOptions::get()
///     .authenticated()
///     .query("offset", 0)
///     .query("page_size", 20)
///     .query("item_status", vec!["NORMAL"]);
///
/// let page: serde_json::Value = client.execute("/product/get_item_list", &options).await?;
/// ```
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    config: SharedConfig,
    credentials: Option<Arc<dyn CredentialProvider>>,
    user_agent: String,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_credentials", &self.credentials.is_some())
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Creates a transport without a credential provider.
    ///
    /// Such a client can only make unauthenticated calls; authenticated
    /// calls fail with [`SdkError::MissingCredential`].
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::ClientBuild`] if the proxy URL is invalid or the
    /// TLS backend cannot be initialized.
    pub fn new(config: impl Into<SharedConfig>) -> Result<Self, SdkError> {
        let config = config.into();
        let snapshot = config.snapshot()?;

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(proxy) = snapshot.proxy() {
            let proxy =
                reqwest::Proxy::all(proxy).map_err(|e| SdkError::ClientBuild(e.to_string()))?;
            builder = builder.proxy(proxy);
        }
        if let Some(timeout) = snapshot.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SdkError::ClientBuild(e.to_string()))?;

        let user_agent_prefix = snapshot
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}shopee-sdk-rust/{SDK_VERSION}");

        Ok(Self {
            client,
            config,
            credentials: None,
            user_agent,
        })
    }

    /// Returns a clone of this transport that resolves shop credentials
    /// through `provider`.
    #[must_use]
    pub fn with_credentials(&self, provider: Arc<dyn CredentialProvider>) -> Self {
        Self {
            credentials: Some(provider),
            ..self.clone()
        }
    }

    /// Returns the shared configuration handle.
    #[must_use]
    pub const fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// Returns the `User-Agent` sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Executes a call and decodes the successful body into `T`.
    ///
    /// Text bodies are decoded as a JSON string.
    ///
    /// # Errors
    ///
    /// Everything [`HttpClient::request`] returns, plus [`SdkError::Decode`]
    /// if the body does not match `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T, ShopeeError> {
        let value = self.request(path, options).await?.into_value();
        serde_json::from_value(value).map_err(|e| {
            SdkError::Decode {
                path: path.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Executes a call and returns the normalized body.
    ///
    /// For authenticated calls the current credential is fetched first and
    /// refreshed if it has expired. If the gateway answers with the
    /// invalid-access-token error, the credential is refreshed once and the
    /// whole request is rebuilt (new timestamp, new signature) and sent
    /// again. Should that refresh fail, the original error is returned.
    ///
    /// The HTTP status never decides the outcome on its own: a JSON body
    /// without a truthy `error` field and any text body are returned as
    /// success, for non-2xx statuses too.
    ///
    /// # Errors
    ///
    /// - [`ShopeeError::Api`] when the body carries an `error` code
    /// - [`ShopeeError::Sdk`] for missing credentials, network failures and
    ///   unreadable responses
    pub async fn request(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<ResponseEnvelope, ShopeeError> {
        let credential = if options.auth {
            Some(self.resolve_credential().await?)
        } else {
            None
        };

        let error = match self.dispatch(path, options, credential.as_ref(), 1).await {
            Err(ShopeeError::Api(error)) if options.auth && error.is_invalid_access_token() => {
                error
            }
            other => return other,
        };

        let Some(fresh) = self.refresh_after_rejection(credential.as_ref(), &error).await else {
            return Err(error.into());
        };
        self.dispatch(path, options, Some(&fresh), 2).await
    }

    /// Fetches the current credential, refreshing it first if expired.
    async fn resolve_credential(&self) -> Result<Credential, ShopeeError> {
        let provider = self
            .credentials
            .as_ref()
            .ok_or(SdkError::MissingCredential)?;

        let current = provider
            .current()
            .await?
            .ok_or(SdkError::MissingCredential)?;
        if !current.expired() {
            return Ok(current);
        }

        tracing::info!(
            "Access token for shop {:?} expired at {:?}, refreshing before request",
            current.shop_id,
            current.expired_at
        );
        provider
            .refresh(Some(&current))
            .await?
            .ok_or_else(|| SdkError::MissingCredential.into())
    }

    async fn refresh_after_rejection(
        &self,
        rejected: Option<&Credential>,
        error: &ApiError,
    ) -> Option<Credential> {
        let provider = self.credentials.as_ref()?;

        tracing::warn!(
            "Access token rejected (request_id: {:?}), refreshing and retrying once",
            error.request_id
        );
        match provider.refresh(rejected).await {
            Ok(Some(credential)) => Some(credential),
            Ok(None) => {
                tracing::warn!("Token refresh returned no credential, giving up");
                None
            }
            Err(refresh_error) => {
                tracing::warn!("Token refresh failed, giving up: {}", refresh_error);
                None
            }
        }
    }

    /// Builds, signs and sends one HTTP request.
    async fn dispatch(
        &self,
        path: &str,
        options: &RequestOptions,
        credential: Option<&Credential>,
        attempt: u8,
    ) -> Result<ResponseEnvelope, ShopeeError> {
        let config = self.config.snapshot()?;
        let partner_id = config.partner_id().get();
        let partner_key = config.partner_key().as_ref();
        let timestamp = Utc::now().timestamp();

        let mut query = vec![
            ("partner_id".to_string(), partner_id.to_string()),
            ("timestamp".to_string(), timestamp.to_string()),
        ];
        for (key, value) in &options.params {
            let reserved = BASE_RESERVED_KEYS.contains(&key.as_str())
                || (credential.is_some() && AUTH_RESERVED_KEYS.contains(&key.as_str()));
            if reserved {
                tracing::warn!("Ignoring caller-supplied reserved query parameter '{}'", key);
                continue;
            }
            query.extend(value.expand(key));
        }

        let signature = match credential {
            Some(credential) => {
                let shop_id = credential
                    .shop_id
                    .or_else(|| config.shop_id())
                    .ok_or(SdkError::MissingShopId)?;
                query.push(("access_token".to_string(), credential.access_token.clone()));
                query.push(("shop_id".to_string(), shop_id.to_string()));
                sign_authenticated(
                    partner_key,
                    partner_id,
                    path,
                    timestamp,
                    &credential.access_token,
                    shop_id,
                )
            }
            None => sign_base(partner_key, partner_id, path, timestamp),
        };
        query.push(("sign".to_string(), signature));

        let url = build_url(config.base_url().as_ref(), path, &query);

        // Header names are case-insensitive; normalize so overrides replace defaults.
        let mut headers: HashMap<String, String> = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        headers.insert("user-agent".to_string(), self.user_agent.clone());
        for (key, value) in &options.headers {
            headers.insert(key.to_ascii_lowercase(), value.clone());
        }

        let mut req_builder = self.client.request(to_reqwest_method(options.method), &url);
        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }
        if options.method != HttpMethod::Get {
            if let Some(body) = &options.body {
                req_builder = req_builder.body(body.to_string());
            }
        }
        if let Some(timeout) = options.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        tracing::debug!(
            "Sending {} {} (attempt {}, authenticated: {})",
            options.method,
            path,
            attempt,
            credential.is_some()
        );

        let res = req_builder.send().await.map_err(SdkError::from)?;
        let status = res.status().as_u16();
        let content_type = res
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = res.text().await.map_err(SdkError::from)?;

        let parsed = parse_response(status, &content_type, text);
        if let Err(ShopeeError::Api(error)) = &parsed {
            tracing::debug!(
                "{} {} failed with '{}' (HTTP {}, request_id: {:?})",
                options.method,
                path,
                error.error,
                status,
                error.request_id
            );
        }
        parsed
    }
}

const fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// Joins `base` and `path` and appends the percent-encoded query pairs.
pub(crate) fn build_url(base: &str, path: &str, query: &[(String, String)]) -> String {
    let separator = if path.starts_with('/') { "" } else { "/" };
    let query_string = query
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    if query_string.is_empty() {
        format!("{base}{separator}{path}")
    } else {
        format!("{base}{separator}{path}?{query_string}")
    }
}

/// Turns a raw response into a success envelope or an error.
pub(crate) fn parse_response(
    status: u16,
    content_type: &str,
    text: String,
) -> Result<ResponseEnvelope, ShopeeError> {
    if content_type.contains("application/json") || content_type.contains("+json") {
        let value = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| SdkError::InvalidJson {
                status,
                message: e.to_string(),
            })?
        };
        if let Some(error) = extract_api_error(status, &value) {
            return Err(error.into());
        }
        return Ok(ResponseEnvelope::Json(value));
    }

    if content_type.starts_with("text/") {
        return Ok(ResponseEnvelope::Text(text));
    }

    Err(SdkError::UnknownResponseType {
        content_type: content_type.to_string(),
        status,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PartnerId, PartnerKey, ShopeeConfig};
    use serde_json::json;

    fn create_test_config() -> ShopeeConfig {
        ShopeeConfig::builder()
            .partner_id(PartnerId::new(12345).unwrap())
            .partner_key(PartnerKey::new("k").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_url_repeats_list_keys_and_encodes() {
        let query = vec![
            ("item_status".to_string(), "NORMAL".to_string()),
            ("item_status".to_string(), "BANNED".to_string()),
            ("redirect".to_string(), "https://a.b/c?d=e".to_string()),
        ];
        assert_eq!(
            build_url("https://host/api/v2", "/product/get_item_list", &query),
            concat!(
                "https://host/api/v2/product/get_item_list",
                "?item_status=NORMAL&item_status=BANNED",
                "&redirect=https%3A%2F%2Fa.b%2Fc%3Fd%3De",
            )
        );
    }

    #[test]
    fn test_build_url_adds_missing_slash() {
        assert_eq!(
            build_url("https://host", "shop/get_shop_info", &[]),
            "https://host/shop/get_shop_info"
        );
    }

    #[test]
    fn test_parse_json_success() {
        let parsed = parse_response(
            200,
            "application/json; charset=utf-8",
            r#"{"error":"","response":{"a":1}}"#.to_string(),
        )
        .unwrap();
        assert_eq!(
            parsed,
            ResponseEnvelope::Json(json!({"error": "", "response": {"a": 1}}))
        );
    }

    #[test]
    fn test_parse_json_scalar_body() {
        assert_eq!(
            parse_response(200, "application/json", "42".to_string()).unwrap(),
            ResponseEnvelope::Json(json!(42))
        );
        assert_eq!(
            parse_response(200, "application/json", "\"ok\"".to_string()).unwrap(),
            ResponseEnvelope::Json(json!("ok"))
        );
    }

    #[test]
    fn test_parse_json_error_field() {
        let result = parse_response(
            200,
            "application/json",
            r#"{"error":"error_param","message":"bad"}"#.to_string(),
        );
        match result {
            Err(ShopeeError::Api(error)) => {
                assert_eq!(error.error, "error_param");
                assert_eq!(error.message, "bad");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_text_body() {
        assert_eq!(
            parse_response(200, "text/plain", "pong".to_string()).unwrap(),
            ResponseEnvelope::Text("pong".to_string())
        );
    }

    #[test]
    fn test_parse_unknown_content_type() {
        let result = parse_response(200, "application/octet-stream", String::new());
        match result {
            Err(ShopeeError::Sdk(SdkError::UnknownResponseType { content_type, .. })) => {
                assert_eq!(content_type, "application/octet-stream");
            }
            other => panic!("expected unknown response type, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_malformed_json() {
        let result = parse_response(200, "application/json", "{not json".to_string());
        assert!(matches!(
            result,
            Err(ShopeeError::Sdk(SdkError::InvalidJson { status: 200, .. }))
        ));
    }

    #[test]
    fn test_user_agent_has_sdk_name_and_prefix() {
        let client = HttpClient::new(create_test_config()).unwrap();
        assert!(client.user_agent().starts_with("shopee-sdk-rust/"));

        let prefixed = ShopeeConfig::builder()
            .partner_id(PartnerId::new(1).unwrap())
            .partner_key(PartnerKey::new("k").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(prefixed).unwrap();
        assert!(client.user_agent().starts_with("MyApp/1.0 | shopee-sdk-rust/"));
    }

    #[test]
    fn test_invalid_proxy_is_rejected() {
        let config = ShopeeConfig::builder()
            .partner_id(PartnerId::new(1).unwrap())
            .partner_key(PartnerKey::new("k").unwrap())
            .proxy("::not a url::")
            .build()
            .unwrap();
        assert!(matches!(HttpClient::new(config), Err(SdkError::ClientBuild(_))));
    }

    #[tokio::test]
    async fn test_authenticated_call_without_provider_fails_fast() {
        let client = HttpClient::new(create_test_config()).unwrap();
        let result = client
            .request("/shop/get_shop_info", &RequestOptions::get().authenticated())
            .await;
        assert!(matches!(result, Err(ShopeeError::Sdk(SdkError::MissingCredential))));
    }
}
