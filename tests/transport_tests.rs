//! Integration tests for the signed request transport.
//!
//! These tests run the transport against a local mock server and verify
//! signing, query hygiene, credential handling, the one-shot token refresh
//! and response normalization.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use shopee_sdk::auth::signature::{sign_authenticated, sign_base};
use shopee_sdk::auth::{Credential, CredentialProvider};
use shopee_sdk::clients::{
    HttpClient, QueryValue, RequestOptions, ResponseEnvelope, SdkError, ShopeeError,
};
use shopee_sdk::{BaseUrl, PartnerId, PartnerKey, ShopeeConfig};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

fn config_for(base_url: &str) -> ShopeeConfig {
    ShopeeConfig::builder()
        .partner_id(PartnerId::new(12345).unwrap())
        .partner_key(PartnerKey::new("k").unwrap())
        .base_url(BaseUrl::new(base_url).unwrap())
        .shop_id(777)
        .build()
        .unwrap()
}

fn valid_credential(token: &str) -> Credential {
    Credential::new(token, "refresh", Some(777), None)
        .with_expiry(Utc::now() + chrono::Duration::hours(4))
}

fn expired_credential(token: &str) -> Credential {
    Credential::new(token, "refresh", Some(777), None)
        .with_expiry(Utc::now() - chrono::Duration::minutes(1))
}

/// Provider that hands out a fixed credential and counts refreshes.
struct CountingProvider {
    current: Mutex<Option<Credential>>,
    refreshed: Option<Credential>,
    refresh_fails: bool,
    refreshes: AtomicUsize,
}

impl CountingProvider {
    fn new(current: Option<Credential>, refreshed: Option<Credential>) -> Arc<Self> {
        Arc::new(Self {
            current: Mutex::new(current),
            refreshed,
            refresh_fails: false,
            refreshes: AtomicUsize::new(0),
        })
    }

    fn failing(current: Credential) -> Arc<Self> {
        Arc::new(Self {
            current: Mutex::new(Some(current)),
            refreshed: None,
            refresh_fails: true,
            refreshes: AtomicUsize::new(0),
        })
    }

    fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialProvider for CountingProvider {
    async fn current(&self) -> Result<Option<Credential>, ShopeeError> {
        Ok(self.current.lock().unwrap().clone())
    }

    async fn refresh(
        &self,
        _stale: Option<&Credential>,
    ) -> Result<Option<Credential>, ShopeeError> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        if self.refresh_fails {
            return Err(SdkError::MissingCredential.into());
        }
        if let Some(fresh) = &self.refreshed {
            *self.current.lock().unwrap() = Some(fresh.clone());
        }
        Ok(self.refreshed.clone())
    }
}

fn query_values(request: &wiremock::Request, key: &str) -> Vec<String> {
    request
        .url
        .query_pairs()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .collect()
}

fn single_query_value(request: &wiremock::Request, key: &str) -> String {
    let values = query_values(request, key);
    assert_eq!(values.len(), 1, "expected exactly one '{key}' parameter");
    values[0].clone()
}

fn ok_body() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "request_id": "req-ok",
        "error": "",
        "message": "",
        "response": {"ok": true}
    }))
}

fn invalid_token_body() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "request_id": "req-expired",
        "error": "invalid_acceess_token",
        "message": "Invalid access_token."
    }))
}

// ============================================================================
// Signing and query hygiene
// ============================================================================

#[tokio::test]
async fn test_unauthenticated_request_is_signed_with_base_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/get_shopee_ip_ranges"))
        .respond_with(ok_body())
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(config_for(&server.uri())).unwrap();
    let result = client
        .request("/public/get_shopee_ip_ranges", &RequestOptions::get())
        .await
        .unwrap();
    assert!(result.as_json().is_some());

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    let timestamp: i64 = single_query_value(request, "timestamp").parse().unwrap();

    assert_eq!(single_query_value(request, "partner_id"), "12345");
    assert_eq!(
        single_query_value(request, "sign"),
        sign_base("k", 12345, "/public/get_shopee_ip_ranges", timestamp)
    );
    assert!(query_values(request, "access_token").is_empty());
    assert!(query_values(request, "shop_id").is_empty());
}

#[tokio::test]
async fn test_authenticated_request_attaches_token_and_shop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shop/get_shop_info"))
        .respond_with(ok_body())
        .mount(&server)
        .await;

    let provider = CountingProvider::new(Some(valid_credential("tok")), None);
    let client = HttpClient::new(config_for(&server.uri()))
        .unwrap()
        .with_credentials(provider.clone());

    client
        .request("/shop/get_shop_info", &RequestOptions::get().authenticated())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    let timestamp: i64 = single_query_value(request, "timestamp").parse().unwrap();

    assert_eq!(single_query_value(request, "access_token"), "tok");
    assert_eq!(single_query_value(request, "shop_id"), "777");
    assert_eq!(
        single_query_value(request, "sign"),
        sign_authenticated("k", 12345, "/shop/get_shop_info", timestamp, "tok", 777)
    );
    assert_eq!(provider.refresh_count(), 0);
}

#[tokio::test]
async fn test_caller_cannot_override_reserved_query_keys() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok_body())
        .mount(&server)
        .await;

    let provider = CountingProvider::new(Some(valid_credential("tok")), None);
    let client = HttpClient::new(config_for(&server.uri()))
        .unwrap()
        .with_credentials(provider);

    let options = RequestOptions::get()
        .authenticated()
        .query("sign", "forged")
        .query("timestamp", 1)
        .query("partner_id", 999)
        .query("access_token", "other")
        .query("shop_id", 1);
    client.request("/shop/get_profile", &options).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    assert_ne!(single_query_value(request, "sign"), "forged");
    assert_ne!(single_query_value(request, "timestamp"), "1");
    assert_eq!(single_query_value(request, "partner_id"), "12345");
    assert_eq!(single_query_value(request, "access_token"), "tok");
    assert_eq!(single_query_value(request, "shop_id"), "777");
}

#[tokio::test]
async fn test_list_params_repeat_and_falsy_values_survive() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok_body())
        .mount(&server)
        .await;

    let client = HttpClient::new(config_for(&server.uri())).unwrap();
    let options = RequestOptions::get()
        .query("item_status", vec!["NORMAL", "BANNED"])
        .query("offset", 0)
        .query("need_tax_info", false)
        .query("item_name", "")
        .query("language", QueryValue::Null)
        .query_opt("cursor", None::<&str>);
    client.request("/product/get_item_list", &options).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    assert_eq!(query_values(request, "item_status"), vec!["NORMAL", "BANNED"]);
    assert_eq!(single_query_value(request, "offset"), "0");
    assert_eq!(single_query_value(request, "need_tax_info"), "false");
    assert_eq!(single_query_value(request, "item_name"), "");
    assert_eq!(single_query_value(request, "language"), "null");
    assert!(query_values(request, "cursor").is_empty());
}

#[tokio::test]
async fn test_post_sends_json_body_and_caller_headers_win() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/order/set_note"))
        .and(header("user-agent", "custom-agent"))
        .and(header("x-trace", "abc"))
        .and(body_json(json!({"order_sn": "SN1", "note": "fragile"})))
        .respond_with(ok_body())
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(config_for(&server.uri())).unwrap();
    let options = RequestOptions::post(json!({"order_sn": "SN1", "note": "fragile"}))
        .header("User-Agent", "custom-agent")
        .header("X-Trace", "abc");

    let result = client.request("/order/set_note", &options).await;
    assert!(result.is_ok(), "request did not match: {result:?}");
}

#[tokio::test]
async fn test_default_headers_identify_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("content-type", "application/json"))
        .and(header(
            "user-agent",
            format!("shopee-sdk-rust/{}", shopee_sdk::clients::SDK_VERSION).as_str(),
        ))
        .respond_with(ok_body())
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(config_for(&server.uri())).unwrap();
    assert!(client
        .request("/public/get_shopee_ip_ranges", &RequestOptions::get())
        .await
        .is_ok());
}

// ============================================================================
// Credentials and refresh
// ============================================================================

#[tokio::test]
async fn test_missing_credential_fails_without_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok_body())
        .expect(0)
        .mount(&server)
        .await;

    let provider = CountingProvider::new(None, None);
    let client = HttpClient::new(config_for(&server.uri()))
        .unwrap()
        .with_credentials(provider);

    let result = client
        .request("/shop/get_shop_info", &RequestOptions::get().authenticated())
        .await;
    assert!(matches!(
        result,
        Err(ShopeeError::Sdk(SdkError::MissingCredential))
    ));
}

#[tokio::test]
async fn test_expired_credential_is_refreshed_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("access_token", "fresh"))
        .respond_with(ok_body())
        .expect(1)
        .mount(&server)
        .await;

    let provider = CountingProvider::new(
        Some(expired_credential("stale")),
        Some(valid_credential("fresh")),
    );
    let client = HttpClient::new(config_for(&server.uri()))
        .unwrap()
        .with_credentials(provider.clone());

    client
        .request("/shop/get_shop_info", &RequestOptions::get().authenticated())
        .await
        .unwrap();
    assert_eq!(provider.refresh_count(), 1);
}

#[tokio::test]
async fn test_invalid_token_triggers_one_refresh_and_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("access_token", "stale"))
        .respond_with(invalid_token_body())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("access_token", "fresh"))
        .respond_with(ok_body())
        .expect(1)
        .mount(&server)
        .await;

    let provider = CountingProvider::new(
        Some(valid_credential("stale")),
        Some(valid_credential("fresh")),
    );
    let client = HttpClient::new(config_for(&server.uri()))
        .unwrap()
        .with_credentials(provider.clone());

    let result = client
        .request("/product/get_item_list", &RequestOptions::get().authenticated())
        .await
        .unwrap();
    assert_eq!(result.as_json().unwrap()["request_id"], "req-ok");
    assert_eq!(provider.refresh_count(), 1);

    // The retry is signed again with the new token.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let retry = &requests[1];
    let timestamp: i64 = single_query_value(retry, "timestamp").parse().unwrap();
    assert_eq!(
        single_query_value(retry, "sign"),
        sign_authenticated("k", 12345, "/product/get_item_list", timestamp, "fresh", 777)
    );
}

#[tokio::test]
async fn test_second_invalid_token_is_returned_as_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(invalid_token_body())
        .expect(2)
        .mount(&server)
        .await;

    let provider = CountingProvider::new(
        Some(valid_credential("stale")),
        Some(valid_credential("also-rejected")),
    );
    let client = HttpClient::new(config_for(&server.uri()))
        .unwrap()
        .with_credentials(provider.clone());

    let result = client
        .request("/order/get_order_list", &RequestOptions::get().authenticated())
        .await;

    let error = result.unwrap_err();
    let api = error.as_api().expect("expected an API error");
    assert!(api.is_invalid_access_token());
    assert_eq!(provider.refresh_count(), 1);
}

#[tokio::test]
async fn test_failed_refresh_returns_original_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(invalid_token_body())
        .expect(1)
        .mount(&server)
        .await;

    let provider = CountingProvider::failing(valid_credential("stale"));
    let client = HttpClient::new(config_for(&server.uri()))
        .unwrap()
        .with_credentials(provider.clone());

    let result = client
        .request("/shop/get_shop_info", &RequestOptions::get().authenticated())
        .await;

    match result {
        Err(ShopeeError::Api(error)) => {
            assert_eq!(error.error, "invalid_acceess_token");
            assert_eq!(error.request_id.as_deref(), Some("req-expired"));
        }
        other => panic!("expected the original API error, got {other:?}"),
    }
    assert_eq!(provider.refresh_count(), 1);
}

#[tokio::test]
async fn test_refresh_yielding_nothing_returns_original_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(invalid_token_body())
        .expect(1)
        .mount(&server)
        .await;

    let provider = CountingProvider::new(Some(valid_credential("stale")), None);
    let client = HttpClient::new(config_for(&server.uri()))
        .unwrap()
        .with_credentials(provider.clone());

    let result = client
        .request("/shop/get_shop_info", &RequestOptions::get().authenticated())
        .await;
    assert!(result.unwrap_err().as_api().unwrap().is_invalid_access_token());
}

#[tokio::test]
async fn test_unauthenticated_call_never_refreshes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(invalid_token_body())
        .expect(1)
        .mount(&server)
        .await;

    let provider = CountingProvider::new(
        Some(valid_credential("tok")),
        Some(valid_credential("fresh")),
    );
    let client = HttpClient::new(config_for(&server.uri()))
        .unwrap()
        .with_credentials(provider.clone());

    let result = client
        .request("/public/get_shops_by_partner", &RequestOptions::get())
        .await;
    assert!(result.is_err());
    assert_eq!(provider.refresh_count(), 0);
}

// ============================================================================
// Response normalization
// ============================================================================

#[tokio::test]
async fn test_error_field_in_200_response_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_id": "req-1",
            "error": "error_param",
            "message": "Wrong parameters"
        })))
        .mount(&server)
        .await;

    let client = HttpClient::new(config_for(&server.uri())).unwrap();
    let error = client
        .request("/product/get_category", &RequestOptions::get())
        .await
        .unwrap_err();

    let api = error.as_api().unwrap();
    assert_eq!(api.status, 200);
    assert_eq!(api.error, "error_param");
    assert_eq!(api.message, "Wrong parameters");
    assert_eq!(api.request_id.as_deref(), Some("req-1"));
}

#[tokio::test]
async fn test_json_scalar_body_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("42", "application/json"))
        .mount(&server)
        .await;

    let client = HttpClient::new(config_for(&server.uri())).unwrap();
    let result = client
        .request("/public/ping", &RequestOptions::get())
        .await
        .unwrap();
    assert_eq!(result, ResponseEnvelope::Json(json!(42)));
}

#[tokio::test]
async fn test_non_2xx_json_without_error_is_returned_as_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "request_id": "req-busy",
            "message": "service busy"
        })))
        .mount(&server)
        .await;

    let client = HttpClient::new(config_for(&server.uri())).unwrap();
    let result = client
        .request("/public/ping", &RequestOptions::get())
        .await
        .unwrap();
    assert_eq!(result.as_json().unwrap()["message"], "service busy");
}

#[tokio::test]
async fn test_text_body_is_returned_raw() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&server)
        .await;

    let client = HttpClient::new(config_for(&server.uri())).unwrap();
    let result = client
        .request("/public/ping", &RequestOptions::get())
        .await
        .unwrap();
    assert_eq!(result.as_text(), Some("pong"));
}

#[tokio::test]
async fn test_unknown_content_type_is_sdk_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(vec![0_u8, 1, 2], "application/octet-stream"),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new(config_for(&server.uri())).unwrap();
    let result = client
        .request("/media/download", &RequestOptions::get())
        .await;

    match result {
        Err(ShopeeError::Sdk(SdkError::UnknownResponseType { content_type, .. })) => {
            assert!(content_type.starts_with("application/octet-stream"));
        }
        other => panic!("expected UnknownResponseType, got {other:?}"),
    }
}

#[tokio::test]
async fn test_execute_decodes_typed_payload() {
    #[derive(serde::Deserialize)]
    struct Ranges {
        request_id: String,
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok_body())
        .mount(&server)
        .await;

    let client = HttpClient::new(config_for(&server.uri())).unwrap();
    let ranges: Ranges = client
        .execute("/public/get_shopee_ip_ranges", &RequestOptions::get())
        .await
        .unwrap();
    assert_eq!(ranges.request_id, "req-ok");
}

#[tokio::test]
async fn test_network_failure_is_wrapped() {
    // Nothing listens on port 1.
    let client = HttpClient::new(config_for("http://127.0.0.1:1")).unwrap();
    let result = client
        .request(
            "/public/get_shopee_ip_ranges",
            &RequestOptions::get().timeout(Duration::from_secs(5)),
        )
        .await;

    match result {
        Err(ShopeeError::Sdk(SdkError::Network { message, .. })) => assert!(!message.is_empty()),
        other => panic!("expected a network error, got {other:?}"),
    }
}
