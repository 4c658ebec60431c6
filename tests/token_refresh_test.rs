//! Single 401 refresh-and-retry against a mock platform.

mod support;

use hyperwallet_sdk::auth::StaticTokenProvider;
use hyperwallet_sdk::error::{ErrorCategory, HyperwalletError};
use hyperwallet_sdk::model::{ReceiptQueryParam, TransferMethodQueryParam};
use hyperwallet_sdk::{ClientConfig, HyperwalletClient};
use std::sync::Arc;
use support::{USER_TOKEN, client_for, fixture, sequence_provider, users_path};
use tracing_test::traced_test;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn jwt_expired() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_raw(fixture("jwt_expired_response.json"), "application/json")
}

#[tokio::test]
#[traced_test]
async fn expired_token_is_refreshed_and_call_replayed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(users_path("/receipts")))
        .and(header("authorization", "Bearer token-1"))
        .respond_with(jwt_expired())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(users_path("/receipts")))
        .and(header("authorization", "Bearer token-2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(fixture("receipts_response.json"), "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (provider, source) = sequence_provider();
    let client = client_for(&server, provider.clone());

    let page = client
        .list_user_receipts(&ReceiptQueryParam::new())
        .await
        .expect("retried call should succeed")
        .expect("page expected");

    assert_eq!(page.data.len(), 2);
    assert_eq!(source.fetch_count(), 2);
    assert_eq!(provider.generation(), 2);
    assert!(logs_contain("401 received; refreshing token"));
}

#[tokio::test]
async fn second_401_is_reported_as_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(users_path("/transfer-methods")))
        .respond_with(jwt_expired())
        .expect(2)
        .mount(&server)
        .await;

    let (provider, source) = sequence_provider();
    let client = client_for(&server, provider);

    let err = client
        .list_transfer_methods(&TransferMethodQueryParam::new())
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Authentication);
    assert!(err.is_authentication_error());
    assert!(err.errors().contains_code("JWT_EXPIRED"));
    // Initial fetch plus exactly one refresh.
    assert_eq!(source.fetch_count(), 2);
}

#[tokio::test]
async fn retry_can_be_disabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(users_path("/receipts")))
        .respond_with(jwt_expired())
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .base_url(server.uri())
        .user_token(USER_TOKEN)
        .retry_401(false)
        .build_with_env(|_| None)
        .unwrap();
    let (provider, source) = sequence_provider();
    let client = HyperwalletClient::builder()
        .config(config)
        .token_provider(provider)
        .build()
        .unwrap();

    let err = client
        .list_user_receipts(&ReceiptQueryParam::new())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn cached_token_is_reused_across_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(users_path("/receipts")))
        .and(header("authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(3)
        .mount(&server)
        .await;

    let (provider, source) = sequence_provider();
    let client = client_for(&server, provider);
    for _ in 0..3 {
        let page = client
            .list_user_receipts(&ReceiptQueryParam::new())
            .await
            .unwrap();
        assert!(page.is_none());
    }
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let config = ClientConfig::builder()
        .base_url("http://127.0.0.1:9")
        .user_token(USER_TOKEN)
        .build_with_env(|_| None)
        .unwrap();
    let client = HyperwalletClient::builder()
        .config(config)
        .token_provider(Arc::new(StaticTokenProvider::new("jwt-1")))
        .build()
        .unwrap();

    let err = client
        .list_user_receipts(&ReceiptQueryParam::new())
        .await
        .unwrap_err();
    assert!(matches!(err, HyperwalletError::HttpError(_)));
    assert_eq!(err.category(), ErrorCategory::Transport);
}
