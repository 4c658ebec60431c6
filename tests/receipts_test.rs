//! Receipt listing, including the listener form and error mapping.

mod support;

use hyperwallet_sdk::auth::StaticTokenProvider;
use hyperwallet_sdk::dispatch::{FnListener, QueueScheduler, Scheduler};
use hyperwallet_sdk::error::{ErrorCategory, HyperwalletError};
use hyperwallet_sdk::model::{Entry, PageList, Receipt, ReceiptQueryParam};
use std::sync::{Arc, Mutex};
use support::{client_for, config_for, fixture, users_path};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn receipts_body() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(fixture("receipts_response.json"), "application/json")
}

#[tokio::test]
async fn list_user_receipts_uses_default_paging() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(users_path("/receipts")))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "0"))
        .respond_with(receipts_body())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(StaticTokenProvider::new("jwt-1")));
    let page = client
        .list_user_receipts(&ReceiptQueryParam::new())
        .await
        .unwrap()
        .expect("page expected");

    assert_eq!(page.count, 2);
    assert_eq!(page.limit, 10);
    assert_eq!(page.offset, 0);
    assert_eq!(page.data.len(), 2);

    let first = &page.data[0];
    assert_eq!(first.journal_id(), Some("3051579"));
    assert_eq!(first.entry_kind(), Some(Entry::Credit));
    assert_eq!(first.amount(), Some("20.00"));
    let details = first.details().expect("details");
    assert_eq!(details.client_payment_id(), Some("8OxXefx5"));

    assert_eq!(page.data[1].entry_kind(), Some(Entry::Debit));
    let next = page.next_page_link().expect("next link");
    assert!(next.href.ends_with("receipts?offset=10&limit=10"));
    assert!(page.previous_page_link().is_none());
}

#[tokio::test]
async fn list_user_receipts_forwards_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(users_path("/receipts")))
        .and(query_param("currency", "USD"))
        .and(query_param("limit", "20"))
        .and(query_param("createdAfter", "2019-06-20T10:21:19"))
        .respond_with(receipts_body())
        .expect(1)
        .mount(&server)
        .await;

    let after = chrono::NaiveDate::from_ymd_opt(2019, 6, 20)
        .and_then(|d| d.and_hms_opt(10, 21, 19))
        .unwrap();
    let client = client_for(&server, Arc::new(StaticTokenProvider::new("jwt-1")));
    let page = client
        .list_user_receipts(
            &ReceiptQueryParam::new()
                .currency("USD")
                .limit(20)
                .created_after(after),
        )
        .await
        .unwrap();
    assert!(page.is_some());
}

#[tokio::test]
async fn list_user_receipts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(users_path("/receipts")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(StaticTokenProvider::new("jwt-1")));
    let page = client
        .list_user_receipts(&ReceiptQueryParam::new())
        .await
        .unwrap();
    assert!(page.is_none());
}

#[tokio::test]
async fn list_user_receipts_system_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(users_path("/receipts")))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_raw(fixture("system_error_response.json"), "application/json"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(StaticTokenProvider::new("jwt-1")));
    let err = client
        .list_user_receipts(&ReceiptQueryParam::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.category(), ErrorCategory::System);
    assert!(err.errors().contains_code("SYSTEM_ERROR"));
}

#[tokio::test]
async fn list_user_receipts_non_json_error_body_gets_synthetic_entry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(users_path("/receipts")))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(StaticTokenProvider::new("jwt-1")));
    let err = client
        .list_user_receipts(&ReceiptQueryParam::new())
        .await
        .unwrap_err();

    let errors = err.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors[0].code, "EC_UNEXPECTED_EXCEPTION");
}

#[tokio::test]
async fn list_prepaid_card_receipts_targets_card_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(users_path("/prepaid-cards/trm-prepaid-1/receipts")))
        .respond_with(receipts_body())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(StaticTokenProvider::new("jwt-1")));
    let page = client
        .list_prepaid_card_receipts("trm-prepaid-1", &ReceiptQueryParam::new())
        .await
        .unwrap()
        .expect("page expected");
    assert_eq!(page.data.len(), 2);
}

#[tokio::test]
async fn listener_form_delivers_on_the_scheduler() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(users_path("/receipts")))
        .respond_with(receipts_body())
        .mount(&server)
        .await;

    let (scheduler, mut queue) = QueueScheduler::new();
    let scheduler: Arc<dyn Scheduler> = Arc::new(scheduler);
    let client = hyperwallet_sdk::HyperwalletClient::builder()
        .config(config_for(&server))
        .token_provider(Arc::new(StaticTokenProvider::new("jwt-1")))
        .scheduler(scheduler)
        .build()
        .unwrap();

    let received: Arc<Mutex<Vec<usize>>> = Arc::default();
    let failures: Arc<Mutex<Vec<HyperwalletError>>> = Arc::default();
    let (ok, failed) = (received.clone(), failures.clone());
    let handle = client
        .list_user_receipts_with_listener(
            &ReceiptQueryParam::new(),
            FnListener::new(
                move |page: Option<PageList<Receipt>>| {
                    ok.lock().unwrap().push(page.map(|p| p.data.len()).unwrap_or(0));
                },
                move |e: HyperwalletError| failed.lock().unwrap().push(e),
            ),
        )
        .expect("runtime available");
    handle.await.unwrap();

    // Nothing is delivered until the queue owner drains it.
    assert!(received.lock().unwrap().is_empty());
    assert_eq!(queue.run_pending(), 1);
    assert_eq!(*received.lock().unwrap(), vec![2]);
    assert!(failures.lock().unwrap().is_empty());
}

#[tokio::test]
async fn listener_form_reports_failure_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(users_path("/receipts")))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_raw(fixture("system_error_response.json"), "application/json"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(StaticTokenProvider::new("jwt-1")));
    let successes = Arc::new(Mutex::new(0usize));
    let failures: Arc<Mutex<Vec<HyperwalletError>>> = Arc::default();
    let (ok, failed) = (successes.clone(), failures.clone());
    client
        .list_user_receipts_with_listener(
            &ReceiptQueryParam::new(),
            FnListener::new(
                move |_page: Option<PageList<Receipt>>| *ok.lock().unwrap() += 1,
                move |e: HyperwalletError| failed.lock().unwrap().push(e),
            ),
        )
        .expect("runtime available")
        .await
        .unwrap();

    assert_eq!(*successes.lock().unwrap(), 0);
    let failures = failures.lock().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].status(), Some(500));
}
