//! Integration tests for the delivery pipeline against mock HTTP services
//!
//! **Coverage:**
//! - Happy path: upload → store URL → notify → receipt
//! - Notify failure after a successful upload keeps the stored URL for a
//!   stage-level retry (`notify_existing`)
//! - Upload failure surfaces as the upload stage, nothing is notified
//! - Missing recipient short-circuits before any network traffic
//! - A gateway that answers `{"sent": false}` counts as a notify failure
//!
//! **Infrastructure:**
//! - WireMock HTTP servers (one per external service)
//! - Real `DeliveryService` with the HTTP adapters behind its ports

use std::sync::Arc;
use std::time::Duration;

use tilequote_domain::{DeliveryError, QuotationForm, QuoteError};
use tilequote_infra::delivery::DeliveryService;
use tilequote_infra::http::HttpClient;
use tilequote_infra::messaging::WhatsAppGateway;
use tilequote_infra::storage::HttpObjectStore;
use wiremock::matchers::{body_json_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STORED_URL: &str = "https://cdn.example.com/Quotation_Acme-Interiors_01-04-2025.pdf";

fn quick_client(attempts: usize) -> HttpClient {
    HttpClient::builder()
        .timeout(Duration::from_secs(5))
        .max_attempts(attempts)
        .base_backoff(Duration::from_millis(1))
        .build()
        .expect("failed to build test client")
}

fn sample_form() -> QuotationForm {
    QuotationForm {
        customer_name: "Acme Interiors".into(),
        mobile: "+911234567890".into(),
        ..Default::default()
    }
}

fn date() -> chrono::DateTime<chrono::FixedOffset> {
    chrono::DateTime::parse_from_rfc3339("2025-04-01T14:30:00+05:30")
        .expect("valid RFC 3339 timestamp")
}

async fn service(store_server: &MockServer, gateway_server: &MockServer) -> DeliveryService {
    let store = HttpObjectStore::new(quick_client(2), store_server.uri());
    // The gateway never retries; a duplicate notification is worse than a
    // failed one.
    let gateway = WhatsAppGateway::new(quick_client(1), gateway_server.uri());
    DeliveryService::new(Arc::new(store), Arc::new(gateway))
}

#[tokio::test]
async fn upload_and_notify_happy_path() {
    let store_server = MockServer::start().await;
    let gateway_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/documents"))
        .and(query_param("file_name", "Quotation_Acme-Interiors_01-04-2025.pdf"))
        .and(header("content-type", "application/pdf"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "url": STORED_URL })),
        )
        .expect(1)
        .mount(&store_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "sent": true })),
        )
        .expect(1)
        .mount(&gateway_server)
        .await;

    let service = service(&store_server, &gateway_server).await;
    let receipt = service
        .upload_and_notify(b"%PDF-1.4 test", &sample_form(), date())
        .await
        .expect("delivery should succeed");

    assert_eq!(receipt.url, STORED_URL);
}

#[tokio::test]
async fn notify_failure_keeps_the_stored_url_for_retry() {
    let store_server = MockServer::start().await;
    let gateway_server = MockServer::start().await;

    // The upload must happen exactly once across the failed delivery and
    // the retry: retrying the notify step must not re-upload.
    Mock::given(method("POST"))
        .and(path("/documents"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "url": STORED_URL })),
        )
        .expect(1)
        .mount(&store_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&gateway_server)
        .await;

    let service = service(&store_server, &gateway_server).await;
    let err = service
        .upload_and_notify(b"%PDF-1.4 test", &sample_form(), date())
        .await
        .expect_err("notify should fail");

    let stored = match &err {
        QuoteError::Delivery(stage @ DeliveryError::Notify { .. }) => {
            stage.stored_url().expect("notify errors carry the stored URL").to_string()
        }
        other => panic!("expected a notify-stage error, got {other:?}"),
    };
    assert_eq!(stored, STORED_URL);

    // The gateway recovers; retry only the notify step.
    gateway_server.reset().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "sent": true })),
        )
        .expect(1)
        .mount(&gateway_server)
        .await;

    service
        .notify_existing(&stored, &sample_form())
        .await
        .expect("retrying the notify step should succeed");
}

#[tokio::test]
async fn upload_failure_is_the_upload_stage_and_nothing_is_notified() {
    let store_server = MockServer::start().await;
    let gateway_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/documents"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&store_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&gateway_server)
        .await;

    let service = service(&store_server, &gateway_server).await;
    let err = service
        .upload_and_notify(b"%PDF-1.4 test", &sample_form(), date())
        .await
        .expect_err("upload should fail");

    assert!(
        matches!(err, QuoteError::Delivery(DeliveryError::Upload { .. })),
        "expected an upload-stage error, got {err:?}"
    );
}

#[tokio::test]
async fn missing_recipient_fails_before_any_network_call() {
    let store_server = MockServer::start().await;
    let gateway_server = MockServer::start().await;

    Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&store_server).await;
    Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&gateway_server).await;

    let form = QuotationForm {
        customer_name: "Acme Interiors".into(),
        mobile: "   ".into(),
        ..Default::default()
    };

    let service = service(&store_server, &gateway_server).await;
    let err = service
        .upload_and_notify(b"%PDF-1.4 test", &form, date())
        .await
        .expect_err("a blank mobile number should be rejected");

    assert!(matches!(err, QuoteError::Delivery(DeliveryError::MissingRecipient)));
}

#[tokio::test]
async fn gateway_declining_the_message_is_a_notify_failure() {
    let store_server = MockServer::start().await;
    let gateway_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/documents"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "url": STORED_URL })),
        )
        .mount(&store_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "sent": false })),
        )
        .mount(&gateway_server)
        .await;

    let service = service(&store_server, &gateway_server).await;
    let err = service
        .upload_and_notify(b"%PDF-1.4 test", &sample_form(), date())
        .await
        .expect_err("a declined message should fail the notify stage");

    match err {
        QuoteError::Delivery(DeliveryError::Notify { document_url, reason }) => {
            assert_eq!(document_url, STORED_URL);
            assert!(reason.contains("declined"), "unexpected reason: {reason}");
        }
        other => panic!("expected a notify-stage error, got {other:?}"),
    }
}

#[tokio::test]
async fn notify_sends_the_expected_payload() {
    let store_server = MockServer::start().await;
    let gateway_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/documents"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "url": STORED_URL })),
        )
        .mount(&store_server)
        .await;

    let expected = serde_json::json!({
        "to": "+911234567890",
        "message": "Dear Acme Interiors, please find your quotation attached.",
        "attachment_url": STORED_URL,
    });
    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(body_json_string(expected.to_string()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "sent": true })),
        )
        .expect(1)
        .mount(&gateway_server)
        .await;

    let service = service(&store_server, &gateway_server).await;
    service
        .upload_and_notify(b"%PDF-1.4 test", &sample_form(), date())
        .await
        .expect("delivery should succeed");
}

#[tokio::test]
async fn a_non_https_store_url_is_rejected() {
    let store_server = MockServer::start().await;
    let gateway_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({ "url": "http://cdn.example.com/quote.pdf" }),
        ))
        .mount(&store_server)
        .await;

    Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&gateway_server).await;

    let service = service(&store_server, &gateway_server).await;
    let err = service
        .upload_and_notify(b"%PDF-1.4 test", &sample_form(), date())
        .await
        .expect_err("an insecure URL should be rejected");

    match err {
        QuoteError::Delivery(DeliveryError::Upload { reason }) => {
            assert!(reason.contains("non-HTTPS"), "unexpected reason: {reason}");
        }
        other => panic!("expected an upload-stage error, got {other:?}"),
    }
}
