// Integration tests for `BackofficeClient` using wiremock.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use paydeck_api::types::{DeviceAuthStatus, Page, Partner, Transaction, TransactionStatus};
use paydeck_api::{BackofficeClient, Error, ListParams, SortDirection};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, BackofficeClient) {
    let server = MockServer::start().await;
    let client = BackofficeClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn transaction_json(uid: Uuid, reference: &str, status: &str) -> serde_json::Value {
    json!({
        "uid": uid,
        "reference": reference,
        "amount": "120.50",
        "currency": "EUR",
        "status": status,
        "transaction_type": "purchase",
        "partner_name": "Acme GmbH",
        "platform_name": "acme-web",
        "cancellation_reason": null,
        "admin_notes": null,
        "created_at": "2026-08-01T09:30:00Z",
        "updated_at": null
    })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn list_transactions_decodes_envelope() {
    let (server, client) = setup().await;

    let tx_a = Uuid::new_v4();
    let tx_b = Uuid::new_v4();
    let body = json!({
        "count": 2,
        "next": null,
        "previous": null,
        "results": [
            transaction_json(tx_a, "TX-1001", "completed"),
            transaction_json(tx_b, "TX-1002", "pending"),
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/admin/transactions/"))
        .and(query_param("page_size", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let page: Page<Transaction> = client.list_transactions(&ListParams::new(20)).await.unwrap();

    assert_eq!(page.count, 2);
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].reference, "TX-1001");
    assert_eq!(page.results[0].status, TransactionStatus::Completed);
    assert_eq!(page.results[0].amount, Decimal::new(12050, 2));
    assert_eq!(page.results[1].uid, tx_b);
}

#[tokio::test]
async fn list_sends_only_non_default_params() {
    let (server, client) = setup().await;

    // First page, no search: both parameters must be absent from the request.
    Mock::given(method("GET"))
        .and(path("/api/admin/transactions/"))
        .and(query_param("page_size", "20"))
        .and(query_param_is_missing("page"))
        .and(query_param_is_missing("search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 0,
            "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client.list_transactions(&ListParams::new(20)).await.unwrap();
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn list_sends_search_ordering_and_exclusive_date_bound() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/transactions/"))
        .and(query_param("page", "3"))
        .and(query_param("search", "acme"))
        .and(query_param("ordering", "-created_at"))
        .and(query_param("status", "pending"))
        .and(query_param("created_at__gte", "2026-07-01"))
        .and(query_param("created_at__lt", "2026-08-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 0,
            "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = ListParams::new(20)
        .page(3)
        .search("acme")
        .ordering("created_at", SortDirection::Descending)
        .filter("status", "pending")
        .created_between(
            chrono::NaiveDate::from_ymd_opt(2026, 7, 1),
            chrono::NaiveDate::from_ymd_opt(2026, 7, 31),
        );

    client.list_transactions(&params).await.unwrap();
}

#[tokio::test]
async fn approve_cancellation_posts_notes_and_returns_updated_transaction() {
    let (server, client) = setup().await;

    let uid = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path(format!("/api/admin/transactions/{uid}/approve-cancellation/")))
        .and(body_json(json!({ "admin_notes": "customer dispute upheld" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(transaction_json(uid, "TX-1001", "cancelled")),
        )
        .mount(&server)
        .await;

    let tx = client
        .approve_cancellation(&uid, "customer dispute upheld")
        .await
        .unwrap();
    assert_eq!(tx.status, TransactionStatus::Cancelled);
}

#[tokio::test]
async fn set_partner_active_patches_flag_and_notes() {
    let (server, client) = setup().await;

    let uid = Uuid::new_v4();
    let body = json!({
        "uid": uid,
        "name": "Acme GmbH",
        "email": "ops@acme.example",
        "phone": null,
        "is_active": false,
        "balance": "1024.00",
        "currency": "EUR",
        "permissions": ["payouts"],
        "notes": "chargeback ratio exceeded",
        "created_at": "2025-11-02T08:00:00Z"
    });

    Mock::given(method("PATCH"))
        .and(path(format!("/api/admin/partners/{uid}/")))
        .and(body_json(json!({
            "is_active": false,
            "notes": "chargeback ratio exceeded"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let partner: Partner = client
        .set_partner_active(&uid, false, "chargeback ratio exceeded")
        .await
        .unwrap();
    assert!(!partner.is_active);
    assert_eq!(partner.balance, Decimal::new(102400, 2));
}

#[tokio::test]
async fn revoke_device_posts_reason() {
    let (server, client) = setup().await;

    let uid = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path(format!("/api/admin/devices/{uid}/revoke/")))
        .and(body_json(json!({ "reason": "terminal reported stolen" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uid": uid,
            "serial_number": "PAX-00417",
            "label": "Store 12",
            "partner_name": "Acme GmbH",
            "status": "revoked",
            "requested_at": "2026-06-10T10:00:00Z",
            "decided_at": "2026-08-01T12:00:00Z",
            "decided_by": "ops@paydeck",
            "notes": null
        })))
        .mount(&server)
        .await;

    let device = client
        .revoke_device(&uid, "terminal reported stolen")
        .await
        .unwrap();
    assert_eq!(device.status, DeviceAuthStatus::Revoked);
}

#[tokio::test]
async fn pay_commission_posts_empty_body() {
    let (server, client) = setup().await;

    let uid = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path(format!("/api/admin/commissions/{uid}/pay/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uid": uid,
            "partner_name": "Acme GmbH",
            "period": "2026-07",
            "amount": "310.20",
            "currency": "EUR",
            "status": "paid",
            "created_at": "2026-08-01T00:00:00Z",
            "paid_at": "2026-08-05T09:00:00Z"
        })))
        .mount(&server)
        .await;

    let commission = client.pay_commission(&uid).await.unwrap();
    assert_eq!(commission.status, paydeck_api::types::CommissionStatus::Paid);
}

#[tokio::test]
async fn paginate_all_walks_every_page() {
    let (server, client) = setup().await;

    let page1 = json!({
        "count": 3,
        "results": [
            transaction_json(Uuid::new_v4(), "TX-1", "completed"),
            transaction_json(Uuid::new_v4(), "TX-2", "completed"),
        ]
    });
    let page2 = json!({
        "count": 3,
        "results": [transaction_json(Uuid::new_v4(), "TX-3", "completed")]
    });

    Mock::given(method("GET"))
        .and(path("/api/admin/transactions/"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page1))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/transactions/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page2))
        .mount(&server)
        .await;

    let client_ref = &client;
    let all = client
        .paginate_all(ListParams::new(2), move |p| async move {
            client_ref.list_transactions(&p).await
        })
        .await
        .unwrap();

    assert_eq!(all.len(), 3);
    assert_eq!(all[2].reference, "TX-3");
}

#[tokio::test]
async fn empty_page_decodes() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/transfers/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 0,
            "results": []
        })))
        .mount(&server)
        .await;

    let page = client.list_transfers(&ListParams::new(20)).await.unwrap();
    assert_eq!(page.count, 0);
    assert!(page.results.is_empty());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn http_401_maps_to_session_expired() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token expired."
        })))
        .mount(&server)
        .await;

    let err = client
        .list_transactions(&ListParams::new(20))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::SessionExpired));
    assert!(err.is_auth_expired());
}

#[tokio::test]
async fn http_400_maps_to_field_level_validation() {
    let (server, client) = setup().await;

    let uid = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path(format!("/api/admin/transactions/{uid}/approve-cancellation/")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "admin_notes": ["This field may not be blank."]
        })))
        .mount(&server)
        .await;

    let err = client.approve_cancellation(&uid, "").await.unwrap_err();
    match err {
        Error::Validation { messages } => {
            assert_eq!(messages, vec!["admin_notes: This field may not be blank."]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn http_403_maps_to_forbidden() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": "You do not have permission to perform this action."
        })))
        .mount(&server)
        .await;

    let err = client.list_partners(&ListParams::new(20)).await.unwrap_err();
    match err {
        Error::Forbidden { message } => {
            assert!(message.contains("permission"));
        }
        other => panic!("expected Forbidden, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_raw_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client.list_transfers(&ListParams::new(20)).await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_reports_deserialization() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"count\": \"oops\""))
        .mount(&server)
        .await;

    let err = client.list_transfers(&ListParams::new(20)).await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
}
