//! Integration tests for the three service routers.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use api::routes::orders::OrderAppState;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use orders::{
    HttpPaymentClient, InMemoryOrderRepository, InMemoryPaymentClient, PaymentOutcome,
};
use payments::InMemoryPaymentRepository;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

type InMemoryOrderState = Arc<OrderAppState<InMemoryOrderRepository, InMemoryPaymentClient>>;

fn setup_orders() -> (axum::Router, InMemoryOrderState) {
    let state =
        api::create_order_state(InMemoryOrderRepository::new(), InMemoryPaymentClient::new());
    let app = api::create_order_app(state.clone(), get_metrics_handle());
    (app, state)
}

fn setup_payments() -> axum::Router {
    let state = api::create_payment_state(InMemoryPaymentRepository::new(), Duration::ZERO);
    api::create_payment_app(state, get_metrics_handle())
}

fn setup_catalog() -> axum::Router {
    api::create_catalog_app(api::create_catalog_state(), get_metrics_handle())
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn raw_json_request(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Serves a router on an ephemeral local port and returns its base URL.
async fn spawn_server(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

// -- Common endpoints --

#[tokio::test]
async fn test_health_check_names_service() {
    let (orders_app, _) = setup_orders();
    for (app, service) in [
        (orders_app, "order-service"),
        (setup_payments(), "payment-service"),
        (setup_catalog(), "catalog-service"),
    ] {
        let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], service);
    }
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let response = setup_catalog()
        .oneshot(empty_request("GET", "/metrics"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));
}

// -- Order service --

#[tokio::test]
async fn test_create_order_marks_paid() {
    let (app, _) = setup_orders();

    let response = app
        .oneshot(json_request(
            "POST",
            "/orders",
            serde_json::json!({ "order_number": "ORD-1", "price": 25.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "SUCCESS");
    assert_eq!(json["amount"], 25.0);
    assert_eq!(json["order"]["status"], "PAID");
    assert_eq!(json["order"]["order_number"], "ORD-1");
    assert!(json["transaction_id"].as_str().is_some());
}

#[tokio::test]
async fn test_create_order_rejects_non_positive_price() {
    let (app, state) = setup_orders();

    let response = app
        .oneshot(json_request(
            "POST",
            "/orders",
            serde_json::json!({ "price": 0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Order price must be greater than zero");
    assert_eq!(
        state.order_service.repository().order_count().await,
        0
    );
}

#[tokio::test]
async fn test_create_order_with_unreachable_payment_is_payment_pending() {
    let (app, state) = setup_orders();
    state
        .order_service
        .payments()
        .set_outcome(PaymentOutcome::Unavailable("connection refused".to_string()))
        .await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/orders",
            serde_json::json!({ "price": 10.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "FAILED");
    assert_eq!(
        json["message"],
        "Temporary error processing payment. Please try again later."
    );
    assert!(json.get("transaction_id").is_none());

    let order_id = json["order"]["id"].as_i64().unwrap();
    let response = app
        .oneshot(empty_request("GET", &format!("/orders/{order_id}")))
        .await
        .unwrap();
    let order = body_json(response).await;
    assert_eq!(order["status"], "PAYMENT_PENDING");
}

#[tokio::test]
async fn test_create_and_get_order() {
    let (app, _) = setup_orders();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/orders",
            serde_json::json!({ "price": 12.5 }),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    let order_id = created["order"]["id"].as_i64().unwrap();

    let response = app
        .oneshot(empty_request("GET", &format!("/orders/{order_id}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let order = body_json(response).await;
    assert_eq!(order["id"], order_id);
    assert_eq!(order["price"], 12.5);
    assert_eq!(order["status"], "PAID");
    assert!(order["order_number"].as_str().unwrap().starts_with("ORD-"));
}

#[tokio::test]
async fn test_get_nonexistent_order() {
    let (app, _) = setup_orders();

    let response = app
        .oneshot(empty_request("GET", "/orders/9999"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Order not found with id: 9999");
}

#[tokio::test]
async fn test_get_order_with_malformed_id() {
    let (app, _) = setup_orders();

    let response = app
        .oneshot(empty_request("GET", "/orders/not-a-number"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_orders() {
    let (app, _) = setup_orders();
    for price in [1.0, 2.0, 3.0] {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/orders",
                serde_json::json!({ "price": price }),
            ))
            .await
            .unwrap();
    }

    let response = app.oneshot(empty_request("GET", "/orders")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let orders = body_json(response).await;
    assert_eq!(orders.as_array().unwrap().len(), 3);
}

// -- Payment service --

#[tokio::test]
async fn test_process_payment() {
    let app = setup_payments();

    let response = app
        .oneshot(json_request(
            "POST",
            "/payments",
            serde_json::json!({ "order_id": 4, "amount": 30.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let payment = body_json(response).await;
    assert_eq!(payment["status"], "SUCCESS");
    assert_eq!(payment["order_id"], 4);
    assert_eq!(payment["transaction_id"].as_str().unwrap().len(), 13);
}

#[tokio::test]
async fn test_process_payment_rejects_non_positive_amount() {
    let app = setup_payments();

    let response = app
        .oneshot(json_request(
            "POST",
            "/payments",
            serde_json::json!({ "order_id": 4, "amount": -3.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Payment amount must be greater than zero");
}

#[tokio::test]
async fn test_payment_retrievable_by_id_and_order() {
    let app = setup_payments();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/payments",
            serde_json::json!({ "order_id": 11, "amount": 5.0 }),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    let payment_id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/payments/{payment_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);

    let response = app
        .oneshot(empty_request("GET", "/payments/order/11"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn test_missing_payments_are_not_found() {
    let app = setup_payments();

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/payments/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(empty_request("GET", "/payments/order/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_payments_paginates() {
    let app = setup_payments();
    for order_id in 1..=3 {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/payments",
                serde_json::json!({ "order_id": order_id, "amount": 1.0 }),
            ))
            .await
            .unwrap();
    }

    let response = app
        .oneshot(empty_request("GET", "/payments?page=1&size=2"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await;
    assert_eq!(page["content"].as_array().unwrap().len(), 1);
    assert_eq!(page["content"][0]["order_id"], 3);
    assert_eq!(page["page"], 1);
    assert_eq!(page["size"], 2);
    assert_eq!(page["total_elements"], 3);
    assert_eq!(page["total_pages"], 2);
}

#[tokio::test]
async fn test_payment_openapi_document() {
    let response = setup_payments()
        .oneshot(empty_request("GET", "/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert_eq!(doc["info"]["title"], "Payment Service API");
    assert_eq!(doc["info"]["version"], "1.0.0");
    assert_eq!(doc["info"]["license"]["name"], "Apache 2.0");
    assert_eq!(doc["info"]["contact"]["email"], "payment-service@example.com");
    for path in ["/payments", "/payments/{id}", "/payments/order/{order_id}"] {
        assert!(doc["paths"].get(path).is_some(), "missing {path}");
    }
    assert!(doc["paths"]["/payments"].get("post").is_some());
    assert!(doc["components"]["schemas"].get("Payment").is_some());
}

// -- Catalog service --

#[tokio::test]
async fn test_product_write_is_served_from_cache() {
    let app = setup_catalog();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/product",
            serde_json::json!({ "id": 1, "name": "Laptop", "price": 999.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Laptop");

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/product/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["price"], 999.0);

    let response = app
        .oneshot(empty_request("GET", "/cache/stats"))
        .await
        .unwrap();
    let stats = body_json(response).await;
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["store_reads"], 0);
    assert_eq!(stats["entries"], 1);
}

#[tokio::test]
async fn test_deleted_product_is_not_found() {
    let app = setup_catalog();
    app.clone()
        .oneshot(json_request(
            "POST",
            "/product",
            serde_json::json!({ "id": 2, "name": "Phone", "price": 499.0 }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/product/2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_text(response).await,
        "Product removed from cache and DB."
    );

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/product/2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(empty_request("GET", "/cache/stats"))
        .await
        .unwrap();
    let stats = body_json(response).await;
    assert_eq!(stats["misses"], 1);
    assert_eq!(stats["store_reads"], 1);
    assert_eq!(stats["entries"], 0);
}

#[tokio::test]
async fn test_product_with_invalid_price_is_rejected() {
    let app = setup_catalog();

    let response = app
        .oneshot(json_request(
            "POST",
            "/product",
            serde_json::json!({ "id": 3, "name": "Gift", "price": 0.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// -- Unreadable request bodies --

async fn assert_bad_request_json(app: axum::Router, request: Request<Body>) {
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(message.starts_with("Invalid request body"), "{message}");
}

#[tokio::test]
async fn test_unreadable_order_bodies_are_bad_requests() {
    let (app, state) = setup_orders();

    for body in [r#"{"price": "abc"}"#, r#"{"order_number": "x"}"#, "not json"] {
        assert_bad_request_json(app.clone(), raw_json_request("/orders", body)).await;
    }
    assert_eq!(state.order_service.repository().order_count().await, 0);
    assert!(state.order_service.payments().requests().await.is_empty());
}

#[tokio::test]
async fn test_unreadable_payment_bodies_are_bad_requests() {
    let app = setup_payments();

    for body in [
        r#"{"order_id": 1, "amount": "lots"}"#,
        r#"{"order_id": 1}"#,
        "{not json",
    ] {
        assert_bad_request_json(app.clone(), raw_json_request("/payments", body)).await;
    }
}

#[tokio::test]
async fn test_unreadable_product_bodies_are_bad_requests() {
    let app = setup_catalog();

    for body in [
        r#"{"id": "one", "name": "Pen", "price": 2.0}"#,
        r#"{"id": 1, "name": "Pen"}"#,
        "]",
    ] {
        assert_bad_request_json(app.clone(), raw_json_request("/product", body)).await;
    }
}

#[tokio::test]
async fn test_bad_page_query_is_bad_request() {
    let response = setup_payments()
        .oneshot(empty_request("GET", "/payments?page=first"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("Invalid query string"));
}

// -- Order and payment services together --

#[tokio::test]
async fn test_order_is_paid_through_payment_service() {
    let payment_url = spawn_server(setup_payments()).await;
    let client = HttpPaymentClient::new(&payment_url, Duration::from_secs(5)).unwrap();
    let state = api::create_order_state(InMemoryOrderRepository::new(), client);
    let app = api::create_order_app(state, get_metrics_handle());

    let response = app
        .oneshot(json_request(
            "POST",
            "/orders",
            serde_json::json!({ "order_number": "ORD-E2E", "price": 64.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "SUCCESS");
    assert_eq!(json["order"]["status"], "PAID");
    let transaction_id = json["transaction_id"].as_str().unwrap().to_string();
    let order_id = json["order"]["id"].as_i64().unwrap();

    let payment: serde_json::Value = reqwest_get_json(&format!(
        "{payment_url}/payments/order/{order_id}"
    ))
    .await;
    assert_eq!(payment["transaction_id"], transaction_id);
    assert_eq!(payment["amount"], 64.0);
}

#[tokio::test]
async fn test_order_with_payment_service_down_is_payment_pending() {
    let client = HttpPaymentClient::new("http://127.0.0.1:1", Duration::from_millis(500)).unwrap();
    let state = api::create_order_state(InMemoryOrderRepository::new(), client);
    let app = api::create_order_app(state, get_metrics_handle());

    let response = app
        .oneshot(json_request(
            "POST",
            "/orders",
            serde_json::json!({ "price": 8.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "FAILED");
    assert_eq!(json["order"]["status"], "PAYMENT_PENDING");
}

async fn reqwest_get_json(url: &str) -> serde_json::Value {
    let response = reqwest::get(url).await.unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}
