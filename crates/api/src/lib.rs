//! HTTP front ends for the order, payment and catalog services.
//!
//! Each service is an independent axum router with its own state; the three
//! binaries in `src/bin` serve one router each. Every router also exposes
//! `/health` and a Prometheus `/metrics` endpoint, and is wrapped in request
//! tracing and permissive CORS. The payment service also publishes its OpenAPI
//! document at `/openapi.json`.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod telemetry;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use catalog::{ProductCache, ProductService, ProductStore};
use metrics_exporter_prometheus::PrometheusHandle;
use orders::{OrderRepository, OrderService, PaymentClient};
use payments::{PaymentProcessor, PaymentRepository};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::OrderAppState;
use routes::payments::PaymentAppState;
use routes::products::CatalogAppState;

pub const ORDER_SERVICE: &str = "order-service";
pub const PAYMENT_SERVICE: &str = "payment-service";
pub const CATALOG_SERVICE: &str = "catalog-service";

/// Builds the order service state.
pub fn create_order_state<R: OrderRepository, C: PaymentClient>(
    repository: R,
    payments: C,
) -> Arc<OrderAppState<R, C>> {
    Arc::new(OrderAppState {
        order_service: OrderService::new(repository, payments),
    })
}

/// Builds the payment service state.
pub fn create_payment_state<R: PaymentRepository>(
    repository: R,
    processing_delay: Duration,
) -> Arc<PaymentAppState<R>> {
    Arc::new(PaymentAppState {
        processor: PaymentProcessor::new(repository).with_processing_delay(processing_delay),
    })
}

/// Builds the catalog service state with an empty store and cache.
pub fn create_catalog_state() -> Arc<CatalogAppState> {
    Arc::new(CatalogAppState {
        products: ProductService::new(ProductStore::new(), ProductCache::new()),
    })
}

/// Creates the order service router.
pub fn create_order_app<R, C>(
    state: Arc<OrderAppState<R, C>>,
    metrics_handle: PrometheusHandle,
) -> Router
where
    R: OrderRepository + 'static,
    C: PaymentClient + 'static,
{
    let router = Router::new()
        .route(
            "/orders",
            post(routes::orders::create::<R, C>).get(routes::orders::list::<R, C>),
        )
        .route("/orders/{id}", get(routes::orders::get::<R, C>))
        .with_state(state);

    with_common_routes(router, ORDER_SERVICE, metrics_handle)
}

/// Creates the payment service router.
pub fn create_payment_app<R: PaymentRepository + 'static>(
    state: Arc<PaymentAppState<R>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let router = Router::new()
        .route(
            "/payments",
            post(routes::payments::create::<R>).get(routes::payments::list::<R>),
        )
        .route("/payments/{id}", get(routes::payments::get::<R>))
        .route(
            "/payments/order/{order_id}",
            get(routes::payments::for_order::<R>),
        )
        .route("/openapi.json", get(routes::openapi::payment_document))
        .with_state(state);

    with_common_routes(router, PAYMENT_SERVICE, metrics_handle)
}

/// Creates the catalog service router.
pub fn create_catalog_app(
    state: Arc<CatalogAppState>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let router = Router::new()
        .route("/product", post(routes::products::create))
        .route(
            "/product/{id}",
            get(routes::products::get).delete(routes::products::delete),
        )
        .route("/cache/stats", get(routes::products::stats))
        .with_state(state);

    with_common_routes(router, CATALOG_SERVICE, metrics_handle)
}

fn with_common_routes(
    router: Router,
    service: &'static str,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    router
        .route("/health", get(move || routes::health::check(service)))
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
