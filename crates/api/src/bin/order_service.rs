//! Order service entry point.

use api::config::{Config, ORDER_SERVICE_PORT};
use orders::{HttpPaymentClient, InMemoryOrderRepository, PostgresOrderRepository};

#[tokio::main]
async fn main() {
    // 1. Configuration and telemetry
    let config = Config::from_env(ORDER_SERVICE_PORT);
    api::telemetry::init_tracing(&config);
    let metrics_handle =
        api::telemetry::install_metrics_recorder().expect("failed to install Prometheus recorder");

    // 2. Outbound payment client
    let payments = HttpPaymentClient::new(&config.payment_service_url, config.payment_client_timeout)
        .expect("failed to build payment client");
    tracing::info!(endpoint = payments.endpoint(), "payment service configured");

    // 3. Repository and router
    let app = match config.database_url.as_deref() {
        Some(url) => {
            let pool = api::server::connect_database(&config, url)
                .await
                .expect("failed to connect to database");
            let repository = PostgresOrderRepository::new(pool);
            repository
                .run_migrations()
                .await
                .expect("failed to run order migrations");
            api::create_order_app(api::create_order_state(repository, payments), metrics_handle)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, orders are kept in memory");
            let repository = InMemoryOrderRepository::new();
            api::create_order_app(api::create_order_state(repository, payments), metrics_handle)
        }
    };

    // 4. Serve
    api::server::serve(app, &config, api::ORDER_SERVICE)
        .await
        .expect("server error");
}
