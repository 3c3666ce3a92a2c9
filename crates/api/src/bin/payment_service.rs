//! Payment service entry point.

use api::config::{Config, PAYMENT_SERVICE_PORT};
use payments::{InMemoryPaymentRepository, PostgresPaymentRepository};

#[tokio::main]
async fn main() {
    let config = Config::from_env(PAYMENT_SERVICE_PORT);
    api::telemetry::init_tracing(&config);
    let metrics_handle =
        api::telemetry::install_metrics_recorder().expect("failed to install Prometheus recorder");

    let delay = config.payment_processing_delay;
    let app = match config.database_url.as_deref() {
        Some(url) => {
            let pool = api::server::connect_database(&config, url)
                .await
                .expect("failed to connect to database");
            let repository = PostgresPaymentRepository::new(pool);
            repository
                .run_migrations()
                .await
                .expect("failed to run payment migrations");
            api::create_payment_app(api::create_payment_state(repository, delay), metrics_handle)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, payments are kept in memory");
            let repository = InMemoryPaymentRepository::new();
            api::create_payment_app(api::create_payment_state(repository, delay), metrics_handle)
        }
    };

    api::server::serve(app, &config, api::PAYMENT_SERVICE)
        .await
        .expect("server error");
}
