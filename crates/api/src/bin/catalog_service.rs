//! Catalog service entry point.

use api::config::{CATALOG_SERVICE_PORT, Config};

#[tokio::main]
async fn main() {
    let config = Config::from_env(CATALOG_SERVICE_PORT);
    api::telemetry::init_tracing(&config);
    let metrics_handle =
        api::telemetry::install_metrics_recorder().expect("failed to install Prometheus recorder");

    let app = api::create_catalog_app(api::create_catalog_state(), metrics_handle);

    api::server::serve(app, &config, api::CATALOG_SERVICE)
        .await
        .expect("server error");
}
