//! Service configuration loaded from environment variables.

use std::time::Duration;

/// Default port of the order service.
pub const ORDER_SERVICE_PORT: u16 = 8081;
/// Default port of the payment service.
pub const PAYMENT_SERVICE_PORT: u16 = 8082;
/// Default port of the catalog service.
pub const CATALOG_SERVICE_PORT: u16 = 8080;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Service configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: per service)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `json` for JSON lines, anything else for human output
/// - `DATABASE_URL`: Postgres URL; repositories are in-memory when unset
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: `5`)
/// - `PAYMENT_SERVICE_URL`: base URL of the payment service
///   (default: `"http://localhost:8082"`)
/// - `PAYMENT_CLIENT_TIMEOUT_MS`: outbound payment call timeout (default: `5000`)
/// - `PAYMENT_PROCESSING_DELAY_MS`: simulated processing time (default: `500`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub payment_service_url: String,
    pub payment_client_timeout: Duration,
    pub payment_processing_delay: Duration,
}

impl Config {
    /// Returns the defaults for a service listening on `port`.
    pub fn with_port(port: u16) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            database_url: None,
            database_max_connections: 5,
            payment_service_url: format!("http://localhost:{PAYMENT_SERVICE_PORT}"),
            payment_client_timeout: Duration::from_millis(5000),
            payment_processing_delay: payments::DEFAULT_PROCESSING_DELAY,
        }
    }

    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env(default_port: u16) -> Self {
        Self::from_lookup(default_port, |key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// missing or unparseable values.
    pub fn from_lookup(default_port: u16, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::with_port(default_port);
        let millis = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(default)
        };

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            database_max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .and_then(|n| n.parse().ok())
                .unwrap_or(defaults.database_max_connections),
            payment_service_url: lookup("PAYMENT_SERVICE_URL")
                .unwrap_or(defaults.payment_service_url),
            payment_client_timeout: millis(
                "PAYMENT_CLIENT_TIMEOUT_MS",
                defaults.payment_client_timeout,
            ),
            payment_processing_delay: millis(
                "PAYMENT_PROCESSING_DELAY_MS",
                defaults.payment_processing_delay,
            ),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_port(ORDER_SERVICE_PORT)
    }
}
