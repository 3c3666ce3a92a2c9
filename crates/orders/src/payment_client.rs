//! Outbound payment call made while placing an order.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::{OrderId, PaymentId};

/// Body of `POST /payments` on the payment service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub order_id: OrderId,
    pub amount: f64,
}

/// The payment record returned by the payment service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    #[serde(rename = "id")]
    pub payment_id: PaymentId,
    pub order_id: OrderId,
    pub amount: f64,
    pub status: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

impl PaymentReceipt {
    /// Returns true if the payment service reported the charge as successful.
    pub fn is_successful(&self) -> bool {
        self.status == "SUCCESS"
    }
}

/// Failure modes of the payment call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaymentClientError {
    /// The payment service answered with a 4xx status.
    #[error("Payment rejected with HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The payment service could not be reached or did not answer usefully.
    #[error("Payment service unavailable: {0}")]
    Unavailable(String),
}

/// Client for the payment service.
#[async_trait]
pub trait PaymentClient: Send + Sync {
    /// Asks the payment service to charge for an order. Called exactly once
    /// per placed order.
    async fn process_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentReceipt, PaymentClientError>;
}

/// Payment client that talks JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPaymentClient {
    client: Client,
    endpoint: String,
}

impl HttpPaymentClient {
    /// Creates a client for the payment service rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PaymentClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PaymentClientError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/payments", base_url.trim_end_matches('/')),
        })
    }

    /// Returns the full URL payments are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PaymentClient for HttpPaymentClient {
    #[tracing::instrument(skip_all, fields(order_id = %request.order_id))]
    async fn process_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentReceipt, PaymentClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| PaymentClientError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read payment service error body");
                    String::new()
                }
            };
            tracing::warn!(status = status.as_u16(), %body, "payment service rejected request");
            return Err(PaymentClientError::Rejected {
                status: status.as_u16(),
                message: extract_error_message(status.as_u16(), &body),
            });
        }
        if !status.is_success() {
            return Err(PaymentClientError::Unavailable(format!(
                "payment service returned HTTP {status}"
            )));
        }

        response
            .json::<PaymentReceipt>()
            .await
            .map_err(|e| PaymentClientError::Unavailable(format!("undecodable payment response: {e}")))
    }
}

/// Pulls a human readable reason out of a payment service error body.
///
/// Looks for a `message` field, then an `error` field.
pub fn extract_error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("message")
            .or_else(|| value.get("error"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or("Payment processing failed")
            .to_string(),
        Err(e) => {
            tracing::error!(error = %e, "error parsing error response from payment service");
            format!("Error processing payment: HTTP {status}")
        }
    }
}

/// What an [`InMemoryPaymentClient`] answers with.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PaymentOutcome {
    /// Return a `SUCCESS` receipt.
    #[default]
    Approve,
    /// Return a receipt carrying the given non-success status.
    Decline(String),
    /// Fail as if the payment service answered 4xx.
    Reject { status: u16, message: String },
    /// Fail as if the payment service could not be reached.
    Unavailable(String),
}

#[derive(Debug, Default)]
struct InMemoryPaymentClientState {
    outcome: PaymentOutcome,
    requests: Vec<PaymentRequest>,
    next_id: i64,
}

/// In-memory payment client for tests and single-process wiring.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentClient {
    state: Arc<RwLock<InMemoryPaymentClientState>>,
}

impl InMemoryPaymentClient {
    /// Creates a client that approves every payment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures how subsequent calls are answered.
    pub async fn set_outcome(&self, outcome: PaymentOutcome) {
        self.state.write().await.outcome = outcome;
    }

    /// Returns every request received so far.
    pub async fn requests(&self) -> Vec<PaymentRequest> {
        self.state.read().await.requests.clone()
    }
}

#[async_trait]
impl PaymentClient for InMemoryPaymentClient {
    async fn process_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentReceipt, PaymentClientError> {
        let mut state = self.state.write().await;
        state.requests.push(request.clone());

        let status = match &state.outcome {
            PaymentOutcome::Approve => "SUCCESS".to_string(),
            PaymentOutcome::Decline(status) => status.clone(),
            PaymentOutcome::Reject { status, message } => {
                return Err(PaymentClientError::Rejected {
                    status: *status,
                    message: message.clone(),
                });
            }
            PaymentOutcome::Unavailable(reason) => {
                return Err(PaymentClientError::Unavailable(reason.clone()));
            }
        };

        state.next_id += 1;
        Ok(PaymentReceipt {
            payment_id: PaymentId::new(state.next_id),
            order_id: request.order_id,
            amount: request.amount,
            status,
            transaction_id: Some(format!("TXN{:010}", state.next_id)),
        })
    }
}
