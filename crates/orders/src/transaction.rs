//! Response returned to the client after placing an order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Order;

/// Message used when the payment service confirmed the charge.
pub const PAYMENT_SUCCEEDED_MESSAGE: &str = "Payment processed successfully";

/// Message used when the payment service could not be reached.
pub const PAYMENT_TEMPORARILY_FAILED_MESSAGE: &str =
    "Temporary error processing payment. Please try again later.";

/// Overall outcome reported to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Success,
    Failed,
}

/// The order together with the outcome of its payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub order: Order,
    pub amount: f64,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl TransactionResponse {
    /// Builds a response for a paid order.
    pub fn success(order: Order, transaction_id: Option<String>) -> Self {
        Self {
            amount: order.price,
            order,
            status: TransactionStatus::Success,
            transaction_id,
            timestamp: Utc::now(),
            message: PAYMENT_SUCCEEDED_MESSAGE.to_string(),
        }
    }

    /// Builds a response for an order whose payment did not go through.
    pub fn failed(order: Order, message: impl Into<String>) -> Self {
        Self {
            amount: order.price,
            order,
            status: TransactionStatus::Failed,
            transaction_id: None,
            timestamp: Utc::now(),
            message: message.into(),
        }
    }
}
