use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{OrderId, PaymentError, PaymentId};

/// Status of a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Accepted, processing not finished.
    #[default]
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    /// Returns the status name as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Success => "SUCCESS",
            PaymentStatus::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(PaymentStatus::Pending),
            "SUCCESS" => Ok(PaymentStatus::Success),
            "FAILED" => Ok(PaymentStatus::Failed),
            other => Err(PaymentError::UnknownStatus(other.to_string())),
        }
    }
}

/// A persisted payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub amount: f64,
    pub status: PaymentStatus,
    pub transaction_id: String,
    pub timestamp: DateTime<Utc>,
}

/// A payment that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub order_id: OrderId,
    pub amount: f64,
    pub status: PaymentStatus,
    pub transaction_id: String,
    pub timestamp: DateTime<Utc>,
}

impl NewPayment {
    /// Attaches the id assigned by a repository.
    pub fn with_id(self, id: PaymentId) -> Payment {
        Payment {
            id,
            order_id: self.order_id,
            amount: self.amount,
            status: self.status,
            transaction_id: self.transaction_id,
            timestamp: self.timestamp,
        }
    }
}

/// Command to process a payment for an order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessPayment {
    pub order_id: OrderId,
    pub amount: f64,
}

impl ProcessPayment {
    pub fn new(order_id: OrderId, amount: f64) -> Self {
        Self { order_id, amount }
    }
}
