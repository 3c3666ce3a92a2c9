//! Order record and its status lifecycle.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{OrderError, OrderId};

/// The status of an order in its lifecycle.
///
/// State transitions:
/// ```text
///                ┌──► Paid ──► Shipped ──► Delivered ──► Refunded
///                │     │  └──────────────────────────────┘
/// Pending ───────┼──► PaymentFailed
///    │           │
///    └──► PaymentPending ──► Paid | PaymentFailed
///
/// Pending | PaymentPending | Paid ──► Cancelled
/// ```
///
/// The order service itself only ever leaves `Pending` once, into one of
/// `Paid`, `PaymentFailed` or `PaymentPending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Persisted, payment not yet attempted.
    #[default]
    Pending,
    /// Payment service confirmed the charge.
    Paid,
    Shipped,
    Delivered,
    Cancelled,
    /// Payment service rejected the charge.
    PaymentFailed,
    /// Payment service could not be reached; outcome unknown.
    PaymentPending,
    Refunded,
}

impl OrderStatus {
    /// Returns true if the lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Paid | PaymentFailed | PaymentPending | Cancelled)
                | (PaymentPending, Paid | PaymentFailed | Cancelled)
                | (Paid, Shipped | Cancelled | Refunded)
                | (Shipped, Delivered)
                | (Delivered, Refunded)
        )
    }

    /// Returns the status name as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::PaymentFailed => "PAYMENT_FAILED",
            OrderStatus::PaymentPending => "PAYMENT_PENDING",
            OrderStatus::Refunded => "REFUNDED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "PENDING" => OrderStatus::Pending,
            "PAID" => OrderStatus::Paid,
            "SHIPPED" => OrderStatus::Shipped,
            "DELIVERED" => OrderStatus::Delivered,
            "CANCELLED" => OrderStatus::Cancelled,
            "PAYMENT_FAILED" => OrderStatus::PaymentFailed,
            "PAYMENT_PENDING" => OrderStatus::PaymentPending,
            "REFUNDED" => OrderStatus::Refunded,
            other => return Err(OrderError::UnknownStatus(other.to_string())),
        })
    }
}

/// A persisted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub price: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// An order that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub order_number: String,
    pub price: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    /// Creates a new order in the `Pending` status, stamped now.
    pub fn pending(order_number: impl Into<String>, price: f64) -> Self {
        Self {
            order_number: order_number.into(),
            price,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Attaches the id assigned by a repository.
    pub fn with_id(self, id: OrderId) -> Order {
        Order {
            id,
            order_number: self.order_number,
            price: self.price,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Command to place a new order.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrder {
    /// Client supplied order number; generated when absent or blank.
    pub order_number: Option<String>,
    pub price: f64,
}

impl CreateOrder {
    /// Creates a command with a generated order number.
    pub fn new(price: f64) -> Self {
        Self {
            order_number: None,
            price,
        }
    }

    /// Sets the client supplied order number.
    pub fn with_order_number(mut self, order_number: impl Into<String>) -> Self {
        self.order_number = Some(order_number.into());
        self
    }

    /// Returns the order number to persist, generating one if needed.
    pub(crate) fn resolve_order_number(&self) -> String {
        match self.order_number.as_deref().map(str::trim) {
            Some(number) if !number.is_empty() => number.to_string(),
            _ => generate_order_number(),
        }
    }
}

fn generate_order_number() -> String {
    let simple = uuid::Uuid::new_v4().simple().to_string();
    format!("ORD-{}", simple[..8].to_uppercase())
}
