use thiserror::Error;

use crate::{OrderId, PaymentId};

/// Errors that can occur while handling payments.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The payment amount was zero, negative or not a number.
    #[error("Payment amount must be greater than zero")]
    InvalidAmount { amount: f64 },

    /// No payment exists with the given id.
    #[error("Payment not found with id: {0}")]
    NotFound(PaymentId),

    /// No payment exists for the given order.
    #[error("Payment not found for order: {0}")]
    NotFoundForOrder(OrderId),

    /// A persisted status could not be decoded.
    #[error("Unknown payment status: {0}")]
    UnknownStatus(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for payment operations.
pub type Result<T> = std::result::Result<T, PaymentError>;
