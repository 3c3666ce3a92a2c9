use thiserror::Error;

use crate::{OrderId, OrderStatus};

/// Errors that can occur while handling orders.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The order price was zero, negative or not a number.
    #[error("Order price must be greater than zero")]
    InvalidPrice { price: f64 },

    /// No order exists with the given id.
    #[error("Order not found with id: {0}")]
    NotFound(OrderId),

    /// The requested status change is not part of the order lifecycle.
    #[error("Invalid order status transition from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    /// A persisted status could not be decoded.
    #[error("Unknown order status: {0}")]
    UnknownStatus(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for order operations.
pub type Result<T> = std::result::Result<T, OrderError>;
