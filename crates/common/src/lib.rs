//! Shared types for the order, payment and catalog services.

pub mod types;

pub use types::{OrderId, ParseIdError, PaymentId, ProductId};
