//! Order side of the order/payment pair.
//!
//! An order is validated, persisted as `PENDING`, handed to the payment
//! service in a single outbound call, and then moved to the status that
//! reflects the payment outcome. No retry is ever scheduled: a payment
//! service that cannot be reached leaves the order in `PAYMENT_PENDING`.

pub mod error;
pub mod memory;
pub mod order;
pub mod payment_client;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod transaction;

pub use common::{OrderId, PaymentId};
pub use error::{OrderError, Result};
pub use memory::InMemoryOrderRepository;
pub use order::{CreateOrder, NewOrder, Order, OrderStatus};
pub use payment_client::{
    HttpPaymentClient, InMemoryPaymentClient, PaymentClient, PaymentClientError, PaymentOutcome,
    PaymentReceipt, PaymentRequest,
};
pub use postgres::PostgresOrderRepository;
pub use repository::OrderRepository;
pub use service::OrderService;
pub use transaction::{TransactionResponse, TransactionStatus};
