//! Payment side of the order/payment pair.
//!
//! A payment request is validated, given a transaction id, held for a fixed
//! simulated processing delay, marked `SUCCESS` and persisted. There is no
//! payment gateway behind it.

pub mod error;
pub mod memory;
pub mod page;
pub mod payment;
pub mod postgres;
pub mod processor;
pub mod repository;

pub use common::{OrderId, PaymentId};
pub use error::{PaymentError, Result};
pub use memory::InMemoryPaymentRepository;
pub use page::{Page, PageRequest};
pub use payment::{NewPayment, Payment, PaymentStatus, ProcessPayment};
pub use postgres::PostgresPaymentRepository;
pub use processor::{DEFAULT_PROCESSING_DELAY, PaymentProcessor, generate_transaction_id};
pub use repository::PaymentRepository;
