use async_trait::async_trait;

use crate::{NewPayment, OrderId, Page, PageRequest, Payment, PaymentId, Result};

/// Persistence for payments.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Persists a new payment and returns it with its assigned id.
    async fn insert(&self, payment: NewPayment) -> Result<Payment>;

    /// Loads a payment by id.
    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>>;

    /// Loads the most recent payment recorded for an order.
    async fn find_by_order_id(&self, order_id: OrderId) -> Result<Option<Payment>>;

    /// Loads one page of payments ordered by id.
    async fn find_page(&self, request: PageRequest) -> Result<Page<Payment>>;
}
