use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    NewPayment, OrderId, Page, PageRequest, Payment, PaymentId, PaymentRepository, Result,
};

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    payments: BTreeMap<PaymentId, Payment>,
    next_id: i64,
}

/// In-memory payment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentRepository {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored payments.
    pub async fn payment_count(&self) -> usize {
        self.state.read().await.payments.len()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn insert(&self, payment: NewPayment) -> Result<Payment> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let payment = payment.with_id(PaymentId::new(state.next_id));
        state.payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>> {
        Ok(self.state.read().await.payments.get(&id).cloned())
    }

    async fn find_by_order_id(&self, order_id: OrderId) -> Result<Option<Payment>> {
        let state = self.state.read().await;
        Ok(state
            .payments
            .values()
            .rev()
            .find(|p| p.order_id == order_id)
            .cloned())
    }

    async fn find_page(&self, request: PageRequest) -> Result<Page<Payment>> {
        let state = self.state.read().await;
        let content = state
            .payments
            .values()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(request.size() as usize)
            .cloned()
            .collect();
        Ok(Page::new(content, request, state.payments.len() as u64))
    }
}
