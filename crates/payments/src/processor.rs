//! Simulated payment processing.

use std::time::{Duration, Instant};

use chrono::Utc;

use crate::{
    NewPayment, OrderId, Page, PageRequest, Payment, PaymentError, PaymentId, PaymentRepository,
    PaymentStatus, ProcessPayment, Result,
};

/// How long a payment is held to simulate a gateway round trip.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(500);

/// Processes and looks up payments.
pub struct PaymentProcessor<R: PaymentRepository> {
    repository: R,
    processing_delay: Duration,
}

impl<R: PaymentRepository> PaymentProcessor<R> {
    /// Creates a processor with the default processing delay.
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            processing_delay: DEFAULT_PROCESSING_DELAY,
        }
    }

    /// Overrides the simulated processing delay.
    pub fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.processing_delay = delay;
        self
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Validates, processes and persists a payment.
    ///
    /// Processing always succeeds once the amount is valid.
    #[tracing::instrument(skip(self))]
    pub async fn process(&self, cmd: ProcessPayment) -> Result<Payment> {
        if !(cmd.amount.is_finite() && cmd.amount > 0.0) {
            return Err(PaymentError::InvalidAmount { amount: cmd.amount });
        }

        let started = Instant::now();
        let transaction_id = generate_transaction_id();
        tracing::debug!(%transaction_id, "payment accepted, processing");

        if !self.processing_delay.is_zero() {
            tokio::time::sleep(self.processing_delay).await;
        }

        let payment = self
            .repository
            .insert(NewPayment {
                order_id: cmd.order_id,
                amount: cmd.amount,
                status: PaymentStatus::Success,
                transaction_id,
                timestamp: Utc::now(),
            })
            .await?;

        metrics::counter!("payments_processed_total", "status" => payment.status.as_str())
            .increment(1);
        metrics::histogram!("payment_processing_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        tracing::info!(
            payment_id = %payment.id,
            order_id = %payment.order_id,
            transaction_id = %payment.transaction_id,
            "payment processed"
        );

        Ok(payment)
    }

    /// Loads a payment by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_payment(&self, id: PaymentId) -> Result<Payment> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PaymentError::NotFound(id))
    }

    /// Loads the most recent payment for an order.
    #[tracing::instrument(skip(self))]
    pub async fn get_payment_for_order(&self, order_id: OrderId) -> Result<Payment> {
        self.repository
            .find_by_order_id(order_id)
            .await?
            .ok_or(PaymentError::NotFoundForOrder(order_id))
    }

    /// Loads one page of payments.
    #[tracing::instrument(skip(self))]
    pub async fn list_payments(&self, request: PageRequest) -> Result<Page<Payment>> {
        self.repository.find_page(request).await
    }
}

/// Generates a transaction id: `TXN` plus ten upper-case hex characters.
pub fn generate_transaction_id() -> String {
    let simple = uuid::Uuid::new_v4().simple().to_string();
    format!("TXN{}", simple[..10].to_uppercase())
}
