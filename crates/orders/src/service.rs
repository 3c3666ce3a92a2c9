//! Order placement: validate, persist, pay once, record the outcome.

use crate::payment_client::{PaymentClient, PaymentClientError, PaymentRequest};
use crate::transaction::PAYMENT_TEMPORARILY_FAILED_MESSAGE;
use crate::{
    CreateOrder, NewOrder, Order, OrderError, OrderId, OrderRepository, OrderStatus, Result,
    TransactionResponse,
};

/// Service for placing and reading orders.
pub struct OrderService<R: OrderRepository, C: PaymentClient> {
    repository: R,
    payments: C,
}

impl<R: OrderRepository, C: PaymentClient> OrderService<R, C> {
    /// Creates a new order service.
    pub fn new(repository: R, payments: C) -> Self {
        Self {
            repository,
            payments,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Returns a reference to the payment client.
    pub fn payments(&self) -> &C {
        &self.payments
    }

    /// Places an order and settles its payment in a single attempt.
    ///
    /// Only an invalid price or a persistence failure produce an error; every
    /// payment outcome is reported through the returned response and the
    /// order's final status.
    #[tracing::instrument(skip(self))]
    pub async fn place_order(&self, cmd: CreateOrder) -> Result<TransactionResponse> {
        validate_price(cmd.price)?;

        let order = self
            .repository
            .insert(NewOrder::pending(cmd.resolve_order_number(), cmd.price))
            .await?;
        tracing::info!(order_id = %order.id, order_number = %order.order_number, "order persisted");

        let request = PaymentRequest {
            order_id: order.id,
            amount: order.price,
        };

        let response = match self.payments.process_payment(&request).await {
            Ok(receipt) if receipt.is_successful() => {
                let order = self.transition(order, OrderStatus::Paid).await?;
                TransactionResponse::success(order, receipt.transaction_id)
            }
            Ok(receipt) => {
                tracing::warn!(order_id = %order.id, status = %receipt.status, "payment not successful");
                let message = format!("Payment was not successful: status {}", receipt.status);
                let order = self.transition(order, OrderStatus::PaymentFailed).await?;
                TransactionResponse::failed(order, message)
            }
            Err(PaymentClientError::Rejected { status, message }) => {
                tracing::error!(order_id = %order.id, status, %message, "payment processing failed");
                let order = self.transition(order, OrderStatus::PaymentFailed).await?;
                TransactionResponse::failed(order, format!("Payment processing failed: {message}"))
            }
            Err(PaymentClientError::Unavailable(reason)) => {
                tracing::error!(order_id = %order.id, %reason, "error communicating with payment service");
                let order = self.transition(order, OrderStatus::PaymentPending).await?;
                TransactionResponse::failed(order, PAYMENT_TEMPORARILY_FAILED_MESSAGE)
            }
        };

        metrics::counter!("orders_placed_total", "outcome" => response.order.status.as_str())
            .increment(1);
        Ok(response)
    }

    /// Loads an order by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    /// Loads every order.
    #[tracing::instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        self.repository.find_all().await
    }

    async fn transition(&self, order: Order, next: OrderStatus) -> Result<Order> {
        if !order.status.can_transition_to(next) {
            return Err(OrderError::InvalidStatusTransition {
                from: order.status,
                to: next,
            });
        }
        self.repository.update_status(order.id, next).await
    }
}

fn validate_price(price: f64) -> Result<()> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(OrderError::InvalidPrice { price })
    }
}
