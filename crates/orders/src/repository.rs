use async_trait::async_trait;

use crate::{NewOrder, Order, OrderId, OrderStatus, Result};

/// Persistence for orders.
///
/// Implementations must be thread-safe (Send + Sync) since a single
/// repository is shared by every request handler.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists a new order and returns it with its assigned id.
    async fn insert(&self, order: NewOrder) -> Result<Order>;

    /// Overwrites the status of an existing order.
    ///
    /// Returns `OrderError::NotFound` if no such order exists.
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order>;

    /// Loads an order by id.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>>;

    /// Loads every order, ordered by id.
    async fn find_all(&self) -> Result<Vec<Order>>;
}
