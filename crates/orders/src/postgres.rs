use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{NewOrder, Order, OrderError, OrderId, OrderRepository, OrderStatus, Result};

const ORDER_COLUMNS: &str = "id, order_number, price, status, created_at";

/// PostgreSQL-backed order repository.
#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    /// Creates a new repository over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Embedded order service migrations.
    ///
    /// Versions are timestamps, and migrations recorded by other services
    /// sharing the database are ignored.
    pub fn migrator() -> Migrator {
        let mut migrator = sqlx::migrate!("./migrations");
        migrator.set_ignore_missing(true);
        migrator
    }

    /// Runs the order service migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        Self::migrator().run(&self.pool).await?;
        Ok(())
    }

    fn row_to_order(row: PgRow) -> Result<Order> {
        let status: String = row.try_get("status")?;
        Ok(Order {
            id: OrderId::new(row.try_get("id")?),
            order_number: row.try_get("order_number")?,
            price: row.try_get("price")?,
            status: status.parse()?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn insert(&self, order: NewOrder) -> Result<Order> {
        let row = sqlx::query(&format!(
            "INSERT INTO orders (order_number, price, status, created_at) \
             VALUES ($1, $2, $3, $4) RETURNING {ORDER_COLUMNS}"
        ))
        .bind(&order.order_number)
        .bind(order.price)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_order(row)
    }

    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order> {
        let row = sqlx::query(&format!(
            "UPDATE orders SET status = $1 WHERE id = $2 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(status.as_str())
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(OrderError::NotFound(id))?;

        Self::row_to_order(row)
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        sqlx::query(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?
            .map(Self::row_to_order)
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<Order>> {
        sqlx::query(&format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY id"))
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Self::row_to_order)
            .collect()
    }
}
