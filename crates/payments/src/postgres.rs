use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    NewPayment, OrderId, Page, PageRequest, Payment, PaymentId, PaymentRepository, Result,
};

const PAYMENT_COLUMNS: &str = "id, order_id, amount, status, transaction_id, timestamp";

/// PostgreSQL-backed payment repository.
#[derive(Clone)]
pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    /// Creates a new repository over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Embedded payment service migrations.
    ///
    /// Versions are timestamps, and migrations recorded by other services
    /// sharing the database are ignored.
    pub fn migrator() -> Migrator {
        let mut migrator = sqlx::migrate!("./migrations");
        migrator.set_ignore_missing(true);
        migrator
    }

    /// Runs the payment service migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        Self::migrator().run(&self.pool).await?;
        Ok(())
    }

    fn row_to_payment(row: PgRow) -> Result<Payment> {
        let status: String = row.try_get("status")?;
        Ok(Payment {
            id: PaymentId::new(row.try_get("id")?),
            order_id: OrderId::new(row.try_get("order_id")?),
            amount: row.try_get("amount")?,
            status: status.parse()?,
            transaction_id: row.try_get("transaction_id")?,
            timestamp: row.try_get("timestamp")?,
        })
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn insert(&self, payment: NewPayment) -> Result<Payment> {
        let row = sqlx::query(&format!(
            "INSERT INTO payments (order_id, amount, status, transaction_id, timestamp) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(payment.order_id.get())
        .bind(payment.amount)
        .bind(payment.status.as_str())
        .bind(&payment.transaction_id)
        .bind(payment.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_payment(row)
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>> {
        sqlx::query(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?
        .map(Self::row_to_payment)
        .transpose()
    }

    async fn find_by_order_id(&self, order_id: OrderId) -> Result<Option<Payment>> {
        sqlx::query(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE order_id = $1 ORDER BY id DESC LIMIT 1"
        ))
        .bind(order_id.get())
        .fetch_optional(&self.pool)
        .await?
        .map(Self::row_to_payment)
        .transpose()
    }

    async fn find_page(&self, request: PageRequest) -> Result<Page<Payment>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments")
            .fetch_one(&self.pool)
            .await?;

        let content = sqlx::query(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(request.size()))
        .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Self::row_to_payment)
        .collect::<Result<Vec<_>>>()?;

        Ok(Page::new(content, request, total.max(0) as u64))
    }
}
