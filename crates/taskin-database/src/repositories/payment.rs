//! Payment repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_entity::payment::Payment;

/// Repository for payment records.
///
/// At most one payment row exists per request; the unique constraint on
/// `request_id` turns double-payment attempts into Conflict errors.
#[async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
    /// Insert a payment record.
    async fn create(&self, payment: &Payment) -> AppResult<Payment>;

    /// Find a payment by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Payment>>;

    /// Find the payment attached to a request, if any.
    async fn find_by_request(&self, request_id: Uuid) -> AppResult<Option<Payment>>;

    /// List payments where the user is payer or payee, newest first.
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Payment>>;
}

/// PostgreSQL-backed payment repository.
#[derive(Debug, Clone)]
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    /// Create a new repository over a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn create(&self, payment: &Payment) -> AppResult<Payment> {
        sqlx::query_as::<_, Payment>(
            "INSERT INTO payments \
             (id, request_id, payer_id, payee_id, amount, status, method, transaction_id, created_at, completed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(payment.id)
        .bind(payment.request_id)
        .bind(payment.payer_id)
        .bind(payment.payee_id)
        .bind(payment.amount)
        .bind(payment.status)
        .bind(payment.method)
        .bind(&payment.transaction_id)
        .bind(payment.created_at)
        .bind(payment.completed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_request(&self, request_id: Uuid) -> AppResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE request_id = $1")
            .bind(request_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Payment>> {
        sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE payer_id = $1 OR payee_id = $1 \
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }
}
