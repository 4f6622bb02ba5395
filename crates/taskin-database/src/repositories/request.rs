//! Service request repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use taskin_core::error::{AppError, ErrorKind};
use taskin_core::result::AppResult;
use taskin_core::types::pagination::{PageRequest, PageResponse};
use taskin_entity::request::ServiceRequest;

/// Repository for service requests and their lifecycle transitions.
///
/// The two transition methods are conditional writes: they only apply when
/// the row is still in the expected state, so concurrent attempts resolve
/// to exactly one winner without any client-side locking.
#[async_trait]
pub trait RequestRepository: Send + Sync + 'static {
    /// Persist a new pending request.
    async fn create(&self, request: &ServiceRequest) -> AppResult<ServiceRequest>;

    /// Find a request by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ServiceRequest>>;

    /// List requests posted by a customer, newest first.
    async fn find_by_customer(
        &self,
        customer_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ServiceRequest>>;

    /// List requests assigned to a provider, newest first.
    async fn find_by_provider(
        &self,
        provider_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ServiceRequest>>;

    /// List open (pending) requests, newest first.
    async fn find_pending(&self, page: &PageRequest) -> AppResult<PageResponse<ServiceRequest>>;

    /// Atomically claim a pending request for `provider_id`.
    ///
    /// Succeeds only if the row is still `pending` with no provider set.
    /// Losing the race yields [`ErrorKind::Conflict`]; a missing row yields
    /// [`ErrorKind::NotFound`].
    async fn accept(
        &self,
        request_id: Uuid,
        provider_id: Uuid,
        accepted_at: DateTime<Utc>,
    ) -> AppResult<ServiceRequest>;

    /// Atomically move an accepted request to `completed`.
    ///
    /// Succeeds only if the row is still `accepted`; a second completion
    /// attempt yields [`ErrorKind::Conflict`].
    async fn complete(
        &self,
        request_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> AppResult<ServiceRequest>;
}

/// PostgreSQL-backed request repository.
#[derive(Debug, Clone)]
pub struct PgRequestRepository {
    pool: PgPool,
}

impl PgRequestRepository {
    /// Create a new repository over a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve why a conditional transition matched zero rows.
    async fn transition_failure(&self, request_id: Uuid, action: &str) -> AppError {
        match self.find_by_id(request_id).await {
            Ok(Some(existing)) => AppError::conflict(format!(
                "Request {request_id} is no longer available for {action} (status: {})",
                existing.status
            )),
            Ok(None) => AppError::not_found(format!("Request {request_id} not found")),
            Err(e) => e,
        }
    }
}

#[async_trait]
impl RequestRepository for PgRequestRepository {
    async fn create(&self, request: &ServiceRequest) -> AppResult<ServiceRequest> {
        sqlx::query_as::<_, ServiceRequest>(
            "INSERT INTO service_requests \
             (id, customer_id, provider_id, service_type, status, latitude, longitude, address, description, created_at, accepted_at, completed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(request.id)
        .bind(request.customer_id)
        .bind(request.provider_id)
        .bind(&request.service_type)
        .bind(request.status)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(&request.address)
        .bind(&request.description)
        .bind(request.created_at)
        .bind(request.accepted_at)
        .bind(request.completed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ServiceRequest>> {
        sqlx::query_as::<_, ServiceRequest>("SELECT * FROM service_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_customer(
        &self,
        customer_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ServiceRequest>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM service_requests WHERE customer_id = $1")
                .bind(customer_id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::from)?;

        let rows = sqlx::query_as::<_, ServiceRequest>(
            "SELECT * FROM service_requests WHERE customer_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(customer_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(PageResponse::new(
            rows,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn find_by_provider(
        &self,
        provider_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ServiceRequest>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM service_requests WHERE provider_id = $1")
                .bind(provider_id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::from)?;

        let rows = sqlx::query_as::<_, ServiceRequest>(
            "SELECT * FROM service_requests WHERE provider_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(provider_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(PageResponse::new(
            rows,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn find_pending(&self, page: &PageRequest) -> AppResult<PageResponse<ServiceRequest>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM service_requests WHERE status = 'pending'")
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::from)?;

        let rows = sqlx::query_as::<_, ServiceRequest>(
            "SELECT * FROM service_requests WHERE status = 'pending' \
             ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(PageResponse::new(
            rows,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn accept(
        &self,
        request_id: Uuid,
        provider_id: Uuid,
        accepted_at: DateTime<Utc>,
    ) -> AppResult<ServiceRequest> {
        let updated = sqlx::query_as::<_, ServiceRequest>(
            "UPDATE service_requests \
             SET provider_id = $2, status = 'accepted', accepted_at = $3 \
             WHERE id = $1 AND status = 'pending' AND provider_id IS NULL \
             RETURNING *",
        )
        .bind(request_id)
        .bind(provider_id)
        .bind(accepted_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        match updated {
            Some(request) => Ok(request),
            None => Err(self.transition_failure(request_id, "acceptance").await),
        }
    }

    async fn complete(
        &self,
        request_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> AppResult<ServiceRequest> {
        let updated = sqlx::query_as::<_, ServiceRequest>(
            "UPDATE service_requests \
             SET status = 'completed', completed_at = $2 \
             WHERE id = $1 AND status = 'accepted' \
             RETURNING *",
        )
        .bind(request_id)
        .bind(completed_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        match updated {
            Some(request) => Ok(request),
            None => Err(self.transition_failure(request_id, "completion").await),
        }
    }
}
