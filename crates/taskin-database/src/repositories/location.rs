//! Provider location repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_entity::location::ProviderLocation;

/// Repository for last-known provider positions.
///
/// One logical row per (provider, request): upserts overwrite in place,
/// so no position history is retained.
#[async_trait]
pub trait LocationRepository: Send + Sync + 'static {
    /// Insert or overwrite the position row for (provider, request).
    async fn upsert(&self, location: &ProviderLocation) -> AppResult<ProviderLocation>;

    /// Latest position reported for a request, if any.
    async fn find_by_request(&self, request_id: Uuid) -> AppResult<Option<ProviderLocation>>;

    /// Remove the position row for a request once tracking ends.
    async fn delete_by_request(&self, request_id: Uuid) -> AppResult<bool>;
}

/// PostgreSQL-backed location repository.
#[derive(Debug, Clone)]
pub struct PgLocationRepository {
    pool: PgPool,
}

impl PgLocationRepository {
    /// Create a new repository over a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for PgLocationRepository {
    async fn upsert(&self, location: &ProviderLocation) -> AppResult<ProviderLocation> {
        sqlx::query_as::<_, ProviderLocation>(
            "INSERT INTO provider_locations (id, provider_id, request_id, latitude, longitude, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (provider_id, request_id) DO UPDATE \
             SET latitude = EXCLUDED.latitude, longitude = EXCLUDED.longitude, updated_at = EXCLUDED.updated_at \
             RETURNING *",
        )
        .bind(location.id)
        .bind(location.provider_id)
        .bind(location.request_id)
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(location.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn find_by_request(&self, request_id: Uuid) -> AppResult<Option<ProviderLocation>> {
        sqlx::query_as::<_, ProviderLocation>(
            "SELECT * FROM provider_locations WHERE request_id = $1 \
             ORDER BY updated_at DESC LIMIT 1",
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn delete_by_request(&self, request_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM provider_locations WHERE request_id = $1")
            .bind(request_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
