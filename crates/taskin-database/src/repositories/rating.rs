//! Rating repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_entity::rating::Rating;

/// Repository for post-completion ratings.
///
/// One rating per request; re-rating the same request hits the unique
/// constraint and surfaces as a Conflict.
#[async_trait]
pub trait RatingRepository: Send + Sync + 'static {
    /// Insert a rating.
    async fn create(&self, rating: &Rating) -> AppResult<Rating>;

    /// Find the rating left for a request, if any.
    async fn find_by_request(&self, request_id: Uuid) -> AppResult<Option<Rating>>;

    /// List ratings received by a user, newest first.
    async fn find_by_ratee(&self, ratee_id: Uuid) -> AppResult<Vec<Rating>>;

    /// Average stars received by a user, if they have any ratings.
    async fn average_for(&self, ratee_id: Uuid) -> AppResult<Option<f64>>;
}

/// PostgreSQL-backed rating repository.
#[derive(Debug, Clone)]
pub struct PgRatingRepository {
    pool: PgPool,
}

impl PgRatingRepository {
    /// Create a new repository over a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PgRatingRepository {
    async fn create(&self, rating: &Rating) -> AppResult<Rating> {
        sqlx::query_as::<_, Rating>(
            "INSERT INTO ratings (id, request_id, rater_id, ratee_id, stars, review, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(rating.id)
        .bind(rating.request_id)
        .bind(rating.rater_id)
        .bind(rating.ratee_id)
        .bind(rating.stars)
        .bind(&rating.review)
        .bind(rating.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn find_by_request(&self, request_id: Uuid) -> AppResult<Option<Rating>> {
        sqlx::query_as::<_, Rating>("SELECT * FROM ratings WHERE request_id = $1")
            .bind(request_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_ratee(&self, ratee_id: Uuid) -> AppResult<Vec<Rating>> {
        sqlx::query_as::<_, Rating>(
            "SELECT * FROM ratings WHERE ratee_id = $1 ORDER BY created_at DESC",
        )
        .bind(ratee_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn average_for(&self, ratee_id: Uuid) -> AppResult<Option<f64>> {
        sqlx::query_scalar("SELECT AVG(stars)::FLOAT8 FROM ratings WHERE ratee_id = $1")
            .bind(ratee_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
