//! User profile repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_entity::user::Profile;

/// Repository for user profiles.
///
/// Profiles are keyed by the identity provider's user id; upserts keep
/// exactly one row per user.
#[async_trait]
pub trait ProfileRepository: Send + Sync + 'static {
    /// Find a profile by the owning user id.
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Profile>>;

    /// Insert or overwrite the profile for a user.
    async fn upsert(&self, profile: &Profile) -> AppResult<Profile>;
}

/// PostgreSQL-backed profile repository.
#[derive(Debug, Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new repository over a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn upsert(&self, profile: &Profile) -> AppResult<Profile> {
        sqlx::query_as::<_, Profile>(
            "INSERT INTO profiles \
             (id, user_id, full_name, email, contact_no, bio, photo_url, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (user_id) DO UPDATE \
             SET full_name = EXCLUDED.full_name, email = EXCLUDED.email, \
                 contact_no = EXCLUDED.contact_no, bio = EXCLUDED.bio, \
                 photo_url = EXCLUDED.photo_url, updated_at = EXCLUDED.updated_at \
             RETURNING *",
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.full_name)
        .bind(&profile.email)
        .bind(&profile.contact_no)
        .bind(&profile.bio)
        .bind(&profile.photo_url)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }
}
