//! User role repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_entity::user::AppRole;

/// Repository for role assignments.
///
/// Roles come from the identity provider's user table; this repository
/// only reads and grants them, it never stores credentials.
#[async_trait]
pub trait RoleRepository: Send + Sync + 'static {
    /// Roles held by a user.
    async fn roles_of(&self, user_id: Uuid) -> AppResult<Vec<AppRole>>;

    /// All users holding a given role. Used by broadcast fan-out.
    async fn users_with_role(&self, role: AppRole) -> AppResult<Vec<Uuid>>;

    /// Grant a role to a user. Granting an already-held role is a no-op.
    async fn grant(&self, user_id: Uuid, role: AppRole) -> AppResult<()>;
}

/// PostgreSQL-backed role repository.
#[derive(Debug, Clone)]
pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    /// Create a new repository over a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn roles_of(&self, user_id: Uuid) -> AppResult<Vec<AppRole>> {
        sqlx::query_scalar::<_, AppRole>("SELECT role FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn users_with_role(&self, role: AppRole) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM user_roles WHERE role = $1")
            .bind(role)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn grant(&self, user_id: Uuid, role: AppRole) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO user_roles (user_id, role) VALUES ($1, $2) \
             ON CONFLICT (user_id, role) DO NOTHING",
        )
        .bind(user_id)
        .bind(role)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(())
    }
}
