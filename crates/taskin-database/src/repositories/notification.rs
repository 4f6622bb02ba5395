//! Notification repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_core::types::pagination::{PageRequest, PageResponse};
use taskin_entity::notification::Notification;

/// Repository for per-user notifications.
#[async_trait]
pub trait NotificationRepository: Send + Sync + 'static {
    /// Insert a single notification.
    async fn create(&self, notification: &Notification) -> AppResult<Notification>;

    /// Insert a batch of notifications in one round trip.
    ///
    /// Used by fan-out paths; an empty batch is a no-op.
    async fn create_many(&self, notifications: &[Notification]) -> AppResult<u64>;

    /// Find a notification by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>>;

    /// List a user's notifications, newest first.
    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>>;

    /// Count a user's unread, unmuted notifications.
    async fn unread_count(&self, user_id: Uuid) -> AppResult<i64>;

    /// Mark one notification read. Returns false if the row did not exist
    /// or belongs to another user.
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<bool>;

    /// Mark all of a user's notifications read. Returns how many changed.
    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64>;

    /// Toggle the muted flag on one notification.
    async fn set_muted(&self, id: Uuid, user_id: Uuid, muted: bool) -> AppResult<bool>;

    /// Delete one notification.
    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool>;
}

/// PostgreSQL-backed notification repository.
#[derive(Debug, Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new repository over a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn create(&self, notification: &Notification) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications \
             (id, user_id, category, title, message, related_id, action_url, read, muted, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(notification.id)
        .bind(notification.user_id)
        .bind(notification.category)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.related_id)
        .bind(&notification.action_url)
        .bind(notification.read)
        .bind(notification.muted)
        .bind(notification.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn create_many(&self, notifications: &[Notification]) -> AppResult<u64> {
        if notifications.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(AppError::from)?;
        for notification in notifications {
            sqlx::query(
                "INSERT INTO notifications \
                 (id, user_id, category, title, message, related_id, action_url, read, muted, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            )
            .bind(notification.id)
            .bind(notification.user_id)
            .bind(notification.category)
            .bind(&notification.title)
            .bind(&notification.message)
            .bind(notification.related_id)
            .bind(&notification.action_url)
            .bind(notification.read)
            .bind(notification.muted)
            .bind(notification.created_at)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from)?;
        }
        tx.commit().await.map_err(AppError::from)?;

        Ok(notifications.len() as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::from)?;

        let rows = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
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

    async fn unread_count(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE user_id = $1 AND read = FALSE AND muted = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE notifications SET read = TRUE WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(AppError::from)?;
        Ok(result.rows_affected() > 0)
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        let result =
            sqlx::query("UPDATE notifications SET read = TRUE WHERE user_id = $1 AND read = FALSE")
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(AppError::from)?;
        Ok(result.rows_affected())
    }

    async fn set_muted(&self, id: Uuid, user_id: Uuid, muted: bool) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE notifications SET muted = $3 WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .bind(muted)
                .execute(&self.pool)
                .await
                .map_err(AppError::from)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
