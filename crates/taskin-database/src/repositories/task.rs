//! Personal task repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_entity::task::Task;

/// Repository for personal reminder tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// Insert a task.
    async fn create(&self, task: &Task) -> AppResult<Task>;

    /// Find a task by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Task>>;

    /// List a user's tasks ordered by due date and time.
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Task>>;

    /// List a user's tasks due on a specific date.
    async fn find_by_user_on(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Vec<Task>>;

    /// Overwrite a task's mutable fields. Returns the updated row or
    /// NotFound if it does not exist.
    async fn update(&self, task: &Task) -> AppResult<Task>;

    /// Flip a task's completion flag.
    async fn set_completed(&self, id: Uuid, user_id: Uuid, completed: bool) -> AppResult<bool>;

    /// Delete a task.
    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool>;
}

/// PostgreSQL-backed task repository.
#[derive(Debug, Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    /// Create a new repository over a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, task: &Task) -> AppResult<Task> {
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks \
             (id, user_id, title, date, time, priority, repeat, completed, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(task.id)
        .bind(task.user_id)
        .bind(&task.title)
        .bind(task.date)
        .bind(task.time)
        .bind(task.priority)
        .bind(&task.repeat)
        .bind(task.completed)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Task>> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Task>> {
        sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE user_id = $1 ORDER BY date ASC, time ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn find_by_user_on(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Vec<Task>> {
        sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE user_id = $1 AND date = $2 ORDER BY time ASC",
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn update(&self, task: &Task) -> AppResult<Task> {
        let updated = sqlx::query_as::<_, Task>(
            "UPDATE tasks \
             SET title = $3, date = $4, time = $5, priority = $6, repeat = $7, \
                 completed = $8, updated_at = $9 \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(task.id)
        .bind(task.user_id)
        .bind(&task.title)
        .bind(task.date)
        .bind(task.time)
        .bind(task.priority)
        .bind(&task.repeat)
        .bind(task.completed)
        .bind(task.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        updated.ok_or_else(|| AppError::not_found(format!("Task {} not found", task.id)))
    }

    async fn set_completed(&self, id: Uuid, user_id: Uuid, completed: bool) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE tasks SET completed = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .bind(completed)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
