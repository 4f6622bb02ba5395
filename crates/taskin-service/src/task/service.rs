//! Personal task service.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_database::repositories::task::TaskRepository;
use taskin_entity::task::{Task, TaskPriority};

use crate::context::RequestContext;

const REPEAT_VALUES: [&str; 4] = ["none", "daily", "weekly", "monthly"];

/// Input for creating a reminder task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskInput {
    /// What to do.
    pub title: String,
    /// Due date.
    pub date: NaiveDate,
    /// Due time of day.
    pub time: NaiveTime,
    /// Priority.
    pub priority: TaskPriority,
    /// Recurrence rule ("none", "daily", "weekly", "monthly").
    pub repeat: String,
}

/// Partial update for a task; absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub priority: Option<TaskPriority>,
    pub repeat: Option<String>,
}

/// Owner-scoped CRUD for reminder tasks. Tasks never leave their owner.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
}

impl TaskService {
    /// Creates a new task service.
    pub fn new(tasks: Arc<dyn TaskRepository>) -> Self {
        Self { tasks }
    }

    /// Create a task for the caller.
    pub async fn create(&self, ctx: &RequestContext, input: CreateTaskInput) -> AppResult<Task> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Title must not be empty"));
        }
        let repeat = validate_repeat(&input.repeat)?;

        let task = Task::new(
            ctx.user_id,
            title.to_string(),
            input.date,
            input.time,
            input.priority,
            repeat,
        );
        self.tasks.create(&task).await
    }

    /// The caller's tasks, ordered by due date and time.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Task>> {
        self.tasks.find_by_user(ctx.user_id).await
    }

    /// The caller's tasks due on a given date.
    pub async fn due_on(&self, ctx: &RequestContext, date: NaiveDate) -> AppResult<Vec<Task>> {
        self.tasks.find_by_user_on(ctx.user_id, date).await
    }

    /// Apply a partial update to one of the caller's tasks.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: UpdateTaskInput,
    ) -> AppResult<Task> {
        let mut task = self
            .tasks
            .find_by_id(id)
            .await?
            .filter(|t| t.user_id == ctx.user_id)
            .ok_or_else(|| AppError::not_found(format!("Task {id} not found")))?;

        if let Some(title) = input.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(AppError::validation("Title must not be empty"));
            }
            task.title = title;
        }
        if let Some(date) = input.date {
            task.date = date;
        }
        if let Some(time) = input.time {
            task.time = time;
        }
        if let Some(priority) = input.priority {
            task.priority = priority;
        }
        if let Some(repeat) = input.repeat {
            task.repeat = validate_repeat(&repeat)?;
        }
        task.updated_at = Utc::now();

        self.tasks.update(&task).await
    }

    /// Mark one of the caller's tasks done or not done.
    pub async fn set_completed(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        completed: bool,
    ) -> AppResult<()> {
        if self.tasks.set_completed(id, ctx.user_id, completed).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Task {id} not found")))
        }
    }

    /// Delete one of the caller's tasks.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        if self.tasks.delete(id, ctx.user_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Task {id} not found")))
        }
    }
}

fn validate_repeat(repeat: &str) -> AppResult<String> {
    let repeat = repeat.to_lowercase();
    if REPEAT_VALUES.contains(&repeat.as_str()) {
        Ok(repeat)
    } else {
        Err(AppError::validation(format!(
            "Invalid repeat '{repeat}'. Expected one of: none, daily, weekly, monthly"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskin_core::error::ErrorKind;
    use taskin_database::memory::MemoryTaskRepository;
    use taskin_entity::user::AppRole;

    fn service() -> TaskService {
        TaskService::new(Arc::new(MemoryTaskRepository::new()))
    }

    fn ctx() -> RequestContext {
        RequestContext::new(Uuid::new_v4(), vec![AppRole::User])
    }

    fn input() -> CreateTaskInput {
        CreateTaskInput {
            title: "water plants".into(),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            priority: TaskPriority::Medium,
            repeat: "daily".into(),
        }
    }

    #[tokio::test]
    async fn test_invalid_repeat_rejected() {
        let svc = service();
        let mut bad = input();
        bad.repeat = "fortnightly".into();
        let err = svc.create(&ctx(), bad).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let svc = service();
        let ctx = ctx();
        let task = svc.create(&ctx, input()).await.unwrap();

        let updated = svc
            .update(
                &ctx,
                task.id,
                UpdateTaskInput {
                    priority: Some(TaskPriority::High),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.priority, TaskPriority::High);
        assert_eq!(updated.title, "water plants");
        assert_eq!(updated.repeat, "daily");
    }

    #[tokio::test]
    async fn test_tasks_are_owner_scoped() {
        let svc = service();
        let owner = ctx();
        let task = svc.create(&owner, input()).await.unwrap();

        let stranger = ctx();
        let err = svc.delete(&stranger, task.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(svc.list(&stranger).await.unwrap().is_empty());

        svc.set_completed(&owner, task.id, true).await.unwrap();
        assert!(svc.list(&owner).await.unwrap()[0].completed);
    }
}
