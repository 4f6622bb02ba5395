//! In-memory personal task store.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_entity::task::Task;

use crate::repositories::task::TaskRepository;

/// Dashmap-backed task store.
#[derive(Debug, Default)]
pub struct MemoryTaskRepository {
    rows: DashMap<Uuid, Task>,
}

impl MemoryTaskRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for MemoryTaskRepository {
    async fn create(&self, task: &Task) -> AppResult<Task> {
        self.rows.insert(task.id, task.clone());
        Ok(task.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Task>> {
        Ok(self.rows.get(&id).map(|t| t.clone()))
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .rows
            .iter()
            .filter(|t| t.user_id == user_id)
            .map(|t| t.clone())
            .collect();
        tasks.sort_by(|a, b| (a.date, a.time).cmp(&(b.date, b.time)));
        Ok(tasks)
    }

    async fn find_by_user_on(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .rows
            .iter()
            .filter(|t| t.user_id == user_id && t.date == date)
            .map(|t| t.clone())
            .collect();
        tasks.sort_by(|a, b| a.time.cmp(&b.time));
        Ok(tasks)
    }

    async fn update(&self, task: &Task) -> AppResult<Task> {
        match self.rows.get_mut(&task.id) {
            Some(mut entry) if entry.user_id == task.user_id => {
                *entry = task.clone();
                Ok(task.clone())
            }
            _ => Err(AppError::not_found(format!("Task {} not found", task.id))),
        }
    }

    async fn set_completed(&self, id: Uuid, user_id: Uuid, completed: bool) -> AppResult<bool> {
        match self.rows.get_mut(&id) {
            Some(mut entry) if entry.user_id == user_id => {
                entry.completed = completed;
                entry.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        Ok(self.rows.remove_if(&id, |_, t| t.user_id == user_id).is_some())
    }
}
