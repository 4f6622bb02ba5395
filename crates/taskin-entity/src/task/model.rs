//! Personal reminder task entity model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::priority::TaskPriority;

/// A personal reminder ("Remind Me") item, owned entirely by one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique task identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
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
    /// Whether the task is done.
    pub completed: bool,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Construct a new incomplete task.
    pub fn new(
        user_id: Uuid,
        title: String,
        date: NaiveDate,
        time: NaiveTime,
        priority: TaskPriority,
        repeat: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            date,
            time,
            priority,
            repeat,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }
}
