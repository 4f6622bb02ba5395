//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::NotificationCategory;

/// An asynchronous event surfaced to a user.
///
/// Created by lifecycle transitions and chat sends; mutated (read/muted)
/// or deleted only by the recipient.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub user_id: Uuid,
    /// Notification category.
    pub category: NotificationCategory,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// The entity this notification refers to (request or conversation id).
    pub related_id: Option<Uuid>,
    /// Client-side route hint.
    pub action_url: Option<String>,
    /// Whether the recipient has read it.
    pub read: bool,
    /// Whether the recipient muted it.
    pub muted: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Construct an unread, unmuted notification.
    pub fn new(
        user_id: Uuid,
        category: NotificationCategory,
        title: impl Into<String>,
        message: impl Into<String>,
        related_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            category,
            title: title.into(),
            message: message.into(),
            related_id,
            action_url: None,
            read: false,
            muted: false,
            created_at: Utc::now(),
        }
    }

    /// Attach a client route hint.
    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }
}
