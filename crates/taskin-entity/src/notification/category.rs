//! Notification category enumeration.

use serde::{Deserialize, Serialize};

/// Category of a notification, used for filtering and client iconography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    /// Service request lifecycle events (new request, accepted).
    Service,
    /// New chat message.
    Message,
    /// Payment settled / received.
    Payment,
    /// Personal task reminders.
    Reminder,
    /// System-level announcements.
    System,
}

impl NotificationCategory {
    /// Return the category as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Message => "message",
            Self::Payment => "payment",
            Self::Reminder => "reminder",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
