//! Request DTOs with validation.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use taskin_entity::payment::PaymentMethod;
use taskin_entity::task::TaskPriority;

/// Post a new service request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateServiceRequest {
    /// Requested service category.
    #[validate(length(min = 1, max = 100, message = "service_type is required"))]
    pub service_type: String,
    /// Customer latitude.
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    /// Customer longitude.
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    /// Free-form address.
    pub address: Option<String>,
    /// Free-form description of the work.
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// Report the provider's current position.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReportLocationRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// Send a chat message.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    /// Message body.
    #[validate(length(min = 1, max = 2000, message = "content is required"))]
    pub content: String,
}

/// Pay for an accepted request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PayRequest {
    /// Amount to settle.
    #[validate(range(min = 0.01))]
    pub amount: f64,
    /// Payment instrument.
    pub method: PaymentMethod,
}

/// Rate a completed request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RateRequest {
    /// Star count, 1 to 5.
    #[validate(range(min = 1, max = 5))]
    pub stars: i16,
    /// Optional free-form review.
    #[validate(length(max = 2000))]
    pub review: Option<String>,
}

/// Create a reminder task.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// What to do.
    #[validate(length(min = 1, max = 255, message = "title is required"))]
    pub title: String,
    /// Due date.
    pub date: NaiveDate,
    /// Due time of day.
    pub time: NaiveTime,
    /// Priority.
    pub priority: TaskPriority,
    /// Recurrence rule ("none", "daily", "weekly", "monthly").
    #[serde(default = "default_repeat")]
    pub repeat: String,
}

fn default_repeat() -> String {
    "none".to_string()
}

/// Partially update a reminder task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub priority: Option<TaskPriority>,
    pub repeat: Option<String>,
    pub completed: Option<bool>,
}

/// Partially update the caller's profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 255))]
    pub full_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 32))]
    pub contact_no: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[validate(url)]
    pub photo_url: Option<String>,
}

/// Mute or unmute a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuteRequest {
    /// Desired muted state.
    pub muted: bool,
}
