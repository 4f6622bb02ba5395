//! User profile entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Public-facing user profile. One row per user; identity itself lives in
/// the external auth provider.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    /// Row identifier.
    pub id: Uuid,
    /// The user this profile belongs to.
    pub user_id: Uuid,
    /// Display name.
    pub full_name: Option<String>,
    /// Contact e-mail.
    pub email: Option<String>,
    /// Contact phone number.
    pub contact_no: Option<String>,
    /// Free-form bio.
    pub bio: Option<String>,
    /// Profile photo URL.
    pub photo_url: Option<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Construct an empty profile for a user.
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            full_name: None,
            email: None,
            contact_no: None,
            bio: None,
            photo_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}
