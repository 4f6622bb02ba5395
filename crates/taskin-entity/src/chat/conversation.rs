//! Conversation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A chat channel bound 1:1 to a service request.
///
/// Created lazily on first chat access; immutable afterwards. A uniqueness
/// constraint on `request_id` guarantees at most one conversation per
/// request even under concurrent creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Conversation {
    /// Unique conversation identifier.
    pub id: Uuid,
    /// The customer party.
    pub customer_id: Uuid,
    /// The provider party.
    pub provider_id: Uuid,
    /// The request this conversation belongs to.
    pub request_id: Uuid,
    /// When the conversation was created.
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// Construct a conversation for a request's two parties.
    pub fn new(request_id: Uuid, customer_id: Uuid, provider_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id,
            provider_id,
            request_id,
            created_at: Utc::now(),
        }
    }

    /// The other party relative to `user_id`, if `user_id` participates.
    pub fn counterpart_of(&self, user_id: Uuid) -> Option<Uuid> {
        if self.customer_id == user_id {
            Some(self.provider_id)
        } else if self.provider_id == user_id {
            Some(self.customer_id)
        } else {
            None
        }
    }
}
