//! Chat message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One chat line. Append-only; only the read flag is ever mutated, and
/// only by the recipient.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Unique message identifier.
    pub id: Uuid,
    /// The conversation this message belongs to.
    pub conversation_id: Uuid,
    /// The sending party.
    pub sender_id: Uuid,
    /// Message body.
    pub content: String,
    /// Whether the recipient has read the message.
    pub read: bool,
    /// When the message was sent.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Construct an unread message.
    pub fn new(conversation_id: Uuid, sender_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            sender_id,
            content,
            read: false,
            created_at: Utc::now(),
        }
    }

    /// Whether `user_id` is the recipient (i.e. not the sender).
    pub fn is_unread_by(&self, user_id: Uuid) -> bool {
        !self.read && self.sender_id != user_id
    }
}
