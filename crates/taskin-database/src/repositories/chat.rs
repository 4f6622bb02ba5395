//! Conversation and message repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_entity::chat::{Conversation, Message};

/// Repository for conversations and their messages.
#[async_trait]
pub trait ChatRepository: Send + Sync + 'static {
    /// Find the conversation bound to a request, if it exists.
    async fn find_conversation_by_request(
        &self,
        request_id: Uuid,
    ) -> AppResult<Option<Conversation>>;

    /// Find a conversation by id.
    async fn find_conversation(&self, id: Uuid) -> AppResult<Option<Conversation>>;

    /// Insert a conversation.
    ///
    /// The uniqueness constraint on `request_id` makes concurrent creation
    /// a race with one winner; losers receive a Conflict error and should
    /// re-read the winner's row.
    async fn create_conversation(&self, conversation: &Conversation) -> AppResult<Conversation>;

    /// List a conversation's messages, oldest first.
    async fn list_messages(&self, conversation_id: Uuid) -> AppResult<Vec<Message>>;

    /// Append a message.
    async fn append_message(&self, message: &Message) -> AppResult<Message>;

    /// Mark all messages not sent by `reader_id` as read. Returns how many
    /// rows changed.
    async fn mark_messages_read(&self, conversation_id: Uuid, reader_id: Uuid) -> AppResult<u64>;

    /// Count unread messages addressed to `reader_id`.
    async fn count_unread(&self, conversation_id: Uuid, reader_id: Uuid) -> AppResult<i64>;
}

/// PostgreSQL-backed chat repository.
#[derive(Debug, Clone)]
pub struct PgChatRepository {
    pool: PgPool,
}

impl PgChatRepository {
    /// Create a new repository over a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for PgChatRepository {
    async fn find_conversation_by_request(
        &self,
        request_id: Uuid,
    ) -> AppResult<Option<Conversation>> {
        sqlx::query_as::<_, Conversation>("SELECT * FROM conversations WHERE request_id = $1")
            .bind(request_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_conversation(&self, id: Uuid) -> AppResult<Option<Conversation>> {
        sqlx::query_as::<_, Conversation>("SELECT * FROM conversations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create_conversation(&self, conversation: &Conversation) -> AppResult<Conversation> {
        sqlx::query_as::<_, Conversation>(
            "INSERT INTO conversations (id, customer_id, provider_id, request_id, created_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(conversation.id)
        .bind(conversation.customer_id)
        .bind(conversation.provider_id)
        .bind(conversation.request_id)
        .bind(conversation.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn list_messages(&self, conversation_id: Uuid) -> AppResult<Vec<Message>> {
        sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE conversation_id = $1 ORDER BY created_at ASC",
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn append_message(&self, message: &Message) -> AppResult<Message> {
        sqlx::query_as::<_, Message>(
            "INSERT INTO messages (id, conversation_id, sender_id, content, read, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(message.id)
        .bind(message.conversation_id)
        .bind(message.sender_id)
        .bind(&message.content)
        .bind(message.read)
        .bind(message.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn mark_messages_read(&self, conversation_id: Uuid, reader_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE messages SET read = TRUE \
             WHERE conversation_id = $1 AND sender_id <> $2 AND read = FALSE",
        )
        .bind(conversation_id)
        .bind(reader_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(result.rows_affected())
    }

    async fn count_unread(&self, conversation_id: Uuid, reader_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages \
             WHERE conversation_id = $1 AND sender_id <> $2 AND read = FALSE",
        )
        .bind(conversation_id)
        .bind(reader_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }
}
