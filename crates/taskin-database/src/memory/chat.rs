//! In-memory conversation and message store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_entity::chat::{Conversation, Message};

use crate::repositories::chat::ChatRepository;

/// Dashmap-backed chat store.
///
/// Conversations are keyed by request id, so the entry API gives the
/// same one-conversation-per-request guarantee as the SQL unique index.
#[derive(Debug, Default)]
pub struct MemoryChatRepository {
    by_request: DashMap<Uuid, Conversation>,
    messages: DashMap<Uuid, Vec<Message>>,
}

impl MemoryChatRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatRepository for MemoryChatRepository {
    async fn find_conversation_by_request(
        &self,
        request_id: Uuid,
    ) -> AppResult<Option<Conversation>> {
        Ok(self.by_request.get(&request_id).map(|c| c.clone()))
    }

    async fn find_conversation(&self, id: Uuid) -> AppResult<Option<Conversation>> {
        Ok(self
            .by_request
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.clone()))
    }

    async fn create_conversation(&self, conversation: &Conversation) -> AppResult<Conversation> {
        match self.by_request.entry(conversation.request_id) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Conversation for request {} already exists",
                conversation.request_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(conversation.clone());
                Ok(conversation.clone())
            }
        }
    }

    async fn list_messages(&self, conversation_id: Uuid) -> AppResult<Vec<Message>> {
        let mut messages = self
            .messages
            .get(&conversation_id)
            .map(|m| m.clone())
            .unwrap_or_default();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    async fn append_message(&self, message: &Message) -> AppResult<Message> {
        self.messages
            .entry(message.conversation_id)
            .or_default()
            .push(message.clone());
        Ok(message.clone())
    }

    async fn mark_messages_read(&self, conversation_id: Uuid, reader_id: Uuid) -> AppResult<u64> {
        let mut changed = 0;
        if let Some(mut messages) = self.messages.get_mut(&conversation_id) {
            for message in messages.iter_mut() {
                if !message.read && message.sender_id != reader_id {
                    message.read = true;
                    changed += 1;
                }
            }
        }
        Ok(changed)
    }

    async fn count_unread(&self, conversation_id: Uuid, reader_id: Uuid) -> AppResult<i64> {
        let count = self
            .messages
            .get(&conversation_id)
            .map(|messages| {
                messages
                    .iter()
                    .filter(|m| !m.read && m.sender_id != reader_id)
                    .count() as i64
            })
            .unwrap_or(0);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskin_core::error::ErrorKind;

    #[tokio::test]
    async fn test_one_conversation_per_request() {
        let repo = MemoryChatRepository::new();
        let request = Uuid::new_v4();
        let first = Conversation::new(request, Uuid::new_v4(), Uuid::new_v4());
        repo.create_conversation(&first).await.unwrap();

        let second = Conversation::new(request, Uuid::new_v4(), Uuid::new_v4());
        let err = repo.create_conversation(&second).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let found = repo
            .find_conversation_by_request(request)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, first.id);
    }

    #[tokio::test]
    async fn test_mark_read_skips_own_messages() {
        let repo = MemoryChatRepository::new();
        let (customer, provider) = (Uuid::new_v4(), Uuid::new_v4());
        let conversation = Conversation::new(Uuid::new_v4(), customer, provider);
        repo.create_conversation(&conversation).await.unwrap();

        repo.append_message(&Message::new(conversation.id, customer, "hi".into()))
            .await
            .unwrap();
        repo.append_message(&Message::new(conversation.id, provider, "hello".into()))
            .await
            .unwrap();

        assert_eq!(repo.count_unread(conversation.id, customer).await.unwrap(), 1);
        let changed = repo
            .mark_messages_read(conversation.id, customer)
            .await
            .unwrap();
        assert_eq!(changed, 1);
        assert_eq!(repo.count_unread(conversation.id, customer).await.unwrap(), 0);
        // provider's own unread view is untouched
        assert_eq!(repo.count_unread(conversation.id, provider).await.unwrap(), 1);
    }
}
