//! Chat service.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use taskin_core::error::{AppError, ErrorKind};
use taskin_core::result::AppResult;
use taskin_database::repositories::chat::ChatRepository;
use taskin_database::repositories::request::RequestRepository;
use taskin_entity::chat::{Conversation, Message};
use taskin_entity::notification::NotificationCategory;
use taskin_entity::request::{RequestStatus, ServiceRequest};
use taskin_realtime::{ChangeBroadcaster, ChangeOp};

use crate::context::RequestContext;
use crate::notification::NotificationService;

/// Maximum chat message length in characters.
const MAX_MESSAGE_LEN: usize = 2000;

/// One conversation per request, opened lazily on first access, with
/// append-only messages between the two parties.
#[derive(Clone)]
pub struct ChatService {
    chats: Arc<dyn ChatRepository>,
    requests: Arc<dyn RequestRepository>,
    notifier: NotificationService,
    broadcaster: Arc<ChangeBroadcaster>,
}

impl ChatService {
    /// Creates a new chat service.
    pub fn new(
        chats: Arc<dyn ChatRepository>,
        requests: Arc<dyn RequestRepository>,
        notifier: NotificationService,
        broadcaster: Arc<ChangeBroadcaster>,
    ) -> Self {
        Self {
            chats,
            requests,
            notifier,
            broadcaster,
        }
    }

    /// Get or lazily create the conversation for a request.
    ///
    /// Chat opens once a provider has accepted; both parties see the same
    /// conversation. Losing the creation race falls back to the winner's
    /// row.
    pub async fn open(&self, ctx: &RequestContext, request_id: Uuid) -> AppResult<Conversation> {
        let request = self.party_request(ctx, request_id).await?;
        if request.status == RequestStatus::Pending {
            return Err(AppError::conflict(
                "Chat opens once a provider accepts the request",
            ));
        }
        let provider_id = request
            .provider_id
            .ok_or_else(|| AppError::internal("Accepted request without provider"))?;

        if let Some(existing) = self.chats.find_conversation_by_request(request_id).await? {
            return Ok(existing);
        }

        let conversation = Conversation::new(request_id, request.customer_id, provider_id);
        match self.chats.create_conversation(&conversation).await {
            Ok(created) => {
                debug!(request_id = %request_id, conversation_id = %created.id, "conversation opened");
                Ok(created)
            }
            Err(e) if e.kind == ErrorKind::Conflict => self
                .chats
                .find_conversation_by_request(request_id)
                .await?
                .ok_or(e),
            Err(e) => Err(e),
        }
    }

    /// Send a message in a request's conversation and notify the other
    /// party.
    pub async fn send(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        content: &str,
    ) -> AppResult<Message> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::validation("Message must not be empty"));
        }
        if content.chars().count() > MAX_MESSAGE_LEN {
            return Err(AppError::validation(format!(
                "Message exceeds {MAX_MESSAGE_LEN} characters"
            )));
        }

        let conversation = self.open(ctx, request_id).await?;
        let message = Message::new(conversation.id, ctx.user_id, content.to_string());
        let stored = self.chats.append_message(&message).await?;
        self.broadcaster
            .publish("messages", ChangeOp::Insert, &stored)?;

        if let Some(counterpart) = conversation.counterpart_of(ctx.user_id) {
            self.notifier
                .notify(
                    counterpart,
                    NotificationCategory::Message,
                    "New Message",
                    content,
                    Some(request_id),
                )
                .await?;
        }

        info!(conversation_id = %conversation.id, "message sent");
        Ok(stored)
    }

    /// Message history for a request's conversation, oldest first.
    pub async fn messages(&self, ctx: &RequestContext, request_id: Uuid) -> AppResult<Vec<Message>> {
        let conversation = self.open(ctx, request_id).await?;
        self.chats.list_messages(conversation.id).await
    }

    /// Mark every message from the other party as read.
    pub async fn mark_read(&self, ctx: &RequestContext, request_id: Uuid) -> AppResult<u64> {
        let conversation = self.open(ctx, request_id).await?;
        self.chats
            .mark_messages_read(conversation.id, ctx.user_id)
            .await
    }

    /// Unread messages awaiting the caller in a request's conversation.
    pub async fn unread_count(&self, ctx: &RequestContext, request_id: Uuid) -> AppResult<i64> {
        let conversation = self.open(ctx, request_id).await?;
        self.chats.count_unread(conversation.id, ctx.user_id).await
    }

    async fn party_request(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
    ) -> AppResult<ServiceRequest> {
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Request {request_id} not found")))?;
        if !request.involves(ctx.user_id) {
            return Err(AppError::forbidden("You are not a party to this request"));
        }
        Ok(request)
    }
}
