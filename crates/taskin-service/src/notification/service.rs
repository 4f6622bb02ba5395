//! Notification service.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_core::types::pagination::{PageRequest, PageResponse};
use taskin_database::repositories::notification::NotificationRepository;
use taskin_entity::notification::{Notification, NotificationCategory};
use taskin_realtime::{ChangeBroadcaster, ChangeOp};

use crate::context::RequestContext;

/// Creates notifications on behalf of other services and lets recipients
/// manage their own.
#[derive(Clone)]
pub struct NotificationService {
    repo: Arc<dyn NotificationRepository>,
    broadcaster: Arc<ChangeBroadcaster>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(repo: Arc<dyn NotificationRepository>, broadcaster: Arc<ChangeBroadcaster>) -> Self {
        Self { repo, broadcaster }
    }

    /// Deliver one notification and surface it on the change feed.
    pub async fn notify(
        &self,
        user_id: Uuid,
        category: NotificationCategory,
        title: impl Into<String>,
        message: impl Into<String>,
        related_id: Option<Uuid>,
    ) -> AppResult<Notification> {
        let notification = Notification::new(user_id, category, title, message, related_id);
        let stored = self.repo.create(&notification).await?;
        self.broadcaster
            .publish("notifications", ChangeOp::Insert, &stored)?;
        debug!(user_id = %user_id, category = ?category, "notification delivered");
        Ok(stored)
    }

    /// Deliver the same notification to many recipients in one batch.
    ///
    /// Each recipient gets their own row; the change feed carries one
    /// event per row so per-user subscriptions still work.
    pub async fn notify_many(
        &self,
        user_ids: &[Uuid],
        category: NotificationCategory,
        title: &str,
        message: &str,
        related_id: Option<Uuid>,
    ) -> AppResult<u64> {
        let notifications: Vec<Notification> = user_ids
            .iter()
            .map(|user_id| Notification::new(*user_id, category, title, message, related_id))
            .collect();
        let created = self.repo.create_many(&notifications).await?;
        for notification in &notifications {
            self.broadcaster
                .publish("notifications", ChangeOp::Insert, notification)?;
        }
        info!(recipients = created, category = ?category, "notification fan-out");
        Ok(created)
    }

    /// List the caller's notifications, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        self.repo.find_by_user(ctx.user_id, &page).await
    }

    /// Count the caller's unread, unmuted notifications.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<i64> {
        self.repo.unread_count(ctx.user_id).await
    }

    /// Mark one of the caller's notifications read.
    pub async fn mark_read(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        if self.repo.mark_read(id, ctx.user_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Notification {id} not found")))
        }
    }

    /// Mark all of the caller's notifications read.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        self.repo.mark_all_read(ctx.user_id).await
    }

    /// Mute or unmute one of the caller's notifications.
    pub async fn set_muted(&self, ctx: &RequestContext, id: Uuid, muted: bool) -> AppResult<()> {
        if self.repo.set_muted(id, ctx.user_id, muted).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Notification {id} not found")))
        }
    }

    /// Delete one of the caller's notifications.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        if self.repo.delete(id, ctx.user_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Notification {id} not found")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskin_core::error::ErrorKind;
    use taskin_database::memory::MemoryNotificationRepository;
    use taskin_entity::user::AppRole;

    fn service() -> NotificationService {
        NotificationService::new(
            Arc::new(MemoryNotificationRepository::new()),
            Arc::new(ChangeBroadcaster::new(16)),
        )
    }

    #[tokio::test]
    async fn test_recipient_cannot_touch_others_rows() {
        let svc = service();
        let owner = Uuid::new_v4();
        let n = svc
            .notify(owner, NotificationCategory::System, "t", "m", None)
            .await
            .unwrap();

        let stranger = RequestContext::new(Uuid::new_v4(), vec![AppRole::User]);
        let err = svc.mark_read(&stranger, n.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let ctx = RequestContext::new(owner, vec![AppRole::User]);
        svc.mark_read(&ctx, n.id).await.unwrap();
        assert_eq!(svc.unread_count(&ctx).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_fan_out_creates_one_row_per_recipient() {
        let svc = service();
        let recipients: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let created = svc
            .notify_many(
                &recipients,
                NotificationCategory::Service,
                "New Service Request",
                "A customer nearby needs a Plumber",
                Some(Uuid::new_v4()),
            )
            .await
            .unwrap();
        assert_eq!(created, 3);

        for user in recipients {
            let ctx = RequestContext::new(user, vec![AppRole::ServiceProvider]);
            assert_eq!(svc.unread_count(&ctx).await.unwrap(), 1);
        }
    }
}
