//! In-memory notification store.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use taskin_core::result::AppResult;
use taskin_core::types::pagination::{PageRequest, PageResponse};
use taskin_entity::notification::Notification;

use crate::repositories::notification::NotificationRepository;

/// Dashmap-backed notification store.
#[derive(Debug, Default)]
pub struct MemoryNotificationRepository {
    rows: DashMap<Uuid, Notification>,
}

impl MemoryNotificationRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for MemoryNotificationRepository {
    async fn create(&self, notification: &Notification) -> AppResult<Notification> {
        self.rows.insert(notification.id, notification.clone());
        Ok(notification.clone())
    }

    async fn create_many(&self, notifications: &[Notification]) -> AppResult<u64> {
        for notification in notifications {
            self.rows.insert(notification.id, notification.clone());
        }
        Ok(notifications.len() as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        Ok(self.rows.get(&id).map(|n| n.clone()))
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let mut rows: Vec<Notification> = self
            .rows
            .iter()
            .filter(|n| n.user_id == user_id)
            .map(|n| n.clone())
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = rows.len() as u64;
        let items = rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn unread_count(&self, user_id: Uuid) -> AppResult<i64> {
        Ok(self
            .rows
            .iter()
            .filter(|n| n.user_id == user_id && !n.read && !n.muted)
            .count() as i64)
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        match self.rows.get_mut(&id) {
            Some(mut entry) if entry.user_id == user_id => {
                entry.read = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        let mut changed = 0;
        for mut entry in self.rows.iter_mut() {
            if entry.user_id == user_id && !entry.read {
                entry.read = true;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn set_muted(&self, id: Uuid, user_id: Uuid, muted: bool) -> AppResult<bool> {
        match self.rows.get_mut(&id) {
            Some(mut entry) if entry.user_id == user_id => {
                entry.muted = muted;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let removed = self
            .rows
            .remove_if(&id, |_, n| n.user_id == user_id)
            .is_some();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskin_entity::notification::NotificationCategory;

    #[tokio::test]
    async fn test_unread_count_excludes_muted() {
        let repo = MemoryNotificationRepository::new();
        let user = Uuid::new_v4();

        let plain = Notification::new(user, NotificationCategory::Service, "a", "b", None);
        let mut muted = Notification::new(user, NotificationCategory::Service, "c", "d", None);
        muted.muted = true;
        repo.create(&plain).await.unwrap();
        repo.create(&muted).await.unwrap();

        assert_eq!(repo.unread_count(user).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_recipient_scoped_mutation() {
        let repo = MemoryNotificationRepository::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let n = Notification::new(owner, NotificationCategory::Payment, "t", "m", None);
        repo.create(&n).await.unwrap();

        assert!(!repo.mark_read(n.id, stranger).await.unwrap());
        assert!(!repo.delete(n.id, stranger).await.unwrap());
        assert!(repo.mark_read(n.id, owner).await.unwrap());
        assert!(repo.delete(n.id, owner).await.unwrap());
    }
}
