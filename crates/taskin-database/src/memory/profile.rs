//! In-memory profile store.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use taskin_core::result::AppResult;
use taskin_entity::user::Profile;

use crate::repositories::profile::ProfileRepository;

/// Dashmap-backed profile store, keyed by user id.
#[derive(Debug, Default)]
pub struct MemoryProfileRepository {
    by_user: DashMap<Uuid, Profile>,
}

impl MemoryProfileRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfileRepository {
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        Ok(self.by_user.get(&user_id).map(|p| p.clone()))
    }

    async fn upsert(&self, profile: &Profile) -> AppResult<Profile> {
        let stored = self
            .by_user
            .entry(profile.user_id)
            .and_modify(|row| {
                row.full_name = profile.full_name.clone();
                row.email = profile.email.clone();
                row.contact_no = profile.contact_no.clone();
                row.bio = profile.bio.clone();
                row.photo_url = profile.photo_url.clone();
                row.updated_at = profile.updated_at;
            })
            .or_insert_with(|| profile.clone())
            .clone();
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_keeps_one_row_per_user() {
        let repo = MemoryProfileRepository::new();
        let user = Uuid::new_v4();

        let mut profile = Profile::new(user);
        profile.full_name = Some("Asha Rao".into());
        repo.upsert(&profile).await.unwrap();

        let mut updated = Profile::new(user);
        updated.full_name = Some("Asha R.".into());
        repo.upsert(&updated).await.unwrap();

        let found = repo.find_by_user(user).await.unwrap().unwrap();
        assert_eq!(found.full_name.as_deref(), Some("Asha R."));
        assert_eq!(repo.by_user.len(), 1);
    }
}
