//! Profile service.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use taskin_core::result::AppResult;
use taskin_database::repositories::profile::ProfileRepository;
use taskin_database::repositories::role::RoleRepository;
use taskin_entity::user::{AppRole, Profile};

use crate::context::RequestContext;

/// Partial profile update; absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileInput {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
}

/// Profile reads and writes, plus opting in to the provider role.
#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl ProfileService {
    /// Creates a new profile service.
    pub fn new(profiles: Arc<dyn ProfileRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { profiles, roles }
    }

    /// The caller's profile, created empty on first access.
    pub async fn get(&self, ctx: &RequestContext) -> AppResult<Profile> {
        match self.profiles.find_by_user(ctx.user_id).await? {
            Some(profile) => Ok(profile),
            None => self.profiles.upsert(&Profile::new(ctx.user_id)).await,
        }
    }

    /// Another user's public profile, if they have one.
    pub async fn get_public(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        self.profiles.find_by_user(user_id).await
    }

    /// Apply a partial update to the caller's profile.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        input: UpdateProfileInput,
    ) -> AppResult<Profile> {
        let mut profile = self.get(ctx).await?;
        if let Some(full_name) = input.full_name {
            profile.full_name = Some(full_name);
        }
        if let Some(email) = input.email {
            profile.email = Some(email);
        }
        if let Some(contact_no) = input.contact_no {
            profile.contact_no = Some(contact_no);
        }
        if let Some(bio) = input.bio {
            profile.bio = Some(bio);
        }
        if let Some(photo_url) = input.photo_url {
            profile.photo_url = Some(photo_url);
        }
        profile.updated_at = Utc::now();
        self.profiles.upsert(&profile).await
    }

    /// Roles the caller currently holds.
    pub async fn roles(&self, ctx: &RequestContext) -> AppResult<Vec<AppRole>> {
        self.roles.roles_of(ctx.user_id).await
    }

    /// Opt the caller in to accepting service requests. Idempotent.
    pub async fn become_provider(&self, ctx: &RequestContext) -> AppResult<()> {
        self.roles.grant(ctx.user_id, AppRole::ServiceProvider).await?;
        info!(user_id = %ctx.user_id, "provider role granted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskin_database::memory::{MemoryProfileRepository, MemoryRoleRepository};

    fn service() -> ProfileService {
        ProfileService::new(
            Arc::new(MemoryProfileRepository::new()),
            Arc::new(MemoryRoleRepository::new()),
        )
    }

    fn ctx() -> RequestContext {
        RequestContext::new(Uuid::new_v4(), vec![AppRole::User])
    }

    #[tokio::test]
    async fn test_first_access_creates_empty_profile() {
        let svc = service();
        let ctx = ctx();
        let profile = svc.get(&ctx).await.unwrap();
        assert_eq!(profile.user_id, ctx.user_id);
        assert!(profile.full_name.is_none());
    }

    #[tokio::test]
    async fn test_partial_update() {
        let svc = service();
        let ctx = ctx();
        let updated = svc
            .update(
                &ctx,
                UpdateProfileInput {
                    full_name: Some("Asha Rao".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.full_name.as_deref(), Some("Asha Rao"));
        assert!(updated.email.is_none());
    }

    #[tokio::test]
    async fn test_become_provider_is_idempotent() {
        let svc = service();
        let ctx = ctx();
        svc.become_provider(&ctx).await.unwrap();
        svc.become_provider(&ctx).await.unwrap();
        assert_eq!(svc.roles(&ctx).await.unwrap(), vec![AppRole::ServiceProvider]);
    }
}
