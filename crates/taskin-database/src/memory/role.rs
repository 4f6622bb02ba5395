//! In-memory role store.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use taskin_core::result::AppResult;
use taskin_entity::user::AppRole;

use crate::repositories::role::RoleRepository;

/// Dashmap-backed role store.
#[derive(Debug, Default)]
pub struct MemoryRoleRepository {
    roles: DashMap<Uuid, Vec<AppRole>>,
}

impl MemoryRoleRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleRepository for MemoryRoleRepository {
    async fn roles_of(&self, user_id: Uuid) -> AppResult<Vec<AppRole>> {
        Ok(self.roles.get(&user_id).map(|r| r.clone()).unwrap_or_default())
    }

    async fn users_with_role(&self, role: AppRole) -> AppResult<Vec<Uuid>> {
        Ok(self
            .roles
            .iter()
            .filter(|entry| entry.value().contains(&role))
            .map(|entry| *entry.key())
            .collect())
    }

    async fn grant(&self, user_id: Uuid, role: AppRole) -> AppResult<()> {
        let mut held = self.roles.entry(user_id).or_default();
        if !held.contains(&role) {
            held.push(role);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_grant_is_idempotent() {
        let repo = MemoryRoleRepository::new();
        let user = Uuid::new_v4();

        repo.grant(user, AppRole::ServiceProvider).await.unwrap();
        repo.grant(user, AppRole::ServiceProvider).await.unwrap();

        assert_eq!(repo.roles_of(user).await.unwrap(), vec![AppRole::ServiceProvider]);
        assert_eq!(
            repo.users_with_role(AppRole::ServiceProvider).await.unwrap(),
            vec![user]
        );
        assert!(repo.users_with_role(AppRole::Admin).await.unwrap().is_empty());
    }
}
