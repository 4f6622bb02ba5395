//! Request context carrying the authenticated user and their roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskin_entity::user::AppRole;

/// Context for the current authenticated request.
///
/// Extracted from the verified JWT by the API layer and passed into
/// service methods so every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// Roles held at token issue time.
    pub roles: Vec<AppRole>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, roles: Vec<AppRole>) -> Self {
        Self {
            user_id,
            roles,
            request_time: Utc::now(),
        }
    }

    /// Whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r.is_admin())
    }

    /// Whether the current user may accept service requests.
    pub fn is_service_provider(&self) -> bool {
        self.roles.iter().any(|r| r.is_service_provider())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_checks() {
        let provider = RequestContext::new(Uuid::new_v4(), vec![AppRole::User, AppRole::ServiceProvider]);
        assert!(provider.is_service_provider());
        assert!(!provider.is_admin());

        let customer = RequestContext::new(Uuid::new_v4(), vec![AppRole::User]);
        assert!(!customer.is_service_provider());
    }
}
