//! Application role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a user can hold in Taskin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "app_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppRole {
    /// Platform administrator.
    Admin,
    /// Regular customer.
    User,
    /// Can accept and fulfil service requests.
    ServiceProvider,
}

impl AppRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role may accept service requests.
    pub fn is_service_provider(&self) -> bool {
        matches!(self, Self::ServiceProvider)
    }

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::ServiceProvider => "service_provider",
        }
    }
}

impl fmt::Display for AppRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppRole {
    type Err = taskin_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "service_provider" => Ok(Self::ServiceProvider),
            _ => Err(taskin_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: admin, user, service_provider"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<AppRole>().unwrap(), AppRole::Admin);
        assert_eq!(
            "service_provider".parse::<AppRole>().unwrap(),
            AppRole::ServiceProvider
        );
        assert!("manager".parse::<AppRole>().is_err());
    }

    #[test]
    fn test_predicates() {
        assert!(AppRole::ServiceProvider.is_service_provider());
        assert!(!AppRole::User.is_service_provider());
        assert!(AppRole::Admin.is_admin());
    }
}
