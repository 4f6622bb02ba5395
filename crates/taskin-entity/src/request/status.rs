//! Service request lifecycle status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a service request.
///
/// Transitions are monotonic: `Pending → Accepted → Completed`. There is no
/// backward transition and no cancellation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Created by the customer; open for any provider to accept.
    Pending,
    /// Exactly one provider has claimed the request.
    Accepted,
    /// Payment has settled. Terminal.
    Completed,
}

impl RequestStatus {
    /// Whether a transition from `self` to `next` is allowed.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Accepted) | (Self::Accepted, Self::Completed)
        )
    }

    /// Whether this is the terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = taskin_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "completed" => Ok(Self::Completed),
            _ => Err(taskin_core::AppError::validation(format!(
                "Invalid request status: '{s}'. Expected one of: pending, accepted, completed"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Accepted));
        assert!(RequestStatus::Accepted.can_transition_to(RequestStatus::Completed));
    }

    #[test]
    fn test_backward_and_skipping_transitions_rejected() {
        assert!(!RequestStatus::Accepted.can_transition_to(RequestStatus::Pending));
        assert!(!RequestStatus::Completed.can_transition_to(RequestStatus::Accepted));
        assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::Completed));
        assert!(!RequestStatus::Completed.can_transition_to(RequestStatus::Pending));
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "pending".parse::<RequestStatus>().unwrap(),
            RequestStatus::Pending
        );
        assert_eq!(
            "ACCEPTED".parse::<RequestStatus>().unwrap(),
            RequestStatus::Accepted
        );
        assert!("cancelled".parse::<RequestStatus>().is_err());
    }
}
