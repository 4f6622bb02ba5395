//! Rating entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use taskin_core::AppError;

/// Star-rating feedback on a completed request. Created once per request
/// by the customer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rating {
    /// Unique rating identifier.
    pub id: Uuid,
    /// The rated request.
    pub request_id: Uuid,
    /// The customer who rated.
    pub rater_id: Uuid,
    /// The provider being rated.
    pub ratee_id: Uuid,
    /// Star count, 1 to 5.
    pub stars: i16,
    /// Optional free-form review.
    pub review: Option<String>,
    /// When the rating was submitted.
    pub created_at: DateTime<Utc>,
}

impl Rating {
    /// Construct a rating, validating the star range.
    pub fn new(
        request_id: Uuid,
        rater_id: Uuid,
        ratee_id: Uuid,
        stars: i16,
        review: Option<String>,
    ) -> Result<Self, AppError> {
        if !(1..=5).contains(&stars) {
            return Err(AppError::validation(format!(
                "Star rating must be between 1 and 5, got {stars}"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            request_id,
            rater_id,
            ratee_id,
            stars,
            review,
            created_at: Utc::now(),
        })
    }
}
