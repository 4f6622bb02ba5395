//! Rating service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;
use taskin_database::repositories::rating::RatingRepository;
use taskin_database::repositories::request::RequestRepository;
use taskin_entity::rating::Rating;
use taskin_entity::request::RequestStatus;

use crate::context::RequestContext;

/// Input for rating a completed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateRequestInput {
    /// Star count, 1 to 5.
    pub stars: i16,
    /// Optional free-form review.
    pub review: Option<String>,
}

/// Lets customers rate providers once per completed request.
#[derive(Clone)]
pub struct RatingService {
    ratings: Arc<dyn RatingRepository>,
    requests: Arc<dyn RequestRepository>,
}

impl RatingService {
    /// Creates a new rating service.
    pub fn new(ratings: Arc<dyn RatingRepository>, requests: Arc<dyn RequestRepository>) -> Self {
        Self { ratings, requests }
    }

    /// Rate a completed request. Customer-only, once per request.
    pub async fn rate(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        input: RateRequestInput,
    ) -> AppResult<Rating> {
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Request {request_id} not found")))?;
        if request.customer_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Only the customer can rate this request",
            ));
        }
        if request.status != RequestStatus::Completed {
            return Err(AppError::conflict(
                "Only completed requests can be rated",
            ));
        }
        let ratee = request
            .provider_id
            .ok_or_else(|| AppError::internal("Completed request without provider"))?;

        let rating = Rating::new(request_id, ctx.user_id, ratee, input.stars, input.review)?;
        let stored = self.ratings.create(&rating).await?;
        info!(request_id = %request_id, stars = stored.stars, "request rated");
        Ok(stored)
    }

    /// Ratings a provider has received, newest first.
    pub async fn for_provider(&self, provider_id: Uuid) -> AppResult<Vec<Rating>> {
        self.ratings.find_by_ratee(provider_id).await
    }

    /// A provider's average stars, if they have any ratings.
    pub async fn average(&self, provider_id: Uuid) -> AppResult<Option<f64>> {
        self.ratings.average_for(provider_id).await
    }
}
