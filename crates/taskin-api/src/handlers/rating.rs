//! Rating handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use taskin_entity::rating::Rating;
use taskin_service::rating::RateRequestInput;

use crate::dto::request::RateRequest;
use crate::dto::response::{ApiResponse, RatingSummaryResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/requests/:id/rating
pub async fn rate_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Rating>>), ApiError> {
    crate::dto::check(&req)?;
    let rating = state
        .ratings
        .rate(
            &auth,
            id,
            RateRequestInput {
                stars: req.stars,
                review: req.review,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(rating))))
}

/// GET /api/providers/:id/ratings
pub async fn provider_ratings(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Rating>>>, ApiError> {
    let ratings = state.ratings.for_provider(id).await?;
    Ok(Json(ApiResponse::ok(ratings)))
}

/// GET /api/providers/:id/rating-summary
pub async fn provider_rating_summary(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RatingSummaryResponse>>, ApiError> {
    let ratings = state.ratings.for_provider(id).await?;
    let average = state.ratings.average(id).await?;
    Ok(Json(ApiResponse::ok(RatingSummaryResponse {
        average,
        count: ratings.len(),
    })))
}
