//! Provider location handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use taskin_core::types::geo::GeoPoint;
use taskin_entity::location::ProviderLocation;

use crate::dto::request::ReportLocationRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// PUT /api/requests/:id/location
///
/// The assigned provider reports their current position while en route.
pub async fn report_location(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ReportLocationRequest>,
) -> Result<Json<ApiResponse<ProviderLocation>>, ApiError> {
    crate::dto::check(&req)?;
    let point = GeoPoint::new(req.latitude, req.longitude)?;
    let stored = state.tracking.report(&auth, id, point).await?;
    Ok(Json(ApiResponse::ok(stored)))
}

/// GET /api/requests/:id/location
///
/// The customer polls the provider's last reported position.
pub async fn get_location(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProviderLocation>>, ApiError> {
    let location = state.tracking.current(&auth, id).await?;
    Ok(Json(ApiResponse::ok(location)))
}
