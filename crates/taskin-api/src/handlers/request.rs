//! Service request handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use taskin_entity::request::ServiceRequest;
use taskin_service::request::CreateRequestInput;

use crate::dto::request::CreateServiceRequest;
use crate::dto::response::{ApiResponse, PaginatedResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/requests
pub async fn create_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceRequest>>), ApiError> {
    crate::dto::check(&req)?;
    let created = state
        .requests
        .create(
            &auth,
            CreateRequestInput {
                service_type: req.service_type,
                latitude: req.latitude,
                longitude: req.longitude,
                address: req.address,
                description: req.description,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

/// GET /api/requests/:id
pub async fn get_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ServiceRequest>>, ApiError> {
    let request = state.requests.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/requests/:id/accept
pub async fn accept_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ServiceRequest>>, ApiError> {
    let accepted = state.requests.accept(&auth, id).await?;
    Ok(Json(ApiResponse::ok(accepted)))
}

/// GET /api/requests/mine
pub async fn list_my_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<ServiceRequest>>>, ApiError> {
    let page = state
        .requests
        .list_mine(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.into())))
}

/// GET /api/requests/assigned
pub async fn list_assigned_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<ServiceRequest>>>, ApiError> {
    let page = state
        .requests
        .list_assigned(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.into())))
}

/// GET /api/requests/open
pub async fn list_open_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<ServiceRequest>>>, ApiError> {
    let page = state
        .requests
        .list_open(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.into())))
}
