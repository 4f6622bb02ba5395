//! Profile and role handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use taskin_core::error::AppError;
use taskin_entity::user::{AppRole, Profile};
use taskin_service::profile::UpdateProfileInput;

use crate::dto::request::UpdateProfileRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    let profile = state.profiles.get(&auth).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// PUT /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    crate::dto::check(&req)?;
    let profile = state
        .profiles
        .update(
            &auth,
            UpdateProfileInput {
                full_name: req.full_name,
                email: req.email,
                contact_no: req.contact_no,
                bio: req.bio,
                photo_url: req.photo_url,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// GET /api/profiles/:user_id
pub async fn get_public_profile(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    let profile = state
        .profiles
        .get_public(user_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No profile for user {user_id}")))?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// GET /api/profile/roles
pub async fn get_roles(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<AppRole>>>, ApiError> {
    let roles = state.profiles.roles(&auth).await?;
    Ok(Json(ApiResponse::ok(roles)))
}

/// POST /api/profile/become-provider
pub async fn become_provider(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.profiles.become_provider(&auth).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Provider role granted",
    ))))
}
