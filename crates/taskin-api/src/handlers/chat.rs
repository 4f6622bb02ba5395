//! Chat handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use taskin_entity::chat::{Conversation, Message};

use crate::dto::request::SendMessageRequest;
use crate::dto::response::{ApiResponse, CountResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/requests/:id/conversation
pub async fn get_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Conversation>>, ApiError> {
    let conversation = state.chat.open(&auth, id).await?;
    Ok(Json(ApiResponse::ok(conversation)))
}

/// GET /api/requests/:id/messages
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Message>>>, ApiError> {
    let messages = state.chat.messages(&auth, id).await?;
    Ok(Json(ApiResponse::ok(messages)))
}

/// POST /api/requests/:id/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Message>>), ApiError> {
    crate::dto::check(&req)?;
    let message = state.chat.send(&auth, id, &req.content).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(message))))
}

/// PUT /api/requests/:id/messages/read
pub async fn mark_messages_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let marked = state.chat.mark_read(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "marked": marked } }),
    ))
}

/// GET /api/requests/:id/messages/unread-count
pub async fn unread_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.chat.unread_count(&auth, id).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}
