//! Personal reminder task handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use taskin_entity::task::Task;
use taskin_service::task::{CreateTaskInput, UpdateTaskInput};

use crate::dto::request::{CreateTaskRequest, UpdateTaskRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Optional date filter for task listing.
#[derive(Debug, Deserialize)]
pub struct TaskListParams {
    /// Only tasks due on this date.
    pub date: Option<NaiveDate>,
}

/// GET /api/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<TaskListParams>,
) -> Result<Json<ApiResponse<Vec<Task>>>, ApiError> {
    let tasks = match params.date {
        Some(date) => state.tasks.due_on(&auth, date).await?,
        None => state.tasks.list(&auth).await?,
    };
    Ok(Json(ApiResponse::ok(tasks)))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), ApiError> {
    crate::dto::check(&req)?;
    let task = state
        .tasks
        .create(
            &auth,
            CreateTaskInput {
                title: req.title,
                date: req.date,
                time: req.time,
                priority: req.priority,
                repeat: req.repeat,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(task))))
}

/// PUT /api/tasks/:id
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    crate::dto::check(&req)?;
    if let Some(completed) = req.completed {
        state.tasks.set_completed(&auth, id, completed).await?;
    }
    let task = state
        .tasks
        .update(
            &auth,
            id,
            UpdateTaskInput {
                title: req.title,
                date: req.date,
                time: req.time,
                priority: req.priority,
                repeat: req.repeat,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(task)))
}

/// PUT /api/tasks/:id/complete
pub async fn complete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.tasks.set_completed(&auth, id, true).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Completed"))))
}

/// DELETE /api/tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.tasks.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Deleted"))))
}
