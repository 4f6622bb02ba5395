//! Payment handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use taskin_entity::payment::Payment;
use taskin_service::payment::PayRequestInput;

use crate::dto::request::PayRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/requests/:id/pay
pub async fn pay_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<PayRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Payment>>), ApiError> {
    crate::dto::check(&req)?;
    let payment = state
        .payments
        .pay(
            &auth,
            id,
            PayRequestInput {
                amount: req.amount,
                method: req.method,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(payment))))
}

/// GET /api/requests/:id/payment
pub async fn get_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    let payment = state.payments.for_request(&auth, id).await?;
    Ok(Json(ApiResponse::ok(payment)))
}

/// GET /api/payments
pub async fn payment_history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Payment>>>, ApiError> {
    let payments = state.payments.history(&auth).await?;
    Ok(Json(ApiResponse::ok(payments)))
}
