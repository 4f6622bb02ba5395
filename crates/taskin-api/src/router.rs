//! Route definitions for the Taskin HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes as usize;

    let api_routes = Router::new()
        .merge(request_routes())
        .merge(chat_routes())
        .merge(notification_routes())
        .merge(payment_routes())
        .merge(rating_routes())
        .merge(task_routes())
        .merge(profile_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Service request lifecycle, plus per-request location tracking.
fn request_routes() -> Router<AppState> {
    Router::new()
        .route("/requests", post(handlers::request::create_request))
        .route("/requests/mine", get(handlers::request::list_my_requests))
        .route(
            "/requests/assigned",
            get(handlers::request::list_assigned_requests),
        )
        .route("/requests/open", get(handlers::request::list_open_requests))
        .route("/requests/{id}", get(handlers::request::get_request))
        .route(
            "/requests/{id}/accept",
            post(handlers::request::accept_request),
        )
        .route(
            "/requests/{id}/location",
            put(handlers::tracking::report_location),
        )
        .route(
            "/requests/{id}/location",
            get(handlers::tracking::get_location),
        )
}

/// Per-request conversation and messages.
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/requests/{id}/conversation",
            get(handlers::chat::get_conversation),
        )
        .route("/requests/{id}/messages", get(handlers::chat::list_messages))
        .route("/requests/{id}/messages", post(handlers::chat::send_message))
        .route(
            "/requests/{id}/messages/read",
            put(handlers::chat::mark_messages_read),
        )
        .route(
            "/requests/{id}/messages/unread-count",
            get(handlers::chat::unread_messages),
        )
}

/// Notification endpoints.
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/{id}/mute",
            put(handlers::notification::set_muted),
        )
        .route(
            "/notifications/{id}",
            delete(handlers::notification::delete_notification),
        )
}

/// Payment endpoints.
fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/requests/{id}/pay", post(handlers::payment::pay_request))
        .route("/requests/{id}/payment", get(handlers::payment::get_payment))
        .route("/payments", get(handlers::payment::payment_history))
}

/// Rating endpoints.
fn rating_routes() -> Router<AppState> {
    Router::new()
        .route("/requests/{id}/rating", post(handlers::rating::rate_request))
        .route(
            "/providers/{id}/ratings",
            get(handlers::rating::provider_ratings),
        )
        .route(
            "/providers/{id}/rating-summary",
            get(handlers::rating::provider_rating_summary),
        )
}

/// Personal reminder task endpoints.
fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(handlers::task::list_tasks))
        .route("/tasks", post(handlers::task::create_task))
        .route("/tasks/{id}", put(handlers::task::update_task))
        .route("/tasks/{id}", delete(handlers::task::delete_task))
        .route("/tasks/{id}/complete", put(handlers::task::complete_task))
}

/// Profile and role endpoints.
fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(handlers::profile::get_profile))
        .route("/profile", put(handlers::profile::update_profile))
        .route("/profile/roles", get(handlers::profile::get_roles))
        .route(
            "/profile/become-provider",
            post(handlers::profile::become_provider),
        )
        .route(
            "/profiles/{user_id}",
            get(handlers::profile::get_public_profile),
        )
}

/// Health check endpoint (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors = cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds));

    cors
}
