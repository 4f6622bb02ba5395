//! Integration tests for per-request chat and location tracking.

mod helpers;

use axum::http::StatusCode;
use uuid::Uuid;

struct AcceptedRequest {
    id: String,
    customer: String,
    provider: String,
}

async fn accepted_request(app: &helpers::TestApp) -> AcceptedRequest {
    let customer = app.customer_token(Uuid::new_v4());
    let created = app
        .request(
            "POST",
            "/api/requests",
            Some(serde_json::json!({
                "service_type": "Electrician",
                "latitude": 12.97,
                "longitude": 77.59,
            })),
            Some(&customer),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.data()["id"].as_str().unwrap().to_string();

    let provider = app.provider_token(Uuid::new_v4());
    let accepted = app
        .request("POST", &format!("/api/requests/{id}/accept"), None, Some(&provider))
        .await;
    assert_eq!(accepted.status, StatusCode::OK);

    AcceptedRequest {
        id,
        customer,
        provider,
    }
}

#[tokio::test]
async fn test_no_conversation_while_pending() {
    let app = helpers::TestApp::new();
    let customer = app.customer_token(Uuid::new_v4());
    let created = app
        .request(
            "POST",
            "/api/requests",
            Some(serde_json::json!({
                "service_type": "Electrician",
                "latitude": 12.97,
                "longitude": 77.59,
            })),
            Some(&customer),
        )
        .await;
    let id = created.data()["id"].as_str().unwrap().to_string();

    let response = app
        .request("GET", &format!("/api/requests/{id}/conversation"), None, Some(&customer))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_chat_between_parties() {
    let app = helpers::TestApp::new();
    let req = accepted_request(&app).await;

    let conversation = app
        .request(
            "GET",
            &format!("/api/requests/{}/conversation", req.id),
            None,
            Some(&req.customer),
        )
        .await;
    assert_eq!(conversation.status, StatusCode::OK);

    let sent = app
        .request(
            "POST",
            &format!("/api/requests/{}/messages", req.id),
            Some(serde_json::json!({ "content": "On my way, 20 minutes out" })),
            Some(&req.provider),
        )
        .await;
    assert_eq!(sent.status, StatusCode::CREATED);

    let messages = app
        .request(
            "GET",
            &format!("/api/requests/{}/messages", req.id),
            None,
            Some(&req.customer),
        )
        .await;
    assert_eq!(messages.status, StatusCode::OK);
    let items = messages.data().as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["content"], "On my way, 20 minutes out");

    let unread = app
        .request(
            "GET",
            &format!("/api/requests/{}/messages/unread-count", req.id),
            None,
            Some(&req.customer),
        )
        .await;
    assert_eq!(unread.data()["count"], 1);

    app.request(
        "PUT",
        &format!("/api/requests/{}/messages/read", req.id),
        None,
        Some(&req.customer),
    )
    .await;

    let unread = app
        .request(
            "GET",
            &format!("/api/requests/{}/messages/unread-count", req.id),
            None,
            Some(&req.customer),
        )
        .await;
    assert_eq!(unread.data()["count"], 0);
}

#[tokio::test]
async fn test_chat_is_private_to_the_parties() {
    let app = helpers::TestApp::new();
    let req = accepted_request(&app).await;

    let stranger = app.provider_token(Uuid::new_v4());
    let response = app
        .request(
            "GET",
            &format!("/api/requests/{}/messages", req.id),
            None,
            Some(&stranger),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_empty_message_rejected() {
    let app = helpers::TestApp::new();
    let req = accepted_request(&app).await;

    let response = app
        .request(
            "POST",
            &format!("/api/requests/{}/messages", req.id),
            Some(serde_json::json!({ "content": "   " })),
            Some(&req.customer),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_provider_reports_location_and_customer_polls_it() {
    let app = helpers::TestApp::new();
    let req = accepted_request(&app).await;

    let reported = app
        .request(
            "PUT",
            &format!("/api/requests/{}/location", req.id),
            Some(serde_json::json!({ "latitude": 12.98, "longitude": 77.60 })),
            Some(&req.provider),
        )
        .await;
    assert_eq!(reported.status, StatusCode::OK);

    let polled = app
        .request(
            "GET",
            &format!("/api/requests/{}/location", req.id),
            None,
            Some(&req.customer),
        )
        .await;
    assert_eq!(polled.status, StatusCode::OK);
    assert_eq!(polled.data()["latitude"], 12.98);
}

#[tokio::test]
async fn test_only_the_assigned_provider_reports_location() {
    let app = helpers::TestApp::new();
    let req = accepted_request(&app).await;

    let impostor = app.provider_token(Uuid::new_v4());
    let response = app
        .request(
            "PUT",
            &format!("/api/requests/{}/location", req.id),
            Some(serde_json::json!({ "latitude": 12.98, "longitude": 77.60 })),
            Some(&impostor),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_no_location_before_any_report() {
    let app = helpers::TestApp::new();
    let req = accepted_request(&app).await;

    let response = app
        .request(
            "GET",
            &format!("/api/requests/{}/location", req.id),
            None,
            Some(&req.customer),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
