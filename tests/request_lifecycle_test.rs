//! Integration tests for the service request lifecycle.

mod helpers;

use axum::http::StatusCode;
use uuid::Uuid;

fn request_body() -> serde_json::Value {
    serde_json::json!({
        "service_type": "Plumber",
        "latitude": 12.97,
        "longitude": 77.59,
        "address": "12 MG Road",
        "description": "Leaking kitchen tap",
    })
}

#[tokio::test]
async fn test_create_request() {
    let app = helpers::TestApp::new();
    let token = app.customer_token(Uuid::new_v4());

    let response = app
        .request("POST", "/api/requests", Some(request_body()), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["status"], "pending");
    assert_eq!(response.data()["service_type"], "Plumber");
    assert!(response.data()["provider_id"].is_null());
}

#[tokio::test]
async fn test_create_request_unauthenticated() {
    let app = helpers::TestApp::new();

    let response = app
        .request("POST", "/api/requests", Some(request_body()), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_request_rejects_bad_coordinates() {
    let app = helpers::TestApp::new();
    let token = app.customer_token(Uuid::new_v4());

    let mut body = request_body();
    body["latitude"] = serde_json::json!(91.0);
    let response = app
        .request("POST", "/api/requests", Some(body), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_notifies_registered_providers() {
    let app = helpers::TestApp::new();
    let provider_id = Uuid::new_v4();
    app.register_provider(provider_id).await;

    let customer = app.customer_token(Uuid::new_v4());
    let created = app
        .request("POST", "/api/requests", Some(request_body()), Some(&customer))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let provider = app.provider_token(provider_id);
    let unread = app
        .request("GET", "/api/notifications/unread-count", None, Some(&provider))
        .await;
    assert_eq!(unread.status, StatusCode::OK);
    assert_eq!(unread.data()["count"], 1);
}

#[tokio::test]
async fn test_accept_has_one_winner() {
    let app = helpers::TestApp::new();
    let customer = app.customer_token(Uuid::new_v4());
    let created = app
        .request("POST", "/api/requests", Some(request_body()), Some(&customer))
        .await;
    let id = created.data()["id"].as_str().unwrap().to_string();

    let winner = app.provider_token(Uuid::new_v4());
    let accepted = app
        .request("POST", &format!("/api/requests/{id}/accept"), None, Some(&winner))
        .await;
    assert_eq!(accepted.status, StatusCode::OK);
    assert_eq!(accepted.data()["status"], "accepted");

    let loser = app.provider_token(Uuid::new_v4());
    let conflict = app
        .request("POST", &format!("/api/requests/{id}/accept"), None, Some(&loser))
        .await;
    assert_eq!(conflict.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_accept_requires_provider_role() {
    let app = helpers::TestApp::new();
    let customer = app.customer_token(Uuid::new_v4());
    let created = app
        .request("POST", "/api/requests", Some(request_body()), Some(&customer))
        .await;
    let id = created.data()["id"].as_str().unwrap().to_string();

    let plain_user = app.customer_token(Uuid::new_v4());
    let response = app
        .request("POST", &format!("/api/requests/{id}/accept"), None, Some(&plain_user))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_request_hidden_from_strangers() {
    let app = helpers::TestApp::new();
    let customer = app.customer_token(Uuid::new_v4());
    let created = app
        .request("POST", "/api/requests", Some(request_body()), Some(&customer))
        .await;
    let id = created.data()["id"].as_str().unwrap().to_string();

    // the winning provider locks everyone else out
    let winner = app.provider_token(Uuid::new_v4());
    app.request("POST", &format!("/api/requests/{id}/accept"), None, Some(&winner))
        .await;

    let other_provider = app.provider_token(Uuid::new_v4());
    let response = app
        .request("GET", &format!("/api/requests/{id}"), None, Some(&other_provider))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let own = app
        .request("GET", &format!("/api/requests/{id}"), None, Some(&customer))
        .await;
    assert_eq!(own.status, StatusCode::OK);
}

#[tokio::test]
async fn test_get_request_not_found() {
    let app = helpers::TestApp::new();
    let token = app.customer_token(Uuid::new_v4());

    let response = app
        .request(
            "GET",
            &format!("/api/requests/{}", Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_open_requests_is_provider_only() {
    let app = helpers::TestApp::new();
    let customer = app.customer_token(Uuid::new_v4());
    app.request("POST", "/api/requests", Some(request_body()), Some(&customer))
        .await;

    let forbidden = app
        .request("GET", "/api/requests/open", None, Some(&customer))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let provider = app.provider_token(Uuid::new_v4());
    let open = app
        .request("GET", "/api/requests/open", None, Some(&provider))
        .await;
    assert_eq!(open.status, StatusCode::OK);
    assert_eq!(open.data()["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_payment_completes_the_request() {
    let app = helpers::TestApp::new();
    let customer_id = Uuid::new_v4();
    let customer = app.customer_token(customer_id);
    let created = app
        .request("POST", "/api/requests", Some(request_body()), Some(&customer))
        .await;
    let id = created.data()["id"].as_str().unwrap().to_string();

    let provider = app.provider_token(Uuid::new_v4());
    app.request("POST", &format!("/api/requests/{id}/accept"), None, Some(&provider))
        .await;

    let pay_body = serde_json::json!({ "amount": 450.0, "method": "upi" });
    let paid = app
        .request(
            "POST",
            &format!("/api/requests/{id}/pay"),
            Some(pay_body.clone()),
            Some(&customer),
        )
        .await;
    assert_eq!(paid.status, StatusCode::CREATED);
    assert_eq!(paid.data()["status"], "completed");
    assert!(
        paid.data()["transaction_id"]
            .as_str()
            .unwrap()
            .starts_with("TXN")
    );

    let request = app
        .request("GET", &format!("/api/requests/{id}"), None, Some(&customer))
        .await;
    assert_eq!(request.data()["status"], "completed");

    // settling twice is a conflict
    let again = app
        .request(
            "POST",
            &format!("/api/requests/{id}/pay"),
            Some(pay_body),
            Some(&customer),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_only_the_customer_can_pay() {
    let app = helpers::TestApp::new();
    let customer = app.customer_token(Uuid::new_v4());
    let created = app
        .request("POST", "/api/requests", Some(request_body()), Some(&customer))
        .await;
    let id = created.data()["id"].as_str().unwrap().to_string();

    let provider = app.provider_token(Uuid::new_v4());
    app.request("POST", &format!("/api/requests/{id}/accept"), None, Some(&provider))
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/requests/{id}/pay"),
            Some(serde_json::json!({ "amount": 100.0, "method": "card" })),
            Some(&provider),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_rating_requires_completion() {
    let app = helpers::TestApp::new();
    let customer = app.customer_token(Uuid::new_v4());
    let created = app
        .request("POST", "/api/requests", Some(request_body()), Some(&customer))
        .await;
    let id = created.data()["id"].as_str().unwrap().to_string();

    let provider_id = Uuid::new_v4();
    let provider = app.provider_token(provider_id);
    app.request("POST", &format!("/api/requests/{id}/accept"), None, Some(&provider))
        .await;

    let rate_body = serde_json::json!({ "stars": 5, "review": "Quick and tidy" });
    let too_early = app
        .request(
            "POST",
            &format!("/api/requests/{id}/rating"),
            Some(rate_body.clone()),
            Some(&customer),
        )
        .await;
    assert_eq!(too_early.status, StatusCode::CONFLICT);

    app.request(
        "POST",
        &format!("/api/requests/{id}/pay"),
        Some(serde_json::json!({ "amount": 200.0, "method": "card" })),
        Some(&customer),
    )
    .await;

    let rated = app
        .request(
            "POST",
            &format!("/api/requests/{id}/rating"),
            Some(rate_body),
            Some(&customer),
        )
        .await;
    assert_eq!(rated.status, StatusCode::CREATED);
    assert_eq!(rated.data()["stars"], 5);

    let summary = app
        .request(
            "GET",
            &format!("/api/providers/{provider_id}/rating-summary"),
            None,
            Some(&customer),
        )
        .await;
    assert_eq!(summary.status, StatusCode::OK);
    assert_eq!(summary.data()["count"], 1);
    assert_eq!(summary.data()["average"], 5.0);
}
