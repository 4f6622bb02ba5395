//! Integration tests for reminder tasks, notifications, and profiles.

mod helpers;

use axum::http::StatusCode;
use uuid::Uuid;

fn task_body(title: &str, date: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "date": date,
        "time": "09:30:00",
        "priority": "high",
        "repeat": "weekly",
    })
}

#[tokio::test]
async fn test_task_crud() {
    let app = helpers::TestApp::new();
    let token = app.customer_token(Uuid::new_v4());

    let created = app
        .request(
            "POST",
            "/api/tasks",
            Some(task_body("Pay electricity bill", "2026-09-01")),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.data()["priority"], "high");
    let id = created.data()["id"].as_str().unwrap().to_string();

    let updated = app
        .request(
            "PUT",
            &format!("/api/tasks/{id}"),
            Some(serde_json::json!({ "title": "Pay electricity and water bills" })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["title"], "Pay electricity and water bills");

    let completed = app
        .request("PUT", &format!("/api/tasks/{id}/complete"), None, Some(&token))
        .await;
    assert_eq!(completed.status, StatusCode::OK);

    let deleted = app
        .request("DELETE", &format!("/api/tasks/{id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let listed = app.request("GET", "/api/tasks", None, Some(&token)).await;
    assert!(listed.data().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_tasks_filtered_by_date() {
    let app = helpers::TestApp::new();
    let token = app.customer_token(Uuid::new_v4());

    app.request(
        "POST",
        "/api/tasks",
        Some(task_body("Dentist", "2026-09-01")),
        Some(&token),
    )
    .await;
    app.request(
        "POST",
        "/api/tasks",
        Some(task_body("Car service", "2026-09-02")),
        Some(&token),
    )
    .await;

    let due = app
        .request("GET", "/api/tasks?date=2026-09-01", None, Some(&token))
        .await;
    assert_eq!(due.status, StatusCode::OK);
    let items = due.data().as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Dentist");
}

#[tokio::test]
async fn test_tasks_are_owner_scoped() {
    let app = helpers::TestApp::new();
    let owner = app.customer_token(Uuid::new_v4());
    let other = app.customer_token(Uuid::new_v4());

    let created = app
        .request(
            "POST",
            "/api/tasks",
            Some(task_body("Private errand", "2026-09-01")),
            Some(&owner),
        )
        .await;
    let id = created.data()["id"].as_str().unwrap().to_string();

    let response = app
        .request("DELETE", &format!("/api/tasks/{id}"), None, Some(&other))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_repeat_rejected() {
    let app = helpers::TestApp::new();
    let token = app.customer_token(Uuid::new_v4());

    let mut body = task_body("Water plants", "2026-09-01");
    body["repeat"] = serde_json::json!("hourly");
    let response = app.request("POST", "/api/tasks", Some(body), Some(&token)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_notification_read_and_mute_flow() {
    let app = helpers::TestApp::new();
    let provider_id = Uuid::new_v4();
    app.register_provider(provider_id).await;
    let provider = app.provider_token(provider_id);

    // two postings, two notifications
    let customer = app.customer_token(Uuid::new_v4());
    for _ in 0..2 {
        app.request(
            "POST",
            "/api/requests",
            Some(serde_json::json!({
                "service_type": "Gardener",
                "latitude": 12.97,
                "longitude": 77.59,
            })),
            Some(&customer),
        )
        .await;
    }

    let listed = app
        .request("GET", "/api/notifications", None, Some(&provider))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    let items = listed.data()["items"].as_array().unwrap().clone();
    assert_eq!(items.len(), 2);
    let first_id = items[0]["id"].as_str().unwrap().to_string();

    app.request(
        "PUT",
        &format!("/api/notifications/{first_id}/read"),
        None,
        Some(&provider),
    )
    .await;
    let unread = app
        .request("GET", "/api/notifications/unread-count", None, Some(&provider))
        .await;
    assert_eq!(unread.data()["count"], 1);

    // muting hides the rest from the unread count
    let second_id = items[1]["id"].as_str().unwrap().to_string();
    app.request(
        "PUT",
        &format!("/api/notifications/{second_id}/mute"),
        Some(serde_json::json!({ "muted": true })),
        Some(&provider),
    )
    .await;
    let unread = app
        .request("GET", "/api/notifications/unread-count", None, Some(&provider))
        .await;
    assert_eq!(unread.data()["count"], 0);
}

#[tokio::test]
async fn test_notifications_are_owner_scoped() {
    let app = helpers::TestApp::new();
    let provider_id = Uuid::new_v4();
    app.register_provider(provider_id).await;
    let provider = app.provider_token(provider_id);

    let customer = app.customer_token(Uuid::new_v4());
    app.request(
        "POST",
        "/api/requests",
        Some(serde_json::json!({
            "service_type": "Gardener",
            "latitude": 12.97,
            "longitude": 77.59,
        })),
        Some(&customer),
    )
    .await;

    let listed = app
        .request("GET", "/api/notifications", None, Some(&provider))
        .await;
    let id = listed.data()["items"][0]["id"].as_str().unwrap().to_string();

    let stranger = app.customer_token(Uuid::new_v4());
    let response = app
        .request("DELETE", &format!("/api/notifications/{id}"), None, Some(&stranger))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_profile_lazily_created_and_updated() {
    let app = helpers::TestApp::new();
    let user_id = Uuid::new_v4();
    let token = app.customer_token(user_id);

    let fresh = app.request("GET", "/api/profile", None, Some(&token)).await;
    assert_eq!(fresh.status, StatusCode::OK);
    assert_eq!(fresh.data()["user_id"], user_id.to_string());
    assert!(fresh.data()["full_name"].is_null());

    let updated = app
        .request(
            "PUT",
            "/api/profile",
            Some(serde_json::json!({
                "full_name": "Asha Rao",
                "email": "asha@example.com",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["full_name"], "Asha Rao");

    let public = app
        .request(
            "GET",
            &format!("/api/profiles/{user_id}"),
            None,
            Some(&app.customer_token(Uuid::new_v4())),
        )
        .await;
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.data()["full_name"], "Asha Rao");
}

#[tokio::test]
async fn test_invalid_profile_email_rejected() {
    let app = helpers::TestApp::new();
    let token = app.customer_token(Uuid::new_v4());

    let response = app
        .request(
            "PUT",
            "/api/profile",
            Some(serde_json::json!({ "email": "not-an-email" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_become_provider_grants_role() {
    let app = helpers::TestApp::new();
    let user_id = Uuid::new_v4();
    let token = app.customer_token(user_id);

    let granted = app
        .request("POST", "/api/profile/become-provider", None, Some(&token))
        .await;
    assert_eq!(granted.status, StatusCode::OK);

    let roles = app.request("GET", "/api/profile/roles", None, Some(&token)).await;
    assert_eq!(roles.status, StatusCode::OK);
    assert_eq!(roles.data()[0], "service_provider");
}
