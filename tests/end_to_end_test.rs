//! Full lifecycle walk-through: post, race, track, settle, rate.

mod helpers;

use axum::http::StatusCode;
use uuid::Uuid;

use taskin_entity::user::AppRole;
use taskin_service::context::RequestContext;

#[tokio::test]
async fn test_full_request_lifecycle() {
    let app = helpers::TestApp::new();

    let customer_id = Uuid::new_v4();
    let customer = app.customer_token(customer_id);
    let winner_id = Uuid::new_v4();
    let winner = app.provider_token(winner_id);
    let loser = app.provider_token(Uuid::new_v4());

    // customer posts a plumbing request
    let created = app
        .request(
            "POST",
            "/api/requests",
            Some(serde_json::json!({
                "service_type": "Plumber",
                "latitude": 28.61,
                "longitude": 77.20,
                "address": "4 Janpath Lane",
            })),
            Some(&customer),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.data()["id"].as_str().unwrap().to_string();

    // two providers race; exactly one wins
    let accept_path = format!("/api/requests/{id}/accept");
    let (first, second) = tokio::join!(
        app.request("POST", &accept_path, None, Some(&winner)),
        app.request("POST", &accept_path, None, Some(&loser)),
    );
    let statuses = [first.status, second.status];
    assert!(statuses.contains(&StatusCode::OK));
    assert!(statuses.contains(&StatusCode::CONFLICT));

    // the customer watches the live position feed
    let request_id: Uuid = id.parse().unwrap();
    let customer_ctx = RequestContext::new(customer_id, vec![AppRole::User]);
    let mut feed = app
        .state
        .tracking
        .subscribe(&customer_ctx, request_id)
        .await
        .unwrap();

    // the accept race may have been decided either way
    let winner_token = if first.status == StatusCode::OK {
        &winner
    } else {
        &loser
    };
    let reported = app
        .request(
            "PUT",
            &format!("/api/requests/{id}/location"),
            Some(serde_json::json!({ "latitude": 28.62, "longitude": 77.21 })),
            Some(winner_token),
        )
        .await;
    assert_eq!(reported.status, StatusCode::OK);

    let event = feed.next().await.expect("location change event");
    assert_eq!(event.table, "provider_locations");
    assert_eq!(event.row["request_id"], id);
    assert_eq!(event.row["latitude"], 28.62);

    // payment settles and completes the request
    let paid = app
        .request(
            "POST",
            &format!("/api/requests/{id}/pay"),
            Some(serde_json::json!({ "amount": 500.0, "method": "upi" })),
            Some(&customer),
        )
        .await;
    assert_eq!(paid.status, StatusCode::CREATED);
    assert_eq!(paid.data()["amount"], 500.0);

    let request = app
        .request("GET", &format!("/api/requests/{id}"), None, Some(&customer))
        .await;
    assert_eq!(request.data()["status"], "completed");

    // accepted + payment-successful for the customer, payment-received for
    // the provider
    let customer_unread = app
        .request("GET", "/api/notifications/unread-count", None, Some(&customer))
        .await;
    assert_eq!(customer_unread.data()["count"], 2);
    let provider_unread = app
        .request("GET", "/api/notifications/unread-count", None, Some(winner_token))
        .await;
    assert_eq!(provider_unread.data()["count"], 1);

    // tracking is over once the request completes
    let late_report = app
        .request(
            "PUT",
            &format!("/api/requests/{id}/location"),
            Some(serde_json::json!({ "latitude": 28.63, "longitude": 77.22 })),
            Some(winner_token),
        )
        .await;
    assert_eq!(late_report.status, StatusCode::CONFLICT);

    // and the customer can rate the provider
    let rated = app
        .request(
            "POST",
            &format!("/api/requests/{id}/rating"),
            Some(serde_json::json!({ "stars": 4, "review": "Fixed it fast" })),
            Some(&customer),
        )
        .await;
    assert_eq!(rated.status, StatusCode::CREATED);
}
