//! Shared test helpers for integration tests.
//!
//! Tests run against the full router with in-memory repositories, so
//! no database is required.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use taskin_api::auth::Claims;
use taskin_api::{AppState, Repositories};
use taskin_core::config::AppConfig;
use taskin_core::config::auth::AuthConfig;
use taskin_core::config::database::DatabaseConfig;
use taskin_database::repositories::role::RoleRepository as _;
use taskin_entity::user::AppRole;

const TEST_SECRET: &str = "integration-test-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The wired application state, for service-level assertions
    pub state: AppState,
    /// Shared storage backends, for direct seeding and assertions
    pub repos: Repositories,
}

impl TestApp {
    /// Create a new test application over in-memory storage.
    pub fn new() -> Self {
        let config = AppConfig {
            server: Default::default(),
            database: DatabaseConfig {
                url: "postgres://unused".to_string(),
                max_connections: 1,
                min_connections: 1,
                connect_timeout_seconds: 1,
                idle_timeout_seconds: 1,
            },
            auth: AuthConfig {
                jwt_secret: TEST_SECRET.to_string(),
                issuer: String::new(),
                leeway_seconds: 30,
            },
            realtime: Default::default(),
            tracking: Default::default(),
            logging: Default::default(),
        };

        let repos = Repositories::in_memory();
        let state = AppState::new(Arc::new(config), repos.clone());
        let router = taskin_api::build_router(state.clone());

        Self {
            router,
            state,
            repos,
        }
    }

    /// Mint a bearer token for the given user.
    pub fn token(&self, user_id: Uuid, roles: &[AppRole]) -> String {
        let now = Utc::now().timestamp() as u64;
        let claims = Claims {
            sub: user_id,
            roles: roles.to_vec(),
            exp: now + 3600,
            iat: now,
            iss: String::new(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .expect("Failed to encode token")
    }

    /// A token for a plain customer.
    pub fn customer_token(&self, user_id: Uuid) -> String {
        self.token(user_id, &[AppRole::User])
    }

    /// A token for a service provider.
    pub fn provider_token(&self, user_id: Uuid) -> String {
        self.token(user_id, &[AppRole::User, AppRole::ServiceProvider])
    }

    /// Register a provider so request fan-out can find them.
    pub async fn register_provider(&self, user_id: Uuid) {
        self.repos
            .roles
            .grant(user_id, AppRole::ServiceProvider)
            .await
            .expect("Failed to grant provider role");
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` payload of a success envelope.
    pub fn data(&self) -> &Value {
        self.body.get("data").expect("No data in response body")
    }
}
