/// Common test utilities for integration tests
///
/// Builds the full router over the in-memory store adapters, so the tests
/// exercise routing, middleware, and both service cores end-to-end without a
/// database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use serde_json::json;
use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use taskdeck_shared::service::{auth::AuthService, tasks::TaskService};
use taskdeck_shared::store::memory::{InMemoryTaskStore, InMemoryUserStore};
use tower::Service as _;

const JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context holding the app under test
pub struct TestContext {
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a fresh app over empty in-memory stores
    pub fn new() -> Self {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "unused-in-tests".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: JWT_SECRET.to_string(),
                token_ttl_hours: 24,
            },
        };

        let auth = AuthService::new(
            Arc::new(InMemoryUserStore::new()),
            config.jwt.secret.clone(),
        );
        let tasks = TaskService::new(Arc::new(InMemoryTaskStore::new()));

        let state = AppState::new(auth, tasks, config);
        let app = build_router(state);

        Self { app }
    }

    /// Sends a request through the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().call(request).await.unwrap()
    }

    /// Registers a user, asserting success
    pub async fn sign_up(&self, username: &str, password: &str) {
        let response = self
            .send(json_request(
                "POST",
                "/v1/auth/signup",
                json!({ "username": username, "password": password }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    /// Signs a user in and returns the access token
    pub async fn sign_in(&self, username: &str, password: &str) -> String {
        let response = self
            .send(json_request(
                "POST",
                "/v1/auth/signin",
                json!({ "username": username, "password": password }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Registers and signs in, returning the access token
    pub async fn register(&self, username: &str, password: &str) -> String {
        self.sign_up(username, password).await;
        self.sign_in(username, password).await
    }
}

/// Builds a JSON request with no auth header
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Builds a JSON request with a bearer token
pub fn authed_json_request(
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Builds a bodyless request with a bearer token
pub fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Reads a response body as JSON
pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
