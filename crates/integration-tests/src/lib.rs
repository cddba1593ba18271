//! Shared harness for the end-to-end tests: a fully wired router over an
//! in-memory SQLite store with real argon2 hashing and JWT signing.

use std::sync::Arc;

use api_adapters::AppState;
use auth_adapters::{Argon2PasswordHasher, JwtTokenService};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::Value;
use services::{AuthService, PostService};
use storage_adapters::{SqlitePostRepository, SqliteUserRepository};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Builds the application router against a fresh in-memory database.
pub async fn test_app() -> Router {
    test_app_with_ttl(chrono::Duration::minutes(60)).await
}

pub async fn test_app_with_ttl(ttl: chrono::Duration) -> Router {
    let pool = storage_adapters::connect("sqlite::memory:", 1)
        .await
        .expect("in-memory sqlite");
    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let posts = Arc::new(SqlitePostRepository::new(pool));
    let tokens = Arc::new(JwtTokenService::new(
        &SecretString::from(TEST_SECRET.to_string()),
        ttl,
    ));

    let state = AppState::new(
        PostService::new(posts, users.clone()),
        AuthService::new(users, Arc::new(Argon2PasswordHasher::new()), tokens),
    );
    api_adapters::app(state)
}

/// A decoded response.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Sends one request through the router. `body` is sent as JSON when set.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    bearer: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request");

    let response = app.clone().oneshot(request).await.expect("infallible router");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    TestResponse { status, body }
}

/// Registers a user and returns the `user` object from the response.
pub async fn register(app: &Router, username: &str, email: &str, password: &str) -> Value {
    let response = send(
        app,
        Method::POST,
        "/auth/register",
        Some(serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.body["user"].clone()
}

/// Logs in and returns the bearer token.
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let response = send(
        app,
        Method::POST,
        "/auth/login",
        Some(serde_json::json!({ "email": email, "password": password })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    response.body["accessToken"]
        .as_str()
        .expect("token string")
        .to_string()
}

/// Registers and logs in; returns `(user, token)`.
pub async fn signed_in_user(app: &Router, username: &str, email: &str) -> (Value, String) {
    let user = register(app, username, email, "correct-horse").await;
    let token = login(app, email, "correct-horse").await;
    (user, token)
}
