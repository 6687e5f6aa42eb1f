//! Shared harness for integration tests: an in-process router backed by a
//! throwaway SQLite database.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use stitchtrack_backend::auth::JwtHandler;
use stitchtrack_backend::patterns::PatternStore;
use stitchtrack_backend::projects::ProjectStore;
use stitchtrack_backend::users::UserStore;
use stitchtrack_backend::{build_router, AppState};
use tempfile::NamedTempFile;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret-key-12345";

pub struct TestApp {
    pub router: Router,
    pub jwt_handler: Arc<JwtHandler>,
    _db: NamedTempFile,
}

pub fn spawn_app() -> TestApp {
    let db = NamedTempFile::new().unwrap();
    let path = db.path().to_str().unwrap();

    let jwt_handler = Arc::new(JwtHandler::new(TEST_JWT_SECRET.to_string()));
    let state = AppState {
        user_store: Arc::new(UserStore::new(path).unwrap()),
        pattern_store: Arc::new(PatternStore::new(path).unwrap()),
        project_store: Arc::new(ProjectStore::new(path).unwrap()),
        jwt_handler: jwt_handler.clone(),
    };

    TestApp {
        router: build_router(state),
        jwt_handler,
        _db: db,
    }
}

/// Fire one request at the router and decode the response body as JSON
/// (plain-text bodies come back as a JSON string).
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, value)
}

pub fn register_body(username: &str) -> Value {
    json!({
        "firstName": "Dennis",
        "lastName": "Reynolds",
        "username": username,
        "password": "Password123!",
        "email": "dennis@paddyspub.com"
    })
}

/// Register a user and return the created projection.
pub async fn register(app: &TestApp, username: &str) -> Value {
    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/users",
        None,
        Some(register_body(username)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    body
}

/// Log in and return the auth token.
pub async fn login(app: &TestApp, username: &str, password: &str) -> String {
    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["authToken"].as_str().unwrap().to_string()
}

/// Register + login in one step; returns (token, user id).
pub async fn register_and_login(app: &TestApp, username: &str) -> (String, String) {
    let user = register(app, username).await;
    let token = login(app, username, "Password123!").await;
    (token, user["id"].as_str().unwrap().to_string())
}
