//! Integration tests for the auth endpoints: login, refresh, logout.

mod common;

use axum::http::{Method, StatusCode};
use common::{login, register, register_and_login, send, spawn_app};
use serde_json::json;

#[tokio::test]
async fn login_rejects_missing_credentials() {
    let app = spawn_app();

    let (status, _) = send(&app.router, Method::POST, "/api/auth/login", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "dennis" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_rejects_unknown_username() {
    let app = spawn_app();
    register(&app, "dennis").await;

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "fakeusername", "password": "Password123!" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_incorrect_password() {
    let app = spawn_app();
    register(&app, "dennis").await;

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "dennis", "password": "12341345" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_returns_a_valid_token() {
    let app = spawn_app();
    let created = register(&app, "dennis").await;

    let token = login(&app, "dennis", "Password123!").await;

    // Decode with the same secret the server signs with.
    let claims = app.jwt_handler.validate_token(&token).unwrap();
    assert_eq!(claims.sub, "dennis");
    assert_eq!(claims.user.username, "dennis");
    assert_eq!(claims.user.first_name, "Dennis");
    assert_eq!(claims.user.last_name, "Reynolds");
    assert_eq!(claims.user.email, "dennis@paddyspub.com");
    assert_eq!(claims.user.id, created["id"].as_str().unwrap());
}

#[tokio::test]
async fn refresh_returns_a_new_token_with_identical_claims() {
    let app = spawn_app();
    let (token, _) = register_and_login(&app, "dennis").await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/auth/refresh",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let new_token = body["authToken"].as_str().unwrap();
    let old_claims = app.jwt_handler.validate_token(&token).unwrap();
    let new_claims = app.jwt_handler.validate_token(new_token).unwrap();

    assert_eq!(new_claims.user, old_claims.user);
    assert_eq!(new_claims.sub, old_claims.sub);
    assert!(new_claims.exp >= old_claims.exp);
}

#[tokio::test]
async fn refresh_rejects_missing_or_garbage_token() {
    let app = spawn_app();

    let (status, _) = send(&app.router, Method::POST, "/api/auth/refresh", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/refresh",
        Some("not.a.token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_acknowledges() {
    let app = spawn_app();

    let (status, _) = send(&app.router, Method::GET, "/api/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn health_check_is_public() {
    let app = spawn_app();

    let (status, body) = send(&app.router, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
