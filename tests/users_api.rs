//! Integration tests for registration and account management.

mod common;

use axum::http::{Method, StatusCode};
use common::{login, register, register_and_login, register_body, send, spawn_app};
use serde_json::json;

#[tokio::test]
async fn registration_rejects_missing_field() {
    let app = spawn_app();

    let mut body = register_body("birdman");
    body.as_object_mut().unwrap().remove("email");

    let (status, body) = send(&app.router, Method::POST, "/api/users", None, Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["reason"], "ValidationError");
    assert_eq!(body["message"], "Missing field");
    assert_eq!(body["location"], "email");
}

#[tokio::test]
async fn registration_rejects_numeric_name() {
    let app = spawn_app();

    let mut body = register_body("birdman");
    body["firstName"] = json!("Jane1");

    let (status, body) = send(&app.router, Method::POST, "/api/users", None, Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["reason"], "ValidationError");
    assert_eq!(body["location"], "firstName");
}

#[tokio::test]
async fn registration_rejects_untrimmed_username() {
    let app = spawn_app();

    let mut body = register_body(" birdman");
    body["username"] = json!(" birdman");

    let (status, body) = send(&app.router, Method::POST, "/api/users", None, Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Cannot start or end with a space");
    assert_eq!(body["location"], "username");
}

#[tokio::test]
async fn registration_rejects_invalid_email() {
    let app = spawn_app();

    let mut body = register_body("birdman");
    body["email"] = json!("notAnEmail.com");

    let (status, body) = send(&app.router, Method::POST, "/api/users", None, Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["location"], "email");
}

#[tokio::test]
async fn registration_rejects_weak_password_with_rule_names() {
    let app = spawn_app();

    let mut body = register_body("birdman");
    body["password"] = json!("passw1");

    let (status, body) = send(&app.router, Method::POST, "/api/users", None, Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["location"], "password");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("min"));
    assert!(message.contains("uppercase"));
}

#[tokio::test]
async fn registration_returns_exact_projection() {
    let app = spawn_app();

    let created = register(&app, "birdman").await;

    let obj = created.as_object().unwrap();
    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    let mut expected = vec![
        "id", "firstName", "lastName", "username", "email", "chest", "waist", "hips",
        "upperArm", "armhole", "length", "wrist",
    ];
    expected.sort_unstable();
    assert_eq!(keys, expected);
    assert_eq!(created["username"], "birdman");
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let app = spawn_app();

    register(&app, "birdman").await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/users",
        None,
        Some(register_body("birdman")),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["reason"], "ValidationError");
    assert_eq!(body["message"], "Username already taken");
    assert_eq!(body["location"], "username");
}

#[tokio::test]
async fn user_list_returns_projections() {
    let app = spawn_app();
    register(&app, "birdman").await;

    let (status, body) = send(&app.router, Method::GET, "/api/users", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert!(users[0].get("passwordHash").is_none());
    assert_eq!(users[0]["username"], "birdman");
}

#[tokio::test]
async fn update_changes_only_submitted_fields() {
    let app = spawn_app();
    let (token, id) = register_and_login(&app, "birdman").await;

    let (status, body) = send(
        &app.router,
        Method::PUT,
        &format!("/api/users/{id}"),
        Some(&token),
        Some(json!({ "email": "charlie@paddyspub.com", "chest": 40.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "charlie@paddyspub.com");
    assert_eq!(body["chest"], 40.5);
    assert_eq!(body["firstName"], "Dennis");
    assert_eq!(body["username"], "birdman");
}

#[tokio::test]
async fn update_rejects_invalid_email() {
    let app = spawn_app();
    let (token, id) = register_and_login(&app, "birdman").await;

    let (status, body) = send(
        &app.router,
        Method::PUT,
        &format!("/api/users/{id}"),
        Some(&token),
        Some(json!({ "email": "notAnEmail.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["reason"], "ValidationError");
    assert_eq!(body["location"], "email");
}

#[tokio::test]
async fn update_requires_authentication() {
    let app = spawn_app();
    let (_, id) = register_and_login(&app, "birdman").await;

    let (status, _) = send(
        &app.router,
        Method::PUT,
        &format!("/api/users/{id}"),
        None,
        Some(json!({ "email": "charlie@paddyspub.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_is_self_service_only() {
    let app = spawn_app();
    let (token, _) = register_and_login(&app, "birdman").await;
    let other = register(&app, "daywalker").await;
    let other_id = other["id"].as_str().unwrap();

    let (status, body) = send(
        &app.router,
        Method::PUT,
        &format!("/api/users/{other_id}"),
        Some(&token),
        Some(json!({ "email": "charlie@paddyspub.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["reason"], "ValidationError");
    assert_eq!(body["location"], "id");
}

#[tokio::test]
async fn password_change_requires_current_password() {
    let app = spawn_app();
    let (token, id) = register_and_login(&app, "birdman").await;

    // Missing currentPassword: validation failure.
    let (status, body) = send(
        &app.router,
        Method::PUT,
        &format!("/api/users/{id}"),
        Some(&token),
        Some(json!({ "password": "NewPassword456!" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["location"], "currentPassword");

    // Wrong currentPassword: authentication failure, hash untouched.
    let (status, _) = send(
        &app.router,
        Method::PUT,
        &format!("/api/users/{id}"),
        Some(&token),
        Some(json!({ "password": "NewPassword456!", "currentPassword": "wrongwrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    login(&app, "birdman", "Password123!").await;

    // Correct currentPassword: the new password takes effect.
    let (status, _) = send(
        &app.router,
        Method::PUT,
        &format!("/api/users/{id}"),
        Some(&token),
        Some(json!({ "password": "NewPassword456!", "currentPassword": "Password123!" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    login(&app, "birdman", "NewPassword456!").await;

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "birdman", "password": "Password123!" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn delete_is_self_service_only() {
    let app = spawn_app();
    let (token, _) = register_and_login(&app, "birdman").await;
    let other = register(&app, "daywalker").await;
    let other_id = other["id"].as_str().unwrap();

    let (status, body) = send(
        &app.router,
        Method::DELETE,
        &format!("/api/users/{other_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["reason"], "ValidationError");

    // The other account is untouched.
    login(&app, "daywalker", "Password123!").await;
}

#[tokio::test]
async fn delete_removes_the_account() {
    let app = spawn_app();
    let (token, id) = register_and_login(&app, "birdman").await;

    let (status, body) = send(
        &app.router,
        Method::DELETE,
        &format!("/api/users/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "success");

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "birdman", "password": "Password123!" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
