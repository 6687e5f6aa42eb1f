//! Server Assembly
//! Mission: Wire stores, token handling, and middleware into one router

use crate::auth::{api as auth_api, auth_middleware, JwtHandler};
use crate::middleware::request_logging;
use crate::patterns::{api as patterns_api, PatternStore};
use crate::projects::{api as projects_api, ProjectStore};
use crate::users::{api as users_api, UserStore};
use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use std::env;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub user_store: Arc<UserStore>,
    pub pattern_store: Arc<PatternStore>,
    pub project_store: Arc<ProjectStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

/// Build the full application router.
///
/// Public routes: health, registration, user list, login, logout.
/// Everything else sits behind the bearer-token middleware.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/users",
            post(users_api::register_user).get(users_api::list_users),
        )
        .route("/api/auth/login", post(auth_api::login))
        .route("/api/auth/logout", get(auth_api::logout))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/api/auth/refresh", post(auth_api::refresh))
        .route(
            "/api/users/:id",
            put(users_api::update_user).delete(users_api::delete_user),
        )
        .route(
            "/api/patterns",
            get(patterns_api::list_patterns).post(patterns_api::create_pattern),
        )
        .route(
            "/api/patterns/:id",
            get(patterns_api::get_pattern)
                .put(patterns_api::update_pattern)
                .delete(patterns_api::delete_pattern),
        )
        .route(
            "/api/projects",
            get(projects_api::list_projects).post(projects_api::create_project),
        )
        .route(
            "/api/projects/:id",
            get(projects_api::get_project)
                .put(projects_api::update_project)
                .delete(projects_api::delete_project),
        )
        .route_layer(middleware::from_fn_with_state(
            state.jwt_handler.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(request_logging))
}

/// CORS layer from `CLIENT_ORIGIN`; permissive when unset or unparseable.
pub fn cors_layer() -> CorsLayer {
    match env::var("CLIENT_ORIGIN") {
        Ok(origin) if !origin.trim().is_empty() => match origin.parse::<HeaderValue>() {
            Ok(origin) => CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(e) => {
                warn!("Invalid CLIENT_ORIGIN ({e}), falling back to permissive CORS");
                CorsLayer::permissive()
            }
        },
        _ => CorsLayer::permissive(),
    }
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
