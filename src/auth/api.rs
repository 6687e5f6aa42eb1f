//! Authentication API Endpoints
//! Mission: Provide login, refresh, and logout endpoints

use crate::auth::models::{AuthTokenResponse, Claims, LoginRequest, UserClaims};
use crate::server::AppState;
use crate::users::store;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use tracing::{info, warn};

/// Login endpoint - POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthTokenResponse>, AuthApiError> {
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return Err(AuthApiError::MissingCredentials);
    };

    info!("🔐 Login attempt: {}", username);

    let user = state
        .user_store
        .get_user_by_username(&username)
        .map_err(|e| {
            warn!("Login lookup failed: {e}");
            AuthApiError::InternalError
        })?
        .ok_or(AuthApiError::InvalidCredentials)?;

    let valid = store::verify_password(&password, &user.password_hash)
        .map_err(|_| AuthApiError::InternalError)?;

    if !valid {
        warn!("❌ Failed login attempt: {}", username);
        return Err(AuthApiError::InvalidCredentials);
    }

    let auth_token = state
        .jwt_handler
        .generate_token(&UserClaims::from_user(&user))
        .map_err(|_| AuthApiError::InternalError)?;

    info!("✅ Login successful: {}", user.username);

    Ok(Json(AuthTokenResponse { auth_token }))
}

/// Refresh endpoint - POST /api/auth/refresh
///
/// Runs behind the auth middleware: a verified token is exchanged for a new
/// one carrying the same identity claims and a fresh expiry window. No
/// password re-presentation is required.
pub async fn refresh(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<AuthTokenResponse>, AuthApiError> {
    let auth_token = state
        .jwt_handler
        .generate_token(&claims.user)
        .map_err(|_| AuthApiError::InternalError)?;

    Ok(Json(AuthTokenResponse { auth_token }))
}

/// Logout endpoint - GET /api/auth/logout
///
/// Stateless acknowledgement: tokens remain valid until expiry since no
/// server-side revocation exists. Clients discard their copy.
pub async fn logout() -> Json<serde_json::Value> {
    Json(json!({ "message": "Logged out" }))
}

/// Auth API errors.
#[derive(Debug)]
pub enum AuthApiError {
    MissingCredentials,
    InvalidCredentials,
    InternalError,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::MissingCredentials => (StatusCode::BAD_REQUEST, "Missing credentials"),
            AuthApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid username or password")
            }
            AuthApiError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, message).into_response()
    }
}
