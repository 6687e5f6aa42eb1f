//! Pattern API Endpoints
//! Mission: Thin CRUD routes over the pattern store

use crate::auth::models::Claims;
use crate::patterns::models::{CreatePatternRequest, Pattern, UpdatePatternRequest};
use crate::server::AppState;
use crate::validate::ValidationError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

/// List endpoint - GET /api/patterns
pub async fn list_patterns(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Pattern>>, ResourceApiError> {
    let user = caller_id(&claims)?;
    let patterns = state.pattern_store.list(&user).map_err(|e| {
        warn!("Pattern listing failed: {e}");
        ResourceApiError::Internal
    })?;

    Ok(Json(patterns))
}

/// Fetch endpoint - GET /api/patterns/:id
pub async fn get_pattern(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Pattern>, ResourceApiError> {
    let user = caller_id(&claims)?;
    let id = parse_resource_id(&id)?;

    let pattern = state
        .pattern_store
        .get(&user, &id)
        .map_err(|e| {
            warn!("Pattern lookup failed: {e}");
            ResourceApiError::Internal
        })?
        .ok_or(ResourceApiError::NotFound)?;

    Ok(Json(pattern))
}

/// Create endpoint - POST /api/patterns
pub async fn create_pattern(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreatePatternRequest>,
) -> Result<(StatusCode, Json<Pattern>), ResourceApiError> {
    let user = caller_id(&claims)?;

    let Some(name) = payload.name else {
        return Err(ValidationError::missing_field("name").into());
    };

    let pattern = Pattern {
        id: Uuid::new_v4(),
        user,
        name,
        ease: payload.ease,
        gauge_row: payload.gauge_row,
        gauge_stitches: payload.gauge_stitches,
        style: payload.style,
        chest: payload.chest,
        waist: payload.waist,
        hips: payload.hips,
        upper_arm: payload.upper_arm,
        armhole: payload.armhole,
        length: payload.length,
    };

    state.pattern_store.create(&pattern).map_err(|e| {
        warn!("Pattern creation failed: {e}");
        ResourceApiError::Internal
    })?;

    Ok((StatusCode::CREATED, Json(pattern)))
}

/// Update endpoint - PUT /api/patterns/:id
pub async fn update_pattern(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdatePatternRequest>,
) -> Result<Json<Pattern>, ResourceApiError> {
    let user = caller_id(&claims)?;
    let id = parse_resource_id(&id)?;

    let pattern = state
        .pattern_store
        .update(&user, &id, payload)
        .map_err(|e| {
            warn!("Pattern update failed: {e}");
            ResourceApiError::Internal
        })?
        .ok_or(ResourceApiError::NotFound)?;

    Ok(Json(pattern))
}

/// Delete endpoint - DELETE /api/patterns/:id
pub async fn delete_pattern(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<serde_json::Value>, ResourceApiError> {
    let user = caller_id(&claims)?;
    let id = parse_resource_id(&id)?;

    let deleted = state.pattern_store.delete(&user, &id).map_err(|e| {
        warn!("Pattern deletion failed: {e}");
        ResourceApiError::Internal
    })?;
    if !deleted {
        return Err(ResourceApiError::NotFound);
    }

    Ok(Json(json!({ "message": "success" })))
}

/// The caller's id out of verified claims.
pub(crate) fn caller_id(claims: &Claims) -> Result<Uuid, ResourceApiError> {
    Uuid::parse_str(&claims.user.id).map_err(|e| {
        warn!("Malformed user id in verified claims: {e}");
        ResourceApiError::Internal
    })
}

pub(crate) fn parse_resource_id(id: &str) -> Result<Uuid, ResourceApiError> {
    Uuid::parse_str(id).map_err(|_| ResourceApiError::NotFound)
}

/// Resource API errors, shared by the pattern and project routers.
#[derive(Debug)]
pub enum ResourceApiError {
    Validation(ValidationError),
    NotFound,
    Internal,
}

impl From<ValidationError> for ResourceApiError {
    fn from(err: ValidationError) -> Self {
        ResourceApiError::Validation(err)
    }
}

impl IntoResponse for ResourceApiError {
    fn into_response(self) -> Response {
        match self {
            ResourceApiError::Validation(err) => err.into_response(),
            ResourceApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ResourceApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Internal server error" })),
            )
                .into_response(),
        }
    }
}
