//! Project API Endpoints
//! Mission: Thin CRUD routes over the project store

use crate::auth::models::Claims;
use crate::patterns::api::{caller_id, parse_resource_id, ResourceApiError};
use crate::projects::models::{CreateProjectRequest, Project, UpdateProjectRequest};
use crate::server::AppState;
use crate::validate::ValidationError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

/// List endpoint - GET /api/projects
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Project>>, ResourceApiError> {
    let user = caller_id(&claims)?;
    let projects = state.project_store.list(&user).map_err(|e| {
        warn!("Project listing failed: {e}");
        ResourceApiError::Internal
    })?;

    Ok(Json(projects))
}

/// Fetch endpoint - GET /api/projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Project>, ResourceApiError> {
    let user = caller_id(&claims)?;
    let id = parse_resource_id(&id)?;

    let project = state
        .project_store
        .get(&user, &id)
        .map_err(|e| {
            warn!("Project lookup failed: {e}");
            ResourceApiError::Internal
        })?
        .ok_or(ResourceApiError::NotFound)?;

    Ok(Json(project))
}

/// Create endpoint - POST /api/projects
///
/// The owner and `created` timestamp are assigned here, never taken from
/// the request body.
pub async fn create_project(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), ResourceApiError> {
    let user = caller_id(&claims)?;

    let Some(name) = payload.name else {
        return Err(ValidationError::missing_field("name").into());
    };

    let project = Project {
        id: Uuid::new_v4(),
        user,
        pattern: payload.pattern,
        name,
        created: Utc::now().to_rfc3339(),
        images: payload.images.unwrap_or_default(),
        size: payload.size,
        needles: payload.needles,
        notes: payload.notes,
        ease: payload.ease,
        gauge_row: payload.gauge_row,
        gauge_stitches: payload.gauge_stitches,
        chest: payload.chest,
        waist: payload.waist,
        hips: payload.hips,
        upper_arm: payload.upper_arm,
        armhole: payload.armhole,
        yoke_depth: payload.yoke_depth,
        raglan_depth: payload.raglan_depth,
        length: payload.length,
        wrist: payload.wrist,
    };

    state.project_store.create(&project).map_err(|e| {
        warn!("Project creation failed: {e}");
        ResourceApiError::Internal
    })?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// Update endpoint - PUT /api/projects/:id
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<Json<Project>, ResourceApiError> {
    let user = caller_id(&claims)?;
    let id = parse_resource_id(&id)?;

    let project = state
        .project_store
        .update(&user, &id, payload)
        .map_err(|e| {
            warn!("Project update failed: {e}");
            ResourceApiError::Internal
        })?
        .ok_or(ResourceApiError::NotFound)?;

    Ok(Json(project))
}

/// Delete endpoint - DELETE /api/projects/:id
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<serde_json::Value>, ResourceApiError> {
    let user = caller_id(&claims)?;
    let id = parse_resource_id(&id)?;

    let deleted = state.project_store.delete(&user, &id).map_err(|e| {
        warn!("Project deletion failed: {e}");
        ResourceApiError::Internal
    })?;
    if !deleted {
        return Err(ResourceApiError::NotFound);
    }

    Ok(Json(json!({ "message": "success" })))
}
