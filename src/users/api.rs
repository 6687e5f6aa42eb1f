//! User API Endpoints
//! Mission: Registration and self-service account management

use crate::auth::models::Claims;
use crate::server::AppState;
use crate::users::models::{NewUser, RegisterRequest, UpdateUserRequest, User, UserResponse};
use crate::users::store::{self, CreateUserError, UserUpdate};
use crate::validate::{self, Check, ValidationError};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

/// Registration stages, in execution order. The runner halts on the first
/// failing stage, so a payload with several bad fields reports exactly one.
const REGISTRATION_CHECKS: &[Check<'static, RegisterRequest>] = &[
    ("requiredFields", check_required_fields),
    ("nameFormat", check_register_names),
    ("trimmed", check_register_trimmed),
    ("emailFormat", check_register_email),
    ("passwordPolicy", check_register_password),
];

/// Update stages. No required-fields stage: every field is optional and
/// validated only when present. A password change must carry the current
/// password, checked last so field-shape errors win precedence.
const UPDATE_CHECKS: &[Check<'static, UpdateUserRequest>] = &[
    ("nameFormat", check_update_names),
    ("trimmed", check_update_trimmed),
    ("emailFormat", check_update_email),
    ("passwordPolicy", check_update_password),
    ("currentPassword", check_current_password_present),
];

fn check_required_fields(req: &RegisterRequest) -> Result<(), ValidationError> {
    let fields = [
        ("firstName", req.first_name.is_some()),
        ("lastName", req.last_name.is_some()),
        ("username", req.username.is_some()),
        ("password", req.password.is_some()),
        ("email", req.email.is_some()),
    ];

    match fields.iter().find(|(_, present)| !present) {
        Some((name, _)) => Err(ValidationError::missing_field(*name)),
        None => Ok(()),
    }
}

fn check_names(
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<(), ValidationError> {
    let fields = [("firstName", first_name), ("lastName", last_name)];

    for (name, value) in fields {
        if let Some(value) = value {
            if !validate::is_valid_name(value.trim()) {
                return Err(ValidationError::new(
                    "Incorrect field type: only letters allowed",
                    name,
                ));
            }
        }
    }
    Ok(())
}

fn check_register_names(req: &RegisterRequest) -> Result<(), ValidationError> {
    check_names(req.first_name.as_deref(), req.last_name.as_deref())
}

fn check_update_names(req: &UpdateUserRequest) -> Result<(), ValidationError> {
    check_names(req.first_name.as_deref(), req.last_name.as_deref())
}

fn check_trimmed_field(name: &str, value: Option<&str>) -> Result<(), ValidationError> {
    if let Some(value) = value {
        if !validate::is_trimmed(value) {
            return Err(ValidationError::new(
                "Cannot start or end with a space",
                name,
            ));
        }
    }
    Ok(())
}

fn check_register_trimmed(req: &RegisterRequest) -> Result<(), ValidationError> {
    check_trimmed_field("username", req.username.as_deref())?;
    check_trimmed_field("password", req.password.as_deref())
}

fn check_update_trimmed(req: &UpdateUserRequest) -> Result<(), ValidationError> {
    check_trimmed_field("password", req.password.as_deref())
}

fn check_email_field(value: Option<&str>) -> Result<(), ValidationError> {
    if let Some(value) = value {
        if !validate::is_valid_email(value.trim()) {
            return Err(ValidationError::new("Not a valid email address", "email"));
        }
    }
    Ok(())
}

fn check_register_email(req: &RegisterRequest) -> Result<(), ValidationError> {
    check_email_field(req.email.as_deref())
}

fn check_update_email(req: &UpdateUserRequest) -> Result<(), ValidationError> {
    check_email_field(req.email.as_deref())
}

fn check_password_field(value: Option<&str>) -> Result<(), ValidationError> {
    if let Some(value) = value {
        if let Err(violated) = validate::check_password_policy(value) {
            return Err(validate::password_policy_error(&violated, "password"));
        }
    }
    Ok(())
}

fn check_register_password(req: &RegisterRequest) -> Result<(), ValidationError> {
    check_password_field(req.password.as_deref())
}

fn check_update_password(req: &UpdateUserRequest) -> Result<(), ValidationError> {
    check_password_field(req.password.as_deref())
}

fn check_current_password_present(req: &UpdateUserRequest) -> Result<(), ValidationError> {
    if req.password.is_some() && req.current_password.is_none() {
        return Err(ValidationError::missing_field("currentPassword"));
    }
    Ok(())
}

/// Register endpoint - POST /api/users
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), UserApiError> {
    validate::run_checks(&payload, REGISTRATION_CHECKS)?;

    let (Some(first_name), Some(last_name), Some(username), Some(password), Some(email)) = (
        payload.first_name,
        payload.last_name,
        payload.username,
        payload.password,
        payload.email,
    ) else {
        // The required-fields stage guarantees presence.
        return Err(UserApiError::Internal);
    };

    let new_user = NewUser {
        first_name: first_name.trim().to_string(),
        last_name: last_name.trim().to_string(),
        username,
        password,
        email: email.trim().to_string(),
    };

    match state.user_store.create_user(new_user) {
        Ok(user) => Ok((StatusCode::CREATED, Json(user.serialize()))),
        Err(CreateUserError::UsernameTaken) => Err(ValidationError::username_taken().into()),
        Err(CreateUserError::Db(e)) => {
            warn!("User creation failed: {e}");
            Err(UserApiError::Internal)
        }
    }
}

/// List endpoint - GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, UserApiError> {
    let users = state.user_store.list_users().map_err(|e| {
        warn!("User listing failed: {e}");
        UserApiError::Internal
    })?;

    Ok(Json(users.iter().map(User::serialize).collect()))
}

/// Update endpoint - PUT /api/users/:id (self-service only)
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, UserApiError> {
    if claims.user.id != id {
        return Err(
            ValidationError::new("Cannot modify another user's account", "id").into(),
        );
    }
    let id = Uuid::parse_str(&id).map_err(|e| {
        warn!("Malformed user id in verified claims: {e}");
        UserApiError::Internal
    })?;

    validate::run_checks(&payload, UPDATE_CHECKS)?;

    // A password change verifies the current password before the new one
    // is hashed; nothing is written when verification fails.
    let password_hash = match payload.password.as_deref() {
        Some(new_password) => {
            let user = state
                .user_store
                .get_user_by_id(&id)
                .map_err(|e| {
                    warn!("User lookup failed: {e}");
                    UserApiError::Internal
                })?
                .ok_or(UserApiError::UserNotFound)?;

            let current = payload.current_password.as_deref().unwrap_or_default();
            let valid = store::verify_password(current, &user.password_hash)
                .map_err(|_| UserApiError::Internal)?;
            if !valid {
                return Err(UserApiError::WrongPassword);
            }

            Some(store::hash_password(new_password).map_err(|_| UserApiError::Internal)?)
        }
        None => None,
    };

    let update = UserUpdate {
        first_name: payload.first_name.map(|v| v.trim().to_string()),
        last_name: payload.last_name.map(|v| v.trim().to_string()),
        email: payload.email.map(|v| v.trim().to_string()),
        password_hash,
        chest: payload.chest,
        waist: payload.waist,
        hips: payload.hips,
        upper_arm: payload.upper_arm,
        armhole: payload.armhole,
        length: payload.length,
        wrist: payload.wrist,
    };

    let user = state
        .user_store
        .update_fields(&id, update)
        .map_err(|e| {
            warn!("User update failed: {e}");
            UserApiError::Internal
        })?
        .ok_or(UserApiError::UserNotFound)?;

    Ok(Json(user.serialize()))
}

/// Delete endpoint - DELETE /api/users/:id (self-service only)
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<serde_json::Value>, UserApiError> {
    if claims.user.id != id {
        return Err(
            ValidationError::new("Cannot delete another user's account", "id").into(),
        );
    }
    let id = Uuid::parse_str(&id).map_err(|e| {
        warn!("Malformed user id in verified claims: {e}");
        UserApiError::Internal
    })?;

    let deleted = state.user_store.delete_user(&id).map_err(|e| {
        warn!("User deletion failed: {e}");
        UserApiError::Internal
    })?;
    if !deleted {
        return Err(UserApiError::UserNotFound);
    }

    Ok(Json(json!({ "message": "success" })))
}

/// User API errors.
#[derive(Debug)]
pub enum UserApiError {
    Validation(ValidationError),
    WrongPassword,
    UserNotFound,
    Internal,
}

impl From<ValidationError> for UserApiError {
    fn from(err: ValidationError) -> Self {
        UserApiError::Validation(err)
    }
}

impl IntoResponse for UserApiError {
    fn into_response(self) -> Response {
        match self {
            UserApiError::Validation(err) => err.into_response(),
            UserApiError::WrongPassword => {
                (StatusCode::UNAUTHORIZED, "Current password is incorrect").into_response()
            }
            UserApiError::UserNotFound => {
                (StatusCode::NOT_FOUND, "User not found").into_response()
            }
            UserApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Internal server error" })),
            )
                .into_response(),
        }
    }
}
