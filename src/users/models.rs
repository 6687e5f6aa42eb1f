//! User Models
//! Mission: Define the stored user record and its safe outward projection

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub email: String,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub upper_arm: Option<f64>,
    pub armhole: Option<f64>,
    pub length: Option<f64>,
    pub wrist: Option<f64>,
}

impl User {
    /// Outward projection: the only user shape ever returned to a caller.
    pub fn serialize(&self) -> UserResponse {
        UserResponse {
            id: self.id.to_string(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            chest: self.chest,
            waist: self.waist,
            hips: self.hips,
            upper_arm: self.upper_arm,
            armhole: self.armhole,
            length: self.length,
            wrist: self.wrist,
        }
    }
}

/// User response (sanitized). Key set is fixed; unset measurements serialize
/// as null rather than being omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub upper_arm: Option<f64>,
    pub armhole: Option<f64>,
    pub length: Option<f64>,
    pub wrist: Option<f64>,
}

/// Registration request body.
///
/// Every field is optional at the deserialization layer so the pipeline can
/// report the first missing required field by name instead of a generic
/// body-parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

/// Validated registration input, ready for hashing and persistence.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Update request body. All fields independently optional; `username` and
/// `id` are immutable after registration. A password change must carry the
/// caller's current password.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub current_password: Option<String>,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub upper_arm: Option<f64>,
    pub armhole: Option<f64>,
    pub length: Option<f64>,
    pub wrist: Option<f64>,
}
