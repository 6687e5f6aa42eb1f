//! Project Models
//! Mission: Pattern instances with personal notes, images, and progress data

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A knitting project: one user's work on (optionally) one pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub user: Uuid,
    pub pattern: Option<Uuid>,
    pub name: String,
    pub created: String, // RFC 3339, server-assigned
    pub images: Vec<String>,
    pub size: Option<String>,
    pub needles: Option<String>,
    pub notes: Option<String>,
    pub ease: Option<f64>,
    pub gauge_row: Option<f64>,
    pub gauge_stitches: Option<f64>,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub upper_arm: Option<f64>,
    pub armhole: Option<f64>,
    pub yoke_depth: Option<f64>,
    pub raglan_depth: Option<f64>,
    pub length: Option<f64>,
    pub wrist: Option<f64>,
}

/// Create request body. `name` is the only required field; `created` and
/// the owner are assigned server-side.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    pub pattern: Option<Uuid>,
    pub images: Option<Vec<String>>,
    pub size: Option<String>,
    pub needles: Option<String>,
    pub notes: Option<String>,
    pub ease: Option<f64>,
    pub gauge_row: Option<f64>,
    pub gauge_stitches: Option<f64>,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub upper_arm: Option<f64>,
    pub armhole: Option<f64>,
    pub yoke_depth: Option<f64>,
    pub raglan_depth: Option<f64>,
    pub length: Option<f64>,
    pub wrist: Option<f64>,
}

/// Update request body. Every field independently optional; `created` and
/// the owner are immutable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub pattern: Option<Uuid>,
    pub images: Option<Vec<String>>,
    pub size: Option<String>,
    pub needles: Option<String>,
    pub notes: Option<String>,
    pub ease: Option<f64>,
    pub gauge_row: Option<f64>,
    pub gauge_stitches: Option<f64>,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub upper_arm: Option<f64>,
    pub armhole: Option<f64>,
    pub yoke_depth: Option<f64>,
    pub raglan_depth: Option<f64>,
    pub length: Option<f64>,
    pub wrist: Option<f64>,
}
