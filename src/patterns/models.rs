//! Pattern Models
//! Mission: Garment schematics with gauge and measurement fields

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A knitting pattern owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub id: Uuid,
    pub user: Uuid,
    pub name: String,
    pub ease: Option<f64>,
    pub gauge_row: Option<f64>,
    pub gauge_stitches: Option<f64>,
    pub style: Option<PatternStyle>,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub upper_arm: Option<f64>,
    pub armhole: Option<f64>,
    pub length: Option<f64>,
}

/// Sleeve construction style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternStyle {
    #[serde(rename = "raglan")]
    Raglan,
    #[serde(rename = "set in")]
    SetIn,
}

impl PatternStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternStyle::Raglan => "raglan",
            PatternStyle::SetIn => "set in",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "raglan" => Some(PatternStyle::Raglan),
            "set in" => Some(PatternStyle::SetIn),
            _ => None,
        }
    }
}

/// Create request body. `name` is the only required field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatternRequest {
    pub name: Option<String>,
    pub ease: Option<f64>,
    pub gauge_row: Option<f64>,
    pub gauge_stitches: Option<f64>,
    pub style: Option<PatternStyle>,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub upper_arm: Option<f64>,
    pub armhole: Option<f64>,
    pub length: Option<f64>,
}

/// Update request body. Every field independently optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatternRequest {
    pub name: Option<String>,
    pub ease: Option<f64>,
    pub gauge_row: Option<f64>,
    pub gauge_stitches: Option<f64>,
    pub style: Option<PatternStyle>,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub upper_arm: Option<f64>,
    pub armhole: Option<f64>,
    pub length: Option<f64>,
}
