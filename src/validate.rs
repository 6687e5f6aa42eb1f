//! Input Validation Pipeline
//! Mission: Reject malformed registration/update payloads with a single structured error

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$"
    )
    .unwrap();
}

/// Structured validation failure returned to the caller.
///
/// Every rejected input across the pipeline uses this one shape; callers
/// never receive more than one violation per request.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    pub code: u16,
    pub reason: &'static str,
    pub message: String,
    pub location: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            code: 422,
            reason: "ValidationError",
            message: message.into(),
            location: location.into(),
        }
    }

    pub fn missing_field(location: impl Into<String>) -> Self {
        Self::new("Missing field", location)
    }

    pub fn username_taken() -> Self {
        Self::new("Username already taken", "username")
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        (StatusCode::UNPROCESSABLE_ENTITY, Json(self)).into_response()
    }
}

/// Password policy rules, in declaration order.
///
/// A failed validation reports every violated rule by name, e.g.
/// `["min", "uppercase"]` for `"passw1"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    MinLength,
    MaxLength,
    Uppercase,
    Lowercase,
    Digits,
}

impl PasswordRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordRule::MinLength => "min",
            PasswordRule::MaxLength => "max",
            PasswordRule::Uppercase => "uppercase",
            PasswordRule::Lowercase => "lowercase",
            PasswordRule::Digits => "digits",
        }
    }
}

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 72;

/// Check a candidate password against the fixed rule set.
///
/// Pure and deterministic. Returns the ordered list of violated rules on
/// failure; used both at registration and at password-change time.
pub fn check_password_policy(candidate: &str) -> Result<(), Vec<PasswordRule>> {
    let mut violated = Vec::new();

    if candidate.chars().count() < PASSWORD_MIN_LENGTH {
        violated.push(PasswordRule::MinLength);
    }
    if candidate.chars().count() > PASSWORD_MAX_LENGTH {
        violated.push(PasswordRule::MaxLength);
    }
    if !candidate.chars().any(|c| c.is_uppercase()) {
        violated.push(PasswordRule::Uppercase);
    }
    if !candidate.chars().any(|c| c.is_lowercase()) {
        violated.push(PasswordRule::Lowercase);
    }
    if !candidate.chars().any(|c| c.is_ascii_digit()) {
        violated.push(PasswordRule::Digits);
    }

    if violated.is_empty() {
        Ok(())
    } else {
        Err(violated)
    }
}

/// Password policy failure as a structured error on the given field.
pub fn password_policy_error(violated: &[PasswordRule], location: &str) -> ValidationError {
    let rules: Vec<&str> = violated.iter().map(PasswordRule::as_str).collect();
    ValidationError::new(
        format!("Password does not meet requirements: {}", rules.join(", ")),
        location,
    )
}

/// Letters only, non-empty. Applied to name fields.
pub fn is_valid_name(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_alphabetic())
}

/// A field that must not carry leading or trailing whitespace.
pub fn is_trimmed(value: &str) -> bool {
    value.trim() == value
}

/// Standard email grammar check.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// A single named validation stage.
pub type Check<'a, T> = (&'a str, fn(&T) -> Result<(), ValidationError>);

/// Run an ordered list of validation stages, halting on the first failure.
///
/// The fixed precedence means a payload with several bad fields still
/// produces exactly one error, determined by stage order.
pub fn run_checks<T>(input: &T, checks: &[Check<'_, T>]) -> Result<(), ValidationError> {
    for (_name, check) in checks {
        check(input)?;
    }
    Ok(())
}
