//! JWT Token Handler
//! Mission: Generate and validate JWT tokens securely

use crate::auth::models::{Claims, UserClaims};
use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// JWT handler for token operations.
pub struct JwtHandler {
    secret: String,
    expiry_days: i64,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key and the default 7-day
    /// token lifetime.
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            expiry_days: 7,
        }
    }

    /// Override the token lifetime (days).
    pub fn with_expiry_days(secret: String, expiry_days: i64) -> Self {
        Self {
            secret,
            expiry_days,
        }
    }

    /// Generate a signed token embedding the given identity claims.
    ///
    /// The subject claim is the username; expiry is issuer-assigned from
    /// the handler's lifetime window.
    pub fn generate_token(&self, user: &UserClaims) -> Result<String> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(chrono::Duration::days(self.expiry_days))
            .context("Invalid timestamp")?
            .timestamp() as usize;

        let claims = Claims {
            sub: user.username.clone(),
            iat: now.timestamp() as usize,
            exp: expiration,
            user: user.clone(),
        };

        debug!(
            "Generating JWT for user {} ({}), expires in {}d",
            user.username, user.id, self.expiry_days
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to generate JWT")
    }

    /// Validate a token's signature and expiry and extract its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .context("Invalid or expired token")?;

        debug!("Validated JWT for user {}", decoded.claims.user.username);

        Ok(decoded.claims)
    }
}
