//! Verification of identity-provider access tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::access::Identity;
use crate::error::AppError;

/// Claims carried by an access token.
///
/// `sub` is the identity provider's user id, which doubles as the partner id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub aud: String,
    pub exp: i64,
}

/// Service for verifying bearer tokens.
///
/// Tokens are HS256 JWTs signed with the identity provider's shared secret;
/// the audience claim must match the configured audience.
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    audience: String,
}

fn invalid_token(reason: &str) -> AppError {
    AppError::unauthorized("Unauthorized", json!({ "reason": reason }))
}

impl AuthService {
    pub fn new(secret: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            audience: audience.to_string(),
        }
    }

    /// Verifies signature, expiry and audience, and extracts the identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is malformed, expired,
    /// signed with another key, meant for another audience, or its subject
    /// is not a UUID.
    pub fn verify_token(&self, token: &str) -> Result<Identity, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            invalid_token("Invalid or expired token")
        })?;

        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| invalid_token("Token subject is not a user id"))?;

        Ok(Identity {
            user_id,
            email: data.claims.email,
        })
    }

    /// Signs a token the way the identity provider does.
    ///
    /// Used by the admin CLI for local development and by tests.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `ttl` overflows the clock.
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue_token(
        &self,
        user_id: Uuid,
        email: Option<&str>,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let expires_at = Utc::now().checked_add_signed(ttl).ok_or_else(|| {
            AppError::bad_request(
                "Token lifetime out of range",
                json!({ "ttl_seconds": ttl.num_seconds() }),
            )
        })?;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.map(str::to_string),
            aud: self.audience.clone(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AppError::internal(
                "Failed to sign token",
                json!({ "reason": e.to_string() }),
            )
        })
    }
}
