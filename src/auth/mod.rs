//! Phone-based authentication.
//!
//! Tokens are HS256 JWTs whose subject is the verified phone number. The OTP
//! flow that gates issuance lives in `services::otp`; this module only signs
//! and validates tokens and provides the bearer-token middleware.

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Claim structure for JWT tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (verified phone number)
    pub sub: String,
    /// JWT ID (unique identifier for this token)
    pub jti: String,
    /// Issued at time
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
}

/// Phone number extracted from a validated bearer token, inserted into
/// request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthenticatedPhone(pub String);

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("failed to create token: {0}")]
    TokenCreation(String),

    #[error("invalid token")]
    InvalidToken,

    #[error("token expired")]
    TokenExpired,

    #[error("missing bearer token")]
    MissingToken,
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenCreation(msg) => ServiceError::InternalError(msg),
            AuthError::InvalidToken => ServiceError::AuthError("Invalid token".to_string()),
            AuthError::TokenExpired => ServiceError::AuthError("Token expired".to_string()),
            AuthError::MissingToken => {
                ServiceError::Unauthorized("Missing bearer token".to_string())
            }
        }
    }
}

/// Authentication configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub token_expiration: Duration,
}

impl AuthConfig {
    pub fn new(
        jwt_secret: String,
        jwt_issuer: String,
        jwt_audience: String,
        token_expiration: Duration,
    ) -> Self {
        Self {
            jwt_secret,
            jwt_issuer,
            jwt_audience,
            token_expiration,
        }
    }
}

/// Authentication service that handles token issuance and validation
#[derive(Debug, Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Generate a JWT for a phone number that passed OTP verification
    pub fn generate_token(&self, phone: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let expires_at = now
            + ChronoDuration::from_std(self.config.token_expiration)
                .map_err(|_| AuthError::TokenCreation("Invalid token duration".to_string()))?;

        let claims = Claims {
            sub: phone.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.config.jwt_issuer.clone(),
            aud: self.config.jwt_audience.clone(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    /// Validate a JWT and extract the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.jwt_issuer]);
        validation.set_audience(&[&self.config.jwt_audience]);

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?
        .claims;

        Ok(claims)
    }
}

/// Bearer-token middleware for protected routes.
///
/// Expects an `Arc<AuthService>` in the request extensions (injected by a
/// layer at router assembly time) and, on success, inserts the caller's
/// [`AuthenticatedPhone`] for downstream handlers.
pub async fn require_auth(mut req: Request, next: Next) -> Result<Response, ServiceError> {
    let auth = req
        .extensions()
        .get::<Arc<AuthService>>()
        .cloned()
        .ok_or_else(|| ServiceError::InternalError("AuthService not configured".to_string()))?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingToken)?
        .to_string();

    let claims = auth.validate_token(&token)?;
    req.extensions_mut().insert(AuthenticatedPhone(claims.sub));

    Ok(next.run(req).await)
}
