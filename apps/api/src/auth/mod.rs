//! Authentication and role-based access control.
//!
//! Tokens are HS256 JWTs carrying the user id, email and role. Handlers take an
//! `AuthUser` argument to require a valid token and call `require` to gate on
//! role before touching the database.

use axum::{async_trait, extract::FromRequestParts, http::header, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::Role;
use crate::state::AppState;

pub mod handlers;
pub mod password;

/// JWT claims issued at login/registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Signing and verification keys derived from `JWT_SECRET`.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, user_id: Uuid, email: &str, role: Role) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT encoding failed: {e}")))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {e}")))
    }
}

/// The authenticated caller, extracted from the `Authorization: Bearer` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    /// Fails with 403 unless the caller has `role`.
    pub fn require(&self, role: Role) -> Result<(), AppError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::Forbidden(match role {
                Role::Student => "Only students can perform this action".to_string(),
                Role::Recruiter => "Only recruiters can perform this action".to_string(),
            }))
        }
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

        let token = bearer_token(header_value)
            .ok_or_else(|| AppError::Unauthorized("Expected a Bearer token".to_string()))?;

        state.jwt.verify(token).map(AuthUser::from)
    }
}

fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> JwtKeys {
        JwtKeys::new("test-secret", 1)
    }

    #[test]
    fn test_issue_then_verify_returns_claims() {
        let id = Uuid::new_v4();
        let token = keys().issue(id, "ada@uni.edu", Role::Student).unwrap();
        let claims = keys().verify(&token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "ada@uni.edu");
        assert_eq!(claims.role, Role::Student);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let token = JwtKeys::new("other", 1)
            .issue(Uuid::new_v4(), "x@y.z", Role::Recruiter)
            .unwrap();
        assert!(matches!(keys().verify(&token), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Negative TTL puts exp well past the default 60s leeway.
        let token = JwtKeys::new("test-secret", -2)
            .issue(Uuid::new_v4(), "x@y.z", Role::Student)
            .unwrap();
        assert!(matches!(keys().verify(&token), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(keys().verify("not.a.jwt").is_err());
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer  abc "), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }

    #[test]
    fn test_require_role() {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: "r@co.io".to_string(),
            role: Role::Recruiter,
        };
        assert!(user.require(Role::Recruiter).is_ok());
        match user.require(Role::Student) {
            Err(AppError::Forbidden(msg)) => assert!(msg.contains("students")),
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }
}
