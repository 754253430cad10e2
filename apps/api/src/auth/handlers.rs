//! Axum route handlers for registration and login.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::models::user::Role;
use crate::state::AppState;
use crate::users;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    validate_registration(&request)?;

    let email = normalize_email(&request.email);
    let password_hash = hash_password(request.password).await?;

    let user = users::service::create_user(
        &state.db,
        &email,
        &password_hash,
        request.full_name.trim(),
        request.role,
    )
    .await?;

    info!(user_id = %user.id, role = %request.role, "Registered user");

    let token = state.jwt.issue(user.id, &user.email, request.role)?;
    Ok(Json(AuthResponse {
        token,
        email: user.email,
        full_name: user.full_name,
        role: request.role,
    }))
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let user = users::service::find_user_by_email(&state.db, &normalize_email(&request.email))
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(request.password, user.password_hash.clone()).await? {
        return Err(invalid());
    }

    let role = user.role()?;
    let token = state.jwt.issue(user.id, &user.email, role)?;
    Ok(Json(AuthResponse {
        token,
        email: user.email,
        full_name: user.full_name,
        role,
    }))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_registration(request: &RegisterRequest) -> Result<(), AppError> {
    let email = request.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if request.full_name.trim().is_empty() {
        return Err(AppError::Validation("Full name is required".to_string()));
    }
    Ok(())
}
