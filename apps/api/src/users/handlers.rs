use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::user::{Role, UserRow};
use crate::state::AppState;
use crate::users::service;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub full_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserProfile {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row.role()?;
        Ok(Self {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            role,
            created_at: row.created_at,
        })
    }
}

/// GET /api/users/me
pub async fn handle_get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<UserProfile>, AppError> {
    service::find_user(&state.db, user.id)
        .await
        .and_then(UserProfile::try_from)
        .map(Json)
}

/// PUT /api/users/me
pub async fn handle_update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<ProfileUpdateRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let full_name = request.full_name.trim();
    if full_name.is_empty() {
        return Err(AppError::Validation("Full name is required".to_string()));
    }

    service::update_full_name(&state.db, user.id, full_name)
        .await
        .and_then(UserProfile::try_from)
        .map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_hides_password_hash() {
        let row = UserRow {
            id: Uuid::new_v4(),
            email: "grace@corp.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            full_name: "Grace Hopper".to_string(),
            role: "RECRUITER".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(UserProfile::try_from(row).unwrap()).unwrap();
        assert_eq!(json["role"], "RECRUITER");
        assert_eq!(json["fullName"], "Grace Hopper");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
    }
}
