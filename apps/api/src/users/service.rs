use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::db::is_unique_violation;
use crate::errors::AppError;
use crate::models::user::{Role, UserRow};

/// Inserts a user. A taken email is a 409.
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    full_name: &str,
    role: Role,
) -> Result<UserRow, AppError> {
    sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (email, password_hash, full_name, role)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(full_name)
    .bind(role.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("Email already in use".to_string())
        } else {
            AppError::Database(e)
        }
    })
}

pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, AppError> {
    Ok(sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?)
}

pub async fn find_user(pool: &PgPool, user_id: Uuid) -> Result<UserRow, AppError> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

pub async fn update_full_name(
    pool: &PgPool,
    user_id: Uuid,
    full_name: &str,
) -> Result<UserRow, AppError> {
    let user = sqlx::query_as::<_, UserRow>(
        "UPDATE users SET full_name = $2 WHERE id = $1 RETURNING *",
    )
    .bind(user_id)
    .bind(full_name)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    info!(%user_id, "Updated profile");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    async fn test_duplicate_email_is_conflict(pool: PgPool) {
        create_user(&pool, "ada@uni.edu", "hash", "Ada", Role::Student)
            .await
            .unwrap();

        let err = create_user(&pool, "ada@uni.edu", "hash", "Ada Again", Role::Recruiter)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_full_name(pool: PgPool) {
        let user = create_user(&pool, "grace@corp.com", "hash", "Grace", Role::Recruiter)
            .await
            .unwrap();

        let updated = update_full_name(&pool, user.id, "Grace Hopper").await.unwrap();
        assert_eq!(updated.full_name, "Grace Hopper");
        assert_eq!(
            find_user_by_email(&pool, "grace@corp.com")
                .await
                .unwrap()
                .map(|u| u.full_name),
            Some("Grace Hopper".to_string())
        );
    }
}
