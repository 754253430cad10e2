//! Public platform statistics.

use axum::{extract::State, Json};
use serde::Serialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::user::Role;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub total_jobs: i64,
    pub total_recruiters: i64,
    pub total_students: i64,
    pub success_rate: f64,
}

/// Applications per student as a percentage, capped at 100 and rounded to two
/// decimals. Zero when there are no students.
pub fn compute_success_rate(applications: i64, students: i64) -> f64 {
    if students <= 0 {
        return 0.0;
    }
    let rate = (applications as f64 * 100.0 / students as f64).min(100.0);
    (rate * 100.0).round() / 100.0
}

async fn count(pool: &PgPool, sql: &str) -> Result<i64, AppError> {
    Ok(sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await?)
}

async fn count_role(pool: &PgPool, role: Role) -> Result<i64, AppError> {
    Ok(
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role.as_str())
            .fetch_one(pool)
            .await?,
    )
}

/// GET /api/stats
pub async fn handle_stats(State(state): State<AppState>) -> Result<Json<PlatformStats>, AppError> {
    let pool = &state.db;
    let total_jobs = count(pool, "SELECT COUNT(*) FROM jobs").await?;
    let total_applications = count(pool, "SELECT COUNT(*) FROM applications").await?;
    let total_recruiters = count_role(pool, Role::Recruiter).await?;
    let total_students = count_role(pool, Role::Student).await?;

    Ok(Json(PlatformStats {
        total_jobs,
        total_recruiters,
        total_students,
        success_rate: compute_success_rate(total_applications, total_students),
    }))
}
