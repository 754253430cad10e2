use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interviews::models::InterviewInput;
use crate::models::application::ApplicationStatus;
use crate::models::interview::{InterviewDetailRow, InterviewRow};

const DETAIL_SELECT: &str = r#"
    SELECT i.*,
           j.title AS job_title,
           u.full_name AS student_name,
           u.email AS student_email
    FROM interviews i
    JOIN applications a ON a.id = i.application_id
    JOIN jobs j ON j.id = a.job_id
    JOIN users u ON u.id = a.student_id
"#;

/// Creates or replaces the application's interview and moves the application
/// to INTERVIEW. Both writes commit together.
pub async fn schedule_interview(
    pool: &PgPool,
    input: &InterviewInput,
) -> Result<InterviewDetailRow, AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE applications SET status = $2, updated_at = NOW() WHERE id = $1")
        .bind(input.application_id)
        .bind(ApplicationStatus::Interview.as_str())
        .execute(&mut *tx)
        .await?;

    let interview = sqlx::query_as::<_, InterviewRow>(
        r#"
        INSERT INTO interviews (application_id, scheduled_at, mode, location, meeting_link, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (application_id) DO UPDATE
        SET scheduled_at = EXCLUDED.scheduled_at,
            mode = EXCLUDED.mode,
            location = EXCLUDED.location,
            meeting_link = EXCLUDED.meeting_link,
            notes = EXCLUDED.notes,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(input.application_id)
    .bind(input.scheduled_at)
    .bind(input.mode.as_str())
    .bind(&input.location)
    .bind(&input.meeting_link)
    .bind(&input.notes)
    .fetch_one(&mut *tx)
    .await?;

    let sql = format!("{DETAIL_SELECT} WHERE i.id = $1");
    let detail = sqlx::query_as::<_, InterviewDetailRow>(&sql)
        .bind(interview.id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(
        interview_id = %interview.id,
        application_id = %input.application_id,
        scheduled_at = %input.scheduled_at,
        mode = %input.mode,
        "Scheduled interview"
    );
    Ok(detail)
}

pub async fn find_for_application(
    pool: &PgPool,
    application_id: Uuid,
) -> Result<Option<InterviewDetailRow>, AppError> {
    let sql = format!("{DETAIL_SELECT} WHERE i.application_id = $1");
    Ok(sqlx::query_as::<_, InterviewDetailRow>(&sql)
        .bind(application_id)
        .fetch_optional(pool)
        .await?)
}

/// Interviews attached to any of `application_ids`.
pub async fn find_for_applications(
    pool: &PgPool,
    application_ids: &[Uuid],
) -> Result<Vec<InterviewDetailRow>, AppError> {
    if application_ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!("{DETAIL_SELECT} WHERE i.application_id = ANY($1)");
    Ok(sqlx::query_as::<_, InterviewDetailRow>(&sql)
        .bind(application_ids)
        .fetch_all(pool)
        .await?)
}

/// A student's interviews, latest scheduled first.
pub async fn list_student_interviews(
    pool: &PgPool,
    student_id: Uuid,
) -> Result<Vec<InterviewDetailRow>, AppError> {
    let sql = format!("{DETAIL_SELECT} WHERE a.student_id = $1 ORDER BY i.scheduled_at DESC");
    Ok(sqlx::query_as::<_, InterviewDetailRow>(&sql)
        .bind(student_id)
        .fetch_all(pool)
        .await?)
}

/// Interviews across a recruiter's jobs, soonest first.
pub async fn list_recruiter_interviews(
    pool: &PgPool,
    recruiter_id: Uuid,
) -> Result<Vec<InterviewDetailRow>, AppError> {
    let sql = format!("{DETAIL_SELECT} WHERE j.recruiter_id = $1 ORDER BY i.scheduled_at ASC");
    Ok(sqlx::query_as::<_, InterviewDetailRow>(&sql)
        .bind(recruiter_id)
        .fetch_all(pool)
        .await?)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::applications::service::{create_application, find_application_detail};
    use crate::db::fixtures;
    use crate::models::interview::InterviewMode;
    use crate::models::job::JobStatus;
    use crate::models::user::Role;

    async fn application(pool: &PgPool) -> Uuid {
        let recruiter = fixtures::user(pool, Role::Recruiter).await;
        let student = fixtures::user(pool, Role::Student).await;
        let job = fixtures::job(pool, recruiter, JobStatus::Active, &["rust"]).await;
        create_application(pool, student, job, "Hi", 100)
            .await
            .unwrap()
            .id
    }

    fn input(application_id: Uuid, mode: InterviewMode) -> InterviewInput {
        InterviewInput {
            application_id,
            scheduled_at: Utc::now() + Duration::days(3),
            mode,
            location: None,
            meeting_link: Some("https://meet.example.com/x".to_string()),
            notes: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_scheduling_moves_application_to_interview(pool: PgPool) {
        let app_id = application(&pool).await;

        let detail = schedule_interview(&pool, &input(app_id, InterviewMode::Online))
            .await
            .unwrap();
        assert_eq!(detail.job_title, "Backend Engineer");
        assert_eq!(detail.student_name, "Test User");

        let app = find_application_detail(&pool, app_id).await.unwrap();
        assert_eq!(app.application.status, "INTERVIEW");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_rescheduling_replaces_the_interview(pool: PgPool) {
        let app_id = application(&pool).await;

        let first = schedule_interview(&pool, &input(app_id, InterviewMode::Online))
            .await
            .unwrap();
        let mut again = input(app_id, InterviewMode::Offline);
        again.location = Some("HQ, room 4".to_string());
        let second = schedule_interview(&pool, &again).await.unwrap();

        assert_eq!(first.interview.id, second.interview.id);
        assert_eq!(second.interview.mode, "OFFLINE");
        assert_eq!(second.interview.location.as_deref(), Some("HQ, room 4"));

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM interviews WHERE application_id = $1")
                .bind(app_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_unknown_application_leaves_nothing_behind(pool: PgPool) {
        let result = schedule_interview(&pool, &input(Uuid::new_v4(), InterviewMode::Hybrid)).await;
        assert!(matches!(result, Err(AppError::Database(_))));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM interviews")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_interview_lookups_return_detail(pool: PgPool) {
        let app_id = application(&pool).await;
        schedule_interview(&pool, &input(app_id, InterviewMode::Online))
            .await
            .unwrap();

        let one = find_for_application(&pool, app_id).await.unwrap().unwrap();
        assert_eq!(one.job_title, "Backend Engineer");

        let many = find_for_applications(&pool, &[app_id, Uuid::new_v4()])
            .await
            .unwrap();
        assert_eq!(many.len(), 1);
        assert!(find_for_applications(&pool, &[]).await.unwrap().is_empty());
    }
}
