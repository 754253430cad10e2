use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::db::is_unique_violation;
use crate::errors::AppError;
use crate::models::application::{ApplicationDetailRow, ApplicationRow, ApplicationStatus};

const DETAIL_SELECT: &str = r#"
    SELECT a.*,
           j.title AS job_title,
           j.company,
           j.location,
           j.recruiter_id,
           u.full_name AS student_name,
           u.email AS student_email
    FROM applications a
    JOIN jobs j ON j.id = a.job_id
    JOIN users u ON u.id = a.student_id
"#;

pub async fn create_application(
    pool: &PgPool,
    student_id: Uuid,
    job_id: Uuid,
    cover_letter: &str,
    matching_score: i32,
) -> Result<ApplicationRow, AppError> {
    let application = sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications (student_id, job_id, cover_letter, status, matching_score)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(student_id)
    .bind(job_id)
    .bind(cover_letter)
    .bind(ApplicationStatus::Applied.as_str())
    .bind(matching_score)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("You have already applied to this job".to_string())
        } else {
            AppError::Database(e)
        }
    })?;

    info!(
        application_id = %application.id,
        %student_id,
        %job_id,
        matching_score,
        "Application submitted"
    );
    Ok(application)
}

pub async fn find_application_detail(
    pool: &PgPool,
    application_id: Uuid,
) -> Result<ApplicationDetailRow, AppError> {
    let sql = format!("{DETAIL_SELECT} WHERE a.id = $1");
    sqlx::query_as::<_, ApplicationDetailRow>(&sql)
        .bind(application_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {application_id} not found")))
}

/// Loads an application and checks that `recruiter_id` owns its job.
pub async fn find_owned_application(
    pool: &PgPool,
    application_id: Uuid,
    recruiter_id: Uuid,
) -> Result<ApplicationDetailRow, AppError> {
    let application = find_application_detail(pool, application_id).await?;
    if application.recruiter_id != recruiter_id {
        return Err(AppError::Forbidden(
            "You can only manage applications for your own jobs".to_string(),
        ));
    }
    Ok(application)
}

/// A student's applications, newest first.
pub async fn list_student_applications(
    pool: &PgPool,
    student_id: Uuid,
) -> Result<Vec<ApplicationDetailRow>, AppError> {
    let sql = format!("{DETAIL_SELECT} WHERE a.student_id = $1 ORDER BY a.created_at DESC");
    Ok(sqlx::query_as::<_, ApplicationDetailRow>(&sql)
        .bind(student_id)
        .fetch_all(pool)
        .await?)
}

/// Applications to a job, best match first; ties go to the earliest applicant.
pub async fn list_job_applications(
    pool: &PgPool,
    job_id: Uuid,
) -> Result<Vec<ApplicationDetailRow>, AppError> {
    let sql = format!(
        "{DETAIL_SELECT} WHERE a.job_id = $1 ORDER BY a.matching_score DESC, a.created_at ASC"
    );
    Ok(sqlx::query_as::<_, ApplicationDetailRow>(&sql)
        .bind(job_id)
        .fetch_all(pool)
        .await?)
}

pub async fn update_status(
    pool: &PgPool,
    application_id: Uuid,
    status: ApplicationStatus,
    recruiter_notes: Option<&str>,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE applications
        SET status = $2,
            recruiter_notes = COALESCE($3, recruiter_notes),
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(application_id)
    .bind(status.as_str())
    .bind(recruiter_notes)
    .execute(pool)
    .await?;

    info!(%application_id, %status, notes_updated = recruiter_notes.is_some(), "Application status changed");
    Ok(())
}
