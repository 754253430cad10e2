use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::models::JobInput;
use crate::models::job::{JobListingRow, JobRow, JobStatus};

const LISTING_SELECT: &str = r#"
    SELECT j.*,
           u.email AS recruiter_email,
           (SELECT COUNT(*) FROM applications a WHERE a.job_id = j.id) AS application_count
    FROM jobs j
    JOIN users u ON u.id = j.recruiter_id
"#;

/// All ACTIVE jobs, newest first.
pub async fn list_active_jobs(pool: &PgPool) -> Result<Vec<JobListingRow>, AppError> {
    let sql = format!("{LISTING_SELECT} WHERE j.status = $1 ORDER BY j.created_at DESC");
    Ok(sqlx::query_as::<_, JobListingRow>(&sql)
        .bind(JobStatus::Active.as_str())
        .fetch_all(pool)
        .await?)
}

/// Every job a recruiter has posted, regardless of status.
pub async fn list_recruiter_jobs(
    pool: &PgPool,
    recruiter_id: Uuid,
) -> Result<Vec<JobListingRow>, AppError> {
    let sql = format!("{LISTING_SELECT} WHERE j.recruiter_id = $1 ORDER BY j.created_at DESC");
    Ok(sqlx::query_as::<_, JobListingRow>(&sql)
        .bind(recruiter_id)
        .fetch_all(pool)
        .await?)
}

pub async fn find_job_listing(pool: &PgPool, job_id: Uuid) -> Result<JobListingRow, AppError> {
    let sql = format!("{LISTING_SELECT} WHERE j.id = $1");
    sqlx::query_as::<_, JobListingRow>(&sql)
        .bind(job_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| job_not_found(job_id))
}

pub async fn find_job(pool: &PgPool, job_id: Uuid) -> Result<JobRow, AppError> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| job_not_found(job_id))
}

/// Loads a job and checks that `recruiter_id` posted it.
pub async fn find_owned_job(
    pool: &PgPool,
    job_id: Uuid,
    recruiter_id: Uuid,
) -> Result<JobRow, AppError> {
    let job = find_job(pool, job_id).await?;
    if job.recruiter_id != recruiter_id {
        return Err(AppError::Forbidden(
            "You can only manage your own job postings".to_string(),
        ));
    }
    Ok(job)
}

pub async fn create_job(
    pool: &PgPool,
    recruiter_id: Uuid,
    input: &JobInput,
) -> Result<JobRow, AppError> {
    let job = sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (recruiter_id, title, description, location, company, status,
             required_skills, salary_min, salary_max)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(recruiter_id)
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.location)
    .bind(&input.company)
    .bind(input.status.unwrap_or_default().as_str())
    .bind(&input.required_skills)
    .bind(input.salary_min)
    .bind(input.salary_max)
    .fetch_one(pool)
    .await?;

    info!(job_id = %job.id, %recruiter_id, status = %job.status, "Created job");
    Ok(job)
}

/// Replaces every editable field; status is kept when the input omits it.
pub async fn update_job(pool: &PgPool, job_id: Uuid, input: &JobInput) -> Result<JobRow, AppError> {
    let job = sqlx::query_as::<_, JobRow>(
        r#"
        UPDATE jobs
        SET title = $2,
            description = $3,
            location = $4,
            company = $5,
            status = COALESCE($6, status),
            required_skills = $7,
            salary_min = $8,
            salary_max = $9,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(job_id)
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.location)
    .bind(&input.company)
    .bind(input.status.map(JobStatus::as_str))
    .bind(&input.required_skills)
    .bind(input.salary_min)
    .bind(input.salary_max)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| job_not_found(job_id))?;

    info!(%job_id, status = %job.status, "Updated job");
    Ok(job)
}

/// Deletes a job; applications and interviews cascade.
pub async fn delete_job(pool: &PgPool, job_id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(job_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(job_not_found(job_id));
    }
    info!(%job_id, "Deleted job");
    Ok(())
}

fn job_not_found(job_id: Uuid) -> AppError {
    AppError::NotFound(format!("Job {job_id} not found"))
}
