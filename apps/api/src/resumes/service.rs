use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeDetailRow, ResumeRow};
use crate::resumes::models::ResumeRequest;

/// Creates the student's résumé or replaces its form fields.
/// Uploaded-file columns are left untouched.
pub async fn upsert_resume_form(
    pool: &PgPool,
    student_id: Uuid,
    request: &ResumeRequest,
) -> Result<ResumeRow, AppError> {
    let resume = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (student_id, summary, education, skills, experience, projects)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (student_id) DO UPDATE
        SET summary = EXCLUDED.summary,
            education = EXCLUDED.education,
            skills = EXCLUDED.skills,
            experience = EXCLUDED.experience,
            projects = EXCLUDED.projects,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(student_id)
    .bind(request.summary.as_deref().map(str::trim))
    .bind(&request.education)
    .bind(request.cleaned_skills())
    .bind(&request.experience)
    .bind(&request.projects)
    .fetch_one(pool)
    .await?;

    info!(resume_id = %resume.id, %student_id, skills = resume.skills.len(), "Saved resume form");
    Ok(resume)
}

/// Records an uploaded PDF on the student's résumé, creating it when absent.
pub async fn attach_resume_file(
    pool: &PgPool,
    student_id: Uuid,
    object_key: &str,
    file_name: &str,
    resume_text: &str,
) -> Result<ResumeRow, AppError> {
    let resume = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (student_id, file_path, file_name, resume_text)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (student_id) DO UPDATE
        SET file_path = EXCLUDED.file_path,
            file_name = EXCLUDED.file_name,
            resume_text = EXCLUDED.resume_text,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(student_id)
    .bind(object_key)
    .bind(file_name)
    .bind(resume_text)
    .fetch_one(pool)
    .await?;

    info!(resume_id = %resume.id, %student_id, %object_key, "Attached resume PDF");
    Ok(resume)
}

pub async fn find_resume_detail(
    pool: &PgPool,
    student_id: Uuid,
) -> Result<Option<ResumeDetailRow>, AppError> {
    Ok(sqlx::query_as::<_, ResumeDetailRow>(
        r#"
        SELECT r.*, u.full_name AS student_name, u.email AS student_email
        FROM resumes r
        JOIN users u ON u.id = r.student_id
        WHERE r.student_id = $1
        "#,
    )
    .bind(student_id)
    .fetch_optional(pool)
    .await?)
}

/// The student's declared skills, or `None` when they have no résumé.
pub async fn find_resume_skills(
    pool: &PgPool,
    student_id: Uuid,
) -> Result<Option<Vec<String>>, AppError> {
    Ok(
        sqlx::query_scalar::<_, Vec<String>>("SELECT skills FROM resumes WHERE student_id = $1")
            .bind(student_id)
            .fetch_optional(pool)
            .await?,
    )
}
