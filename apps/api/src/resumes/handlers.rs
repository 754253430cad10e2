//! Axum route handlers for the Resumes API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::user::Role;
use crate::resumes::models::{ResumeRequest, ResumeResponse};
use crate::resumes::{service, storage};
use crate::state::AppState;

/// Largest accepted résumé upload.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const FILE_FIELD: &str = "file";

struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    data: Bytes,
}

/// POST /api/resumes
pub async fn handle_save_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<ResumeResponse>, AppError> {
    user.require(Role::Student)?;

    service::upsert_resume_form(&state.db, user.id, &request).await?;
    load_resume(&state, user.id).await.map(Json)
}

/// POST /api/resumes/upload
///
/// Accepts a multipart body with a single PDF in the `file` field. The PDF is
/// parsed before it is stored, so unreadable files never reach the bucket.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<Json<ResumeResponse>, AppError> {
    user.require(Role::Student)?;

    let upload = read_file_field(multipart).await?;
    storage::validate_pdf_upload(upload.content_type.as_deref(), &upload.data)?;

    let text = storage::extract_pdf_text(upload.data.clone()).await?;
    info!(
        student_id = %user.id,
        file_name = %upload.file_name,
        text_chars = text.len(),
        "Extracted resume text"
    );

    let key =
        storage::upload_resume_pdf(&state.s3, &state.config.s3_bucket, user.id, upload.data)
            .await?;
    service::attach_resume_file(&state.db, user.id, &key, &upload.file_name, &text).await?;

    load_resume(&state, user.id).await.map(Json)
}

/// GET /api/resumes/me
pub async fn handle_my_resume(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ResumeResponse>, AppError> {
    user.require(Role::Student)?;
    load_resume(&state, user.id).await.map(Json)
}

/// GET /api/resumes/student/:studentId
pub async fn handle_student_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(student_id): Path<Uuid>,
) -> Result<Json<ResumeResponse>, AppError> {
    user.require(Role::Recruiter)?;
    load_resume(&state, student_id).await.map(Json)
}

async fn load_resume(state: &AppState, student_id: Uuid) -> Result<ResumeResponse, AppError> {
    service::find_resume_detail(&state.db, student_id)
        .await?
        .map(ResumeResponse::from)
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))
}

async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("resume.pdf")
            .to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        return Ok(UploadedFile {
            file_name,
            content_type,
            data,
        });
    }

    Err(AppError::Validation(
        "Missing 'file' field in upload".to_string(),
    ))
}
