//! Axum route handlers for the Applications API.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::applications::models::{
    score_for_application, ApplicationRequest, ApplicationResponse, StatusUpdateRequest,
};
use crate::applications::service;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::interviews::service::{find_for_application, find_for_applications};
use crate::jobs::service::{find_job, find_owned_job};
use crate::matching::{compute_skill_match, MatchReport};
use crate::models::application::{ApplicationDetailRow, ApplicationStatus};
use crate::models::job::JobStatus;
use crate::models::user::Role;
use crate::resumes::service::find_resume_skills;
use crate::state::AppState;

/// POST /api/applications/jobs/:jobId
pub async fn handle_apply(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
    Json(request): Json<ApplicationRequest>,
) -> Result<Json<ApplicationResponse>, AppError> {
    user.require(Role::Student)?;

    let cover_letter = request.cover_letter.trim();
    if cover_letter.is_empty() {
        return Err(AppError::Validation("Cover letter is required".to_string()));
    }

    let job = find_job(&state.db, job_id).await?;
    if job.status()? != JobStatus::Active {
        return Err(AppError::Validation(
            "This job is not currently accepting applications".to_string(),
        ));
    }

    let resume_skills = find_resume_skills(&state.db, user.id).await?;
    let score = score_for_application(resume_skills.as_deref(), &job.required_skills);

    let application =
        service::create_application(&state.db, user.id, job_id, cover_letter, score).await?;
    let detail = service::find_application_detail(&state.db, application.id).await?;

    ApplicationResponse::from_detail(detail, None).map(Json)
}

/// GET /api/applications/me
pub async fn handle_my_applications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ApplicationResponse>>, AppError> {
    user.require(Role::Student)?;

    let rows = service::list_student_applications(&state.db, user.id).await?;
    with_interviews(&state, rows).await.map(Json)
}

/// GET /api/applications/job/:jobId
pub async fn handle_job_applications(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationResponse>>, AppError> {
    user.require(Role::Recruiter)?;

    find_owned_job(&state.db, job_id, user.id).await?;
    let rows = service::list_job_applications(&state.db, job_id).await?;
    with_interviews(&state, rows).await.map(Json)
}

/// PUT /api/applications/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(application_id): Path<Uuid>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<ApplicationResponse>, AppError> {
    user.require(Role::Recruiter)?;
    let status: ApplicationStatus = request.status.parse()?;

    service::find_owned_application(&state.db, application_id, user.id).await?;
    service::update_status(
        &state.db,
        application_id,
        status,
        request.recruiter_notes.as_deref(),
    )
    .await?;

    let detail = service::find_application_detail(&state.db, application_id).await?;
    let interview = find_for_application(&state.db, application_id).await?;
    ApplicationResponse::from_detail(detail, interview).map(Json)
}

/// GET /api/applications/:id/match
///
/// Recomputes the applicant's coverage against the job's current skills.
pub async fn handle_application_match(
    State(state): State<AppState>,
    user: AuthUser,
    Path(application_id): Path<Uuid>,
) -> Result<Json<MatchReport>, AppError> {
    user.require(Role::Recruiter)?;

    let application =
        service::find_owned_application(&state.db, application_id, user.id).await?;
    let job = find_job(&state.db, application.application.job_id).await?;

    let skills = find_resume_skills(&state.db, application.application.student_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Applicant has no resume".to_string()))?;

    Ok(Json(compute_skill_match(&skills, &job.required_skills)))
}

async fn with_interviews(
    state: &AppState,
    rows: Vec<ApplicationDetailRow>,
) -> Result<Vec<ApplicationResponse>, AppError> {
    let ids: Vec<Uuid> = rows.iter().map(|row| row.application.id).collect();
    let mut interviews: HashMap<Uuid, _> = find_for_applications(&state.db, &ids)
        .await?
        .into_iter()
        .map(|detail| (detail.interview.application_id, detail))
        .collect();

    rows.into_iter()
        .map(|row| {
            let interview = interviews.remove(&row.application.id);
            ApplicationResponse::from_detail(row, interview)
        })
        .collect()
}
