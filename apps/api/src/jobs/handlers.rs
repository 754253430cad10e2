//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::jobs::models::{JobInput, JobRequest, JobResponse};
use crate::jobs::search::job_matches_keywords;
use crate::jobs::service;
use crate::matching::{compute_skill_match, MatchReport};
use crate::models::user::Role;
use crate::resumes::service::find_resume_skills;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobSearchQuery {
    pub query: Option<String>,
}

/// GET /api/jobs
///
/// Public listing of ACTIVE jobs. A non-blank `query` is turned into keywords
/// by the configured extractor and used to filter the listing.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobSearchQuery>,
) -> Result<Json<Vec<JobResponse>>, AppError> {
    let mut jobs = service::list_active_jobs(&state.db).await?;

    if let Some(query) = params.query.as_deref().filter(|q| !q.trim().is_empty()) {
        let keywords = state.keyword_extractor.extract(query).await;
        info!(%query, ?keywords, "Searching jobs");
        jobs.retain(|row| job_matches_keywords(&row.job, &keywords));
    }

    jobs.into_iter()
        .map(|row| JobResponse::from_listing(row, false))
        .collect::<Result<Vec<_>, _>>()
        .map(Json)
}

/// GET /api/jobs/me
pub async fn handle_my_jobs(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<JobResponse>>, AppError> {
    user.require(Role::Recruiter)?;

    service::list_recruiter_jobs(&state.db, user.id)
        .await?
        .into_iter()
        .map(|row| JobResponse::from_listing(row, true))
        .collect::<Result<Vec<_>, _>>()
        .map(Json)
}

/// GET /api/jobs/:id
///
/// Non-ACTIVE jobs are only visible to the recruiter who posted them.
pub async fn handle_get_job(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobResponse>, AppError> {
    let row = service::find_job_listing(&state.db, job_id).await?;
    let is_owner = user.is_some_and(|u| u.id == row.job.recruiter_id);

    if !is_owner && !row.job.status()?.is_public() {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }

    JobResponse::from_listing(row, is_owner).map(Json)
}

/// GET /api/jobs/:id/match
///
/// Previews the caller's résumé coverage of the job before applying.
pub async fn handle_job_match(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<MatchReport>, AppError> {
    user.require(Role::Student)?;

    let job = service::find_job(&state.db, job_id).await?;
    if !job.status()?.is_public() {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }

    let skills = find_resume_skills(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found. Please create one first.".to_string()))?;

    Ok(Json(compute_skill_match(&skills, &job.required_skills)))
}

/// POST /api/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<JobRequest>,
) -> Result<Json<JobResponse>, AppError> {
    user.require(Role::Recruiter)?;
    let input = JobInput::try_from(request)?;

    let job = service::create_job(&state.db, user.id, &input).await?;
    JobResponse::from_row(job, user.email, None).map(Json)
}

/// PUT /api/jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
    Json(request): Json<JobRequest>,
) -> Result<Json<JobResponse>, AppError> {
    user.require(Role::Recruiter)?;
    let input = JobInput::try_from(request)?;

    service::find_owned_job(&state.db, job_id, user.id).await?;
    service::update_job(&state.db, job_id, &input).await?;

    let row = service::find_job_listing(&state.db, job_id).await?;
    JobResponse::from_listing(row, true).map(Json)
}

/// DELETE /api/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    user.require(Role::Recruiter)?;

    service::find_owned_job(&state.db, job_id, user.id).await?;
    service::delete_job(&state.db, job_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
