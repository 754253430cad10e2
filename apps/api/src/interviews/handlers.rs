//! Axum route handlers for the Interviews API.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::applications::service::{find_application_detail, find_owned_application};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::interviews::models::{InterviewInput, InterviewRequest, InterviewResponse};
use crate::interviews::service;
use crate::models::user::Role;
use crate::state::AppState;

/// POST /api/interviews
pub async fn handle_schedule_interview(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<InterviewRequest>,
) -> Result<Json<InterviewResponse>, AppError> {
    user.require(Role::Recruiter)?;
    let input = InterviewInput::try_from(request)?;

    find_owned_application(&state.db, input.application_id, user.id).await?;
    let interview = service::schedule_interview(&state.db, &input).await?;

    InterviewResponse::try_from(interview).map(Json)
}

/// GET /api/interviews/application/:id
///
/// Visible to the applying student and to the recruiter who owns the job.
pub async fn handle_application_interview(
    State(state): State<AppState>,
    user: AuthUser,
    Path(application_id): Path<Uuid>,
) -> Result<Json<InterviewResponse>, AppError> {
    let application = find_application_detail(&state.db, application_id).await?;

    let allowed = match user.role {
        Role::Student => application.application.student_id == user.id,
        Role::Recruiter => application.recruiter_id == user.id,
    };
    if !allowed {
        return Err(AppError::Forbidden(
            "You do not have access to this interview".to_string(),
        ));
    }

    service::find_for_application(&state.db, application_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Interview not found".to_string()))
        .and_then(InterviewResponse::try_from)
        .map(Json)
}

/// GET /api/interviews/me
pub async fn handle_my_interviews(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<InterviewResponse>>, AppError> {
    user.require(Role::Student)?;

    service::list_student_interviews(&state.db, user.id)
        .await?
        .into_iter()
        .map(InterviewResponse::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map(Json)
}

/// GET /api/interviews/recruiter
pub async fn handle_recruiter_interviews(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<InterviewResponse>>, AppError> {
    user.require(Role::Recruiter)?;

    service::list_recruiter_interviews(&state.db, user.id)
        .await?
        .into_iter()
        .map(InterviewResponse::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map(Json)
}
