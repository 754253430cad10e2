use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interviews::models::InterviewResponse;
use crate::matching::matching_score;
use crate::models::application::{ApplicationDetailRow, ApplicationStatus};
use crate::models::interview::InterviewDetailRow;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub cover_letter: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub status: String,
    /// Replaces the stored notes only when present.
    pub recruiter_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub status: ApplicationStatus,
    pub matching_score: i32,
    pub cover_letter: String,
    pub recruiter_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub student_id: Uuid,
    pub student_name: String,
    pub student_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview: Option<InterviewResponse>,
}

impl ApplicationResponse {
    pub fn from_detail(
        row: ApplicationDetailRow,
        interview: Option<InterviewDetailRow>,
    ) -> Result<Self, AppError> {
        let app = row.application;
        Ok(Self {
            id: app.id,
            job_id: app.job_id,
            job_title: row.job_title,
            company: row.company,
            location: row.location,
            status: app.status.parse()?,
            matching_score: app.matching_score,
            cover_letter: app.cover_letter,
            recruiter_notes: app.recruiter_notes,
            created_at: app.created_at,
            updated_at: app.updated_at,
            student_id: app.student_id,
            student_name: row.student_name,
            student_email: row.student_email,
            interview: interview.map(InterviewResponse::try_from).transpose()?,
        })
    }
}

/// Score stored on a new application. Students without a résumé, and jobs
/// without required skills, get 0 rather than the neutral matching default.
pub fn score_for_application(resume_skills: Option<&[String]>, required_skills: &[String]) -> i32 {
    match resume_skills {
        Some(skills) if !required_skills.is_empty() => {
            i32::from(matching_score(skills, required_skills))
        }
        _ => 0,
    }
}
