use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::interview::{InterviewDetailRow, InterviewMode};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRequest {
    pub application_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub mode: String,
    pub location: Option<String>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterviewInput {
    pub application_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub mode: InterviewMode,
    pub location: Option<String>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
}

impl TryFrom<InterviewRequest> for InterviewInput {
    type Error = AppError;

    fn try_from(request: InterviewRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            application_id: request.application_id,
            scheduled_at: request.scheduled_at,
            mode: request.mode.parse()?,
            location: non_blank(request.location),
            meeting_link: non_blank(request.meeting_link),
            notes: non_blank(request.notes),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewResponse {
    pub id: Uuid,
    pub application_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub mode: InterviewMode,
    pub location: Option<String>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    pub job_title: String,
    pub student_name: String,
    pub student_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<InterviewDetailRow> for InterviewResponse {
    type Error = AppError;

    fn try_from(row: InterviewDetailRow) -> Result<Self, Self::Error> {
        let interview = row.interview;
        Ok(Self {
            id: interview.id,
            application_id: interview.application_id,
            scheduled_at: interview.scheduled_at,
            mode: interview.mode.parse()?,
            location: interview.location,
            meeting_link: interview.meeting_link,
            notes: interview.notes,
            job_title: row.job_title,
            student_name: row.student_name,
            student_email: row.student_email,
            created_at: interview.created_at,
            updated_at: interview.updated_at,
        })
    }
}
