use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobListingRow, JobRow, JobStatus};

const SALARY_SCALE: u32 = 2;

fn max_salary_exclusive() -> Decimal {
    Decimal::from(10_000_000_000i64)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub company: Option<String>,
    /// DRAFT, ACTIVE or CLOSED (any case). Omitted → DRAFT on create, unchanged on update.
    pub status: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
}

/// A validated, trimmed `JobRequest` ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct JobInput {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub company: Option<String>,
    pub status: Option<JobStatus>,
    pub required_skills: Vec<String>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
}

impl TryFrom<JobRequest> for JobInput {
    type Error = AppError;

    fn try_from(request: JobRequest) -> Result<Self, Self::Error> {
        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::Validation("Job title is required".to_string()));
        }
        let description = request.description.trim().to_string();
        if description.is_empty() {
            return Err(AppError::Validation("Job description is required".to_string()));
        }

        if let (Some(min), Some(max)) = (request.salary_min, request.salary_max) {
            if min > max {
                return Err(AppError::Validation(
                    "salaryMin cannot exceed salaryMax".to_string(),
                ));
            }
        }
        for salary in [request.salary_min, request.salary_max].into_iter().flatten() {
            if salary.is_sign_negative() {
                return Err(AppError::Validation("Salary cannot be negative".to_string()));
            }
            // NUMERIC(12, 2): ten integer digits, two decimals
            if salary.normalize().scale() > SALARY_SCALE || salary >= max_salary_exclusive() {
                return Err(AppError::Validation(
                    "Salary must be below 10,000,000,000 with at most 2 decimal places"
                        .to_string(),
                ));
            }
        }

        let status = request
            .status
            .as_deref()
            .map(str::parse::<JobStatus>)
            .transpose()?;

        let required_skills = request
            .required_skills
            .unwrap_or_default()
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(JobInput {
            title,
            description,
            location: non_blank(request.location),
            company: non_blank(request.company),
            status,
            required_skills,
            salary_min: request.salary_min,
            salary_max: request.salary_max,
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
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub company: Option<String>,
    pub status: JobStatus,
    pub required_skills: Vec<String>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub recruiter_email: String,
    pub recruiter_id: Uuid,
    /// Only populated on recruiter views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_count: Option<i64>,
}

impl JobResponse {
    pub fn from_row(
        job: JobRow,
        recruiter_email: String,
        application_count: Option<i64>,
    ) -> Result<Self, AppError> {
        let status = job.status()?;
        Ok(Self {
            id: job.id,
            title: job.title,
            description: job.description,
            location: job.location,
            company: job.company,
            status,
            required_skills: job.required_skills,
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            created_at: job.created_at,
            updated_at: job.updated_at,
            recruiter_email,
            recruiter_id: job.recruiter_id,
            application_count,
        })
    }

    pub fn from_listing(row: JobListingRow, include_stats: bool) -> Result<Self, AppError> {
        let count = include_stats.then_some(row.application_count);
        Self::from_row(row.job, row.recruiter_email, count)
    }
}
