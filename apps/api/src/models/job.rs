use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::UnknownVariant;

/// Job posting lifecycle: DRAFT → ACTIVE → CLOSED.
/// Any state may be set from any other; only ACTIVE jobs are publicly listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    #[default]
    Draft,
    Active,
    Closed,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Draft => "DRAFT",
            JobStatus::Active => "ACTIVE",
            JobStatus::Closed => "CLOSED",
        }
    }

    pub fn is_public(self) -> bool {
        self == JobStatus::Active
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(JobStatus::Draft),
            "ACTIVE" => Ok(JobStatus::Active),
            "CLOSED" => Ok(JobStatus::Closed),
            _ => Err(UnknownVariant {
                kind: "job status",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub recruiter_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub company: Option<String>,
    pub status: String,
    pub required_skills: Vec<String>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRow {
    pub fn status(&self) -> Result<JobStatus, UnknownVariant> {
        self.status.parse()
    }
}

/// A job joined with its recruiter's email and application count.
#[derive(Debug, Clone, FromRow)]
pub struct JobListingRow {
    #[sqlx(flatten)]
    pub job: JobRow,
    pub recruiter_email: String,
    pub application_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_default_is_draft() {
        assert_eq!(JobStatus::default(), JobStatus::Draft);
    }

    #[test]
    fn test_only_active_is_public() {
        assert!(JobStatus::Active.is_public());
        assert!(!JobStatus::Draft.is_public());
        assert!(!JobStatus::Closed.is_public());
    }

    #[test]
    fn test_job_status_round_trips_through_text() {
        for status in [JobStatus::Draft, JobStatus::Active, JobStatus::Closed] {
            assert_eq!(status.as_str().parse::<JobStatus>().unwrap(), status);
        }
        assert_eq!("active".parse::<JobStatus>().unwrap(), JobStatus::Active);
    }

    #[test]
    fn test_job_status_rejects_unknown() {
        assert!("ARCHIVED".parse::<JobStatus>().is_err());
    }
}
