use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::UnknownVariant;

/// Application lifecycle: APPLIED → SHORTLISTED → INTERVIEW → SELECTED / REJECTED.
/// Recruiters set the status directly; there is no transition-legality check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Shortlisted,
    Interview,
    Selected,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Interview,
        ApplicationStatus::Selected,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "APPLIED",
            ApplicationStatus::Shortlisted => "SHORTLISTED",
            ApplicationStatus::Interview => "INTERVIEW",
            ApplicationStatus::Selected => "SELECTED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == upper)
            .ok_or_else(|| UnknownVariant {
                kind: "application status",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub job_id: Uuid,
    pub cover_letter: String,
    pub status: String,
    pub matching_score: i32,
    pub recruiter_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An application joined with the job and student columns shown in listings.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationDetailRow {
    #[sqlx(flatten)]
    pub application: ApplicationRow,
    pub job_title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub recruiter_id: Uuid,
    pub student_name: String,
    pub student_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_status_parses_from_its_name() {
        for status in ApplicationStatus::ALL {
            assert_eq!(status.as_str().parse::<ApplicationStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(
            "shortlisted".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Shortlisted
        );
        assert_eq!(
            "  Rejected".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Rejected
        );
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        let err = "HIRED".parse::<ApplicationStatus>().unwrap_err();
        assert!(err.to_string().contains("HIRED"));
    }

    #[test]
    fn test_new_applications_start_applied() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Applied);
    }
}
