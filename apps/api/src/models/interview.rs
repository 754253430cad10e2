use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewMode {
    Online,
    Offline,
    Hybrid,
}

impl InterviewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            InterviewMode::Online => "ONLINE",
            InterviewMode::Offline => "OFFLINE",
            InterviewMode::Hybrid => "HYBRID",
        }
    }
}

impl fmt::Display for InterviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterviewMode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ONLINE" => Ok(InterviewMode::Online),
            "OFFLINE" => Ok(InterviewMode::Offline),
            "HYBRID" => Ok(InterviewMode::Hybrid),
            _ => Err(UnknownVariant {
                kind: "interview mode",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub application_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub mode: String,
    pub location: Option<String>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct InterviewDetailRow {
    #[sqlx(flatten)]
    pub interview: InterviewRow,
    pub job_title: String,
    pub student_name: String,
    pub student_email: String,
}
