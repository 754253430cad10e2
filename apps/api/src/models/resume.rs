use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub file_path: Option<String>,
    pub file_name: Option<String>,
    pub summary: Option<String>,
    pub education: Option<Value>,
    pub skills: Vec<String>,
    pub experience: Option<Value>,
    pub projects: Option<Value>,
    pub resume_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ResumeDetailRow {
    #[sqlx(flatten)]
    pub resume: ResumeRow,
    pub student_name: String,
    pub student_email: String,
}
