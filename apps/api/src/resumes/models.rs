use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::resume::ResumeDetailRow;

/// Form fields of a résumé. Structured sections are free-form JSON documents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRequest {
    pub summary: Option<String>,
    pub education: Option<Value>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<Value>,
    pub projects: Option<Value>,
}

impl ResumeRequest {
    /// Trimmed, non-blank skills in submission order, without duplicates.
    pub fn cleaned_skills(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.skills
            .iter()
            .flatten()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.to_lowercase()))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub student_email: String,
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

impl From<ResumeDetailRow> for ResumeResponse {
    fn from(row: ResumeDetailRow) -> Self {
        let resume = row.resume;
        Self {
            id: resume.id,
            student_id: resume.student_id,
            student_name: row.student_name,
            student_email: row.student_email,
            file_path: resume.file_path,
            file_name: resume.file_name,
            summary: resume.summary,
            education: resume.education,
            skills: resume.skills,
            experience: resume.experience,
            projects: resume.projects,
            resume_text: resume.resume_text,
            created_at: resume.created_at,
            updated_at: resume.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cleaned_skills_trims_and_dedupes() {
        let req = ResumeRequest {
            skills: Some(vec![
                " Rust ".to_string(),
                "rust".to_string(),
                "".to_string(),
                "SQL".to_string(),
            ]),
            ..Default::default()
        };
        assert_eq!(req.cleaned_skills(), vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_cleaned_skills_when_absent() {
        assert!(ResumeRequest::default().cleaned_skills().is_empty());
    }

    #[test]
    fn test_request_accepts_structured_and_string_sections() {
        let req: ResumeRequest = serde_json::from_value(json!({
            "summary": "CS student",
            "education": [{"school": "MIT", "degree": "BSc"}],
            "experience": "[{\"company\":\"Acme\"}]",
            "skills": ["Go"]
        }))
        .unwrap();
        assert!(req.education.unwrap().is_array());
        assert!(req.experience.unwrap().is_string());
        assert!(req.projects.is_none());
    }
}
