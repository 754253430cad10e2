use crate::models::job::JobRow;

/// True when any keyword occurs (case-insensitively) in the job's title,
/// description, company or location, or equals one of its required skills.
/// An empty keyword list matches every job.
pub fn job_matches_keywords<K: AsRef<str>>(job: &JobRow, keywords: &[K]) -> bool {
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        return true;
    }

    let haystacks: Vec<String> = [
        Some(job.title.as_str()),
        Some(job.description.as_str()),
        job.company.as_deref(),
        job.location.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::to_lowercase)
    .collect();

    let skills: Vec<String> = job
        .required_skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();

    keywords.iter().any(|kw| {
        haystacks.iter().any(|text| text.contains(kw.as_str())) || skills.iter().any(|s| s == kw)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn job(title: &str, description: &str, skills: &[&str]) -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            recruiter_id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            location: Some("Berlin".to_string()),
            company: Some("Acme Corp".to_string()),
            status: "ACTIVE".to_string(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            salary_min: None,
            salary_max: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_keywords_match_everything() {
        let keywords: [&str; 0] = [];
        assert!(job_matches_keywords(&job("A", "B", &[]), &keywords));
        assert!(job_matches_keywords(&job("A", "B", &[]), &["  "]));
    }

    #[test]
    fn test_title_match_is_case_insensitive() {
        assert!(job_matches_keywords(&job("Senior Rust Engineer", "x", &[]), &["RUST"]));
    }

    #[test]
    fn test_location_and_company_match() {
        let j = job("Engineer", "x", &[]);
        assert!(job_matches_keywords(&j, &["berlin"]));
        assert!(job_matches_keywords(&j, &["acme"]));
    }

    #[test]
    fn test_skill_must_match_exactly() {
        let j = job("Engineer", "x", &["Spring Boot"]);
        assert!(job_matches_keywords(&j, &["spring boot"]));
        assert!(!job_matches_keywords(&j, &["spring"]));
    }

    #[test]
    fn test_any_keyword_suffices() {
        let j = job("Data Analyst", "SQL dashboards", &[]);
        assert!(job_matches_keywords(&j, &["kotlin", "dashboards"]));
        assert!(!job_matches_keywords(&j, &["kotlin", "swift"]));
    }
}
