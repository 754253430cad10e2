//! Skill coverage of a job's required-skill list by a candidate.
//!
//! Both lists are normalized to lower-case trimmed sets before comparison, so
//! "Rust ", "rust" and "RUST" count once.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Score returned when the job lists no required skills.
pub const DEFAULT_SCORE: u8 = 50;

/// Breakdown of a candidate's coverage of a job's required skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub score: u8, // 0..=100
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Core algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Scores `candidate_skills` against `required_skills`.
///
/// Algorithm:
/// 1. Normalize both lists to lower-case trimmed sets
/// 2. Empty required set → `DEFAULT_SCORE`
/// 3. score = round(100 × |C ∩ R| / |R|), clamped to 0..=100
pub fn compute_skill_match<C, R>(candidate_skills: &[C], required_skills: &[R]) -> MatchReport
where
    C: AsRef<str>,
    R: AsRef<str>,
{
    let candidate = normalize(candidate_skills);
    let required = normalize(required_skills);

    if required.is_empty() {
        return MatchReport {
            score: DEFAULT_SCORE,
            matched_skills: vec![],
            missing_skills: vec![],
        };
    }

    let (matched, missing): (Vec<String>, Vec<String>) = required
        .into_iter()
        .partition(|skill| candidate.contains(skill));

    let total = matched.len() + missing.len();
    let ratio = matched.len() as f64 / total as f64;
    let score = (ratio * 100.0).round().clamp(0.0, 100.0) as u8;

    MatchReport {
        score,
        matched_skills: matched,
        missing_skills: missing,
    }
}

/// The integer score alone.
pub fn matching_score<C, R>(candidate_skills: &[C], required_skills: &[R]) -> u8
where
    C: AsRef<str>,
    R: AsRef<str>,
{
    compute_skill_match(candidate_skills, required_skills).score
}

fn normalize<S: AsRef<str>>(skills: &[S]) -> BTreeSet<String> {
    skills
        .iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
