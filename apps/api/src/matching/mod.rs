// Candidate/posting matching.
// Pure functions only: callers load skills from the database and pass them in.

pub mod skill_match;

pub use skill_match::{compute_skill_match, matching_score, MatchReport};
