use std::collections::HashSet;
use std::sync::OnceLock;

/// English stop words plus job-search filler ("looking", "job", "role", ...).
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "should", "now", "want", "looking", "job", "jobs", "role", "roles", "work",
    "position", "opening", "openings",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// Deterministic keyword extraction used when the LLM is unavailable.
///
/// Lower-cases, strips everything except ASCII letters, digits and whitespace,
/// then drops stop words and single-character tokens. Order is preserved.
pub fn extract_fallback_keywords(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_ascii_whitespace())
        .collect();

    let stop = stop_words();
    cleaned
        .split_ascii_whitespace()
        .filter(|w| w.len() > 1 && !stop.contains(w))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_stop_words_and_filler() {
        let keywords = extract_fallback_keywords("I want a remote Java position with Spring");
        assert_eq!(keywords, vec!["remote", "java", "spring"]);
    }

    #[test]
    fn test_strips_punctuation() {
        let keywords = extract_fallback_keywords("C++, Node.js & React!");
        // "c++" collapses to "c", which is too short to keep
        assert_eq!(keywords, vec!["nodejs", "react"]);
    }

    #[test]
    fn test_drops_non_ascii_letters() {
        assert_eq!(extract_fallback_keywords("café devops"), vec!["caf", "devops"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_fallback_keywords("").is_empty());
        assert!(extract_fallback_keywords("   ").is_empty());
    }

    #[test]
    fn test_only_stop_words_yields_nothing() {
        assert!(extract_fallback_keywords("looking for jobs in the").is_empty());
    }

    #[test]
    fn test_keeps_digits() {
        assert_eq!(extract_fallback_keywords("web3 jobs 2024"), vec!["web3", "2024"]);
    }
}
