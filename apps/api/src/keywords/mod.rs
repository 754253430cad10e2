//! Keyword extraction for free-text job search.
//!
//! `AppState` holds an `Arc<dyn KeywordExtractor>`. With an API key configured
//! the LLM-backed extractor is used; it degrades to the stop-word fallback on
//! any failure, so extraction itself never fails.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::llm_client::prompts::keyword_extraction_prompt;
use crate::llm_client::LlmClient;

pub mod stopwords;

pub use stopwords::extract_fallback_keywords;

#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    async fn extract(&self, query: &str) -> Vec<String>;
}

// ────────────────────────────────────────────────────────────────────────────
// StopWordExtractor: deterministic, no network
// ────────────────────────────────────────────────────────────────────────────

pub struct StopWordExtractor;

#[async_trait]
impl KeywordExtractor for StopWordExtractor {
    async fn extract(&self, query: &str) -> Vec<String> {
        extract_fallback_keywords(query)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmKeywordExtractor: generative text API with stop-word fallback
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmKeywordExtractor {
    llm: LlmClient,
}

impl LlmKeywordExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl KeywordExtractor for LlmKeywordExtractor {
    async fn extract(&self, query: &str) -> Vec<String> {
        if query.trim().is_empty() {
            return vec![];
        }

        let prompt = keyword_extraction_prompt(query);
        match self.llm.generate_text(&prompt).await {
            Ok(text) => {
                let keywords = parse_keyword_list(&text);
                if keywords.is_empty() {
                    warn!("LLM returned no keywords, using fallback");
                    return extract_fallback_keywords(query);
                }
                info!(?keywords, "LLM extracted keywords");
                keywords
            }
            Err(e) => {
                warn!(error = %e, "Keyword extraction failed, using fallback");
                extract_fallback_keywords(query)
            }
        }
    }
}

/// Parses a comma-separated model reply into trimmed, non-empty keywords.
pub fn parse_keyword_list(text: &str) -> Vec<String> {
    text.replace(['\n', '\r'], "")
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keyword_list_trims_and_drops_blanks() {
        let parsed = parse_keyword_list(" Rust , Tokio,, Berlin ,\n");
        assert_eq!(parsed, vec!["Rust", "Tokio", "Berlin"]);
    }

    #[test]
    fn test_parse_keyword_list_joins_wrapped_lines() {
        let parsed = parse_keyword_list("Java, Spring\n Boot, New York");
        assert_eq!(parsed, vec!["Java", "Spring Boot", "New York"]);
    }

    #[test]
    fn test_parse_keyword_list_empty() {
        assert!(parse_keyword_list("  \n ").is_empty());
    }

    #[tokio::test]
    async fn test_stop_word_extractor_uses_fallback() {
        let keywords = StopWordExtractor
            .extract("I am looking for a Rust job in Berlin")
            .await;
        assert_eq!(keywords, vec!["rust", "berlin"]);
    }

    #[tokio::test]
    async fn test_llm_extractor_falls_back_when_unreachable() {
        // Port 9 (discard) on localhost refuses connections; the extractor must
        // still answer from the fallback.
        let llm = LlmClient::new("http://127.0.0.1:9/generate".to_string(), "k".to_string())
            .unwrap();
        let keywords = LlmKeywordExtractor::new(llm)
            .extract("senior python developer")
            .await;
        assert_eq!(keywords, vec!["senior", "python", "developer"]);
    }

    #[tokio::test]
    async fn test_llm_extractor_skips_blank_query() {
        let llm = LlmClient::new("http://127.0.0.1:9/generate".to_string(), "k".to_string())
            .unwrap();
        assert!(LlmKeywordExtractor::new(llm).extract("   ").await.is_empty());
    }
}
