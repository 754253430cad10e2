//! Client for the Gemini `generateContent` API.
//!
//! Keyword extraction reaches the external model only through
//! `LlmClient::generate_text`.
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Search requests wait on this client, so retries stay short.
const MAX_ATTEMPTS: u32 = 2;
const BACKOFF_BASE_MS: u64 = 250;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

enum Attempt {
    Retryable(LlmError),
    Fatal(LlmError),
}

/// Final error once retries run out. A trailing 429 is reported as rate limiting.
fn exhausted(last_error: Option<LlmError>, attempts: u32) -> LlmError {
    match last_error {
        Some(LlmError::Api { status: 429, .. }) | None => LlmError::RateLimited { attempts },
        Some(e) => e,
    }
}

/// Delay before the attempt following `attempt` (1-based).
fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(BACKOFF_BASE_MS << (attempt - 1))
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Extracts the text of the first part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Wraps the Gemini `generateContent` endpoint with retry logic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_url: String, api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_url,
            api_key,
        })
    }

    /// Sends a single-turn prompt, returning the full response object.
    /// 429s, 5xx responses and transport failures are retried with exponential
    /// backoff; other error statuses fail immediately.
    pub async fn call(&self, prompt: &str) -> Result<GenerateResponse, LlmError> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let mut last_error = None;
        for attempt in 1..=MAX_ATTEMPTS {
            match self.send_once(&body).await {
                Ok(response) => {
                    debug!(attempt, candidates = response.candidates.len(), "Gemini call succeeded");
                    return Ok(response);
                }
                Err(Attempt::Fatal(e)) => return Err(e),
                Err(Attempt::Retryable(e)) => {
                    warn!(attempt, error = %e, "Gemini call failed");
                    last_error = Some(e);
                    if attempt < MAX_ATTEMPTS {
                        tokio::time::sleep(backoff(attempt)).await;
                    }
                }
            }
        }

        Err(exhausted(last_error, MAX_ATTEMPTS))
    }

    async fn send_once(&self, body: &GenerateRequest<'_>) -> Result<GenerateResponse, Attempt> {
        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| Attempt::Retryable(LlmError::Http(e)))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<GenerateResponse>()
                .await
                .map_err(|e| Attempt::Fatal(LlmError::Http(e)));
        }

        let raw = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorEnvelope>(&raw)
            .map(|envelope| envelope.error.message)
            .unwrap_or(raw);
        let error = LlmError::Api {
            status: status.as_u16(),
            message,
        };

        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            Err(Attempt::Retryable(error))
        } else {
            Err(Attempt::Fatal(error))
        }
    }

    /// Calls the API and returns the first candidate's text.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt).await?;
        response
            .text()
            .map(str::to_string)
            .filter(|t| !t.trim().is_empty())
            .ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_reads_first_candidate() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Rust, Tokio, Berlin"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text(), Some("Rust, Tokio, Berlin"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.text().is_none());
    }

    #[test]
    fn test_blocked_candidate_has_no_text() {
        let json = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.text().is_none());
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: "hello" }],
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(backoff(1), Duration::from_millis(BACKOFF_BASE_MS));
        assert_eq!(backoff(2), Duration::from_millis(BACKOFF_BASE_MS * 2));
        assert_eq!(backoff(3), Duration::from_millis(BACKOFF_BASE_MS * 4));
    }

    #[test]
    fn test_exhausted_429_is_rate_limited() {
        let last = LlmError::Api {
            status: 429,
            message: "quota".to_string(),
        };
        assert!(matches!(
            exhausted(Some(last), 2),
            LlmError::RateLimited { attempts: 2 }
        ));
    }

    #[test]
    fn test_exhausted_server_error_is_kept() {
        let last = LlmError::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(matches!(
            exhausted(Some(last), 2),
            LlmError::Api { status: 503, .. }
        ));
    }
}
