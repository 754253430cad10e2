use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::auth::JwtKeys;
use crate::config::Config;
use crate::keywords::KeywordExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Object storage for uploaded résumé PDFs.
    pub s3: S3Client,
    pub config: Config,
    pub jwt: JwtKeys,
    /// Pluggable keyword extractor for job search. LLM-backed when an API key is set.
    pub keyword_extractor: Arc<dyn KeywordExtractor>,
}
