mod applications;
mod auth;
mod config;
mod db;
mod errors;
mod interviews;
mod jobs;
mod keywords;
mod llm_client;
mod matching;
mod models;
mod resumes;
mod routes;
mod state;
mod stats;
mod users;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::JwtKeys;
use crate::config::Config;
use crate::db::create_pool;
use crate::keywords::{KeywordExtractor, LlmKeywordExtractor, StopWordExtractor};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting IntelliHire API v{}", env!("CARGO_PKG_VERSION"));

    // Applies pending migrations before serving
    let db = create_pool(&config.database_url).await?;

    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    let keyword_extractor = build_keyword_extractor(&config)?;

    let jwt = JwtKeys::new(&config.jwt_secret, config.jwt_ttl_hours);

    let state = AppState {
        db,
        s3,
        config: config.clone(),
        jwt,
        keyword_extractor,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// LLM-backed when `GEMINI_API_KEY` is set, stop words otherwise.
fn build_keyword_extractor(config: &Config) -> Result<Arc<dyn KeywordExtractor>> {
    let Some(key) = &config.gemini_api_key else {
        info!("GEMINI_API_KEY not set, using stop-word keyword extraction");
        return Ok(Arc::new(StopWordExtractor));
    };

    let llm = LlmClient::new(config.gemini_api_url.clone(), key.clone())
        .context("Failed to build Gemini client")?;
    info!("LLM keyword extraction enabled");
    Ok(Arc::new(LlmKeywordExtractor::new(llm)))
}

/// Restricts CORS to `CORS_ORIGIN` when set, permissive otherwise.
fn build_cors(config: &Config) -> Result<CorsLayer> {
    match &config.cors_origin {
        Some(origin) => {
            let origin = HeaderValue::from_str(origin)
                .with_context(|| format!("CORS_ORIGIN '{origin}' is not a valid header value"))?;
            info!("CORS restricted to {:?}", origin);
            Ok(CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any))
        }
        None => Ok(CorsLayer::permissive()),
    }
}

/// Path-style addressing keeps MinIO endpoints working.
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "intellihire-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&s3_config)
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
