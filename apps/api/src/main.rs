mod access;
mod applicants;
mod auth;
mod config;
mod db;
mod errors;
mod interviews;
mod jobs;
mod matching;
mod models;
mod offers;
mod resume;
mod routes;
mod state;
mod storage;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::matching::scoring::{MatchScorer, SkillOverlapScorer};
use crate::resume::extract::PdfTextExtractor;
use crate::resume::pipeline::ResumeParser;
use crate::resume::skills::SkillExtractor;
use crate::resume::vocabulary::SkillVocabulary;
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;
use crate::storage::{build_s3_client, ObjectStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Recruit API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;

    let s3 = build_s3_client(&config).await;
    let store = ObjectStore::new(s3, config.s3_bucket.clone());
    info!("S3 client initialized (bucket: {})", store.bucket());

    let vocabulary = Arc::new(SkillVocabulary::default());
    let skills = SkillExtractor::new(vocabulary, config.skill_match_mode)
        .context("failed to build skill matcher")?;
    info!(
        "Skill extractor ready: {} terms, {} matching",
        skills.vocabulary().len(),
        skills.mode()
    );
    let resume_parser = ResumeParser::new(Arc::new(PdfTextExtractor), Arc::new(skills));

    let match_scorer: Arc<dyn MatchScorer> = Arc::new(SkillOverlapScorer);
    info!("Match scorer: {}", match_scorer.backend());

    let cors = cors_layer(&config)?;
    let state = AppState {
        db,
        store,
        config: config.clone(),
        resume_parser,
        match_scorer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
