use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::matching::scoring::MatchScorer;
use crate::resume::pipeline::ResumeParser;
use crate::storage::ObjectStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub store: ObjectStore,
    pub config: Config,
    /// PDF extractor + skill vocabulary, built once at startup.
    pub resume_parser: ResumeParser,
    /// Pluggable match scorer. Default: SkillOverlapScorer.
    pub match_scorer: Arc<dyn MatchScorer>,
}
