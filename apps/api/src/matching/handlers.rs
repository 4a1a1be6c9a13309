//! Axum route handlers for the Matching API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::{require_applicant, require_owned_job};
use crate::applicants::repository::list_all_applicants;
use crate::auth::{AuthUser, Role};
use crate::errors::AppError;
use crate::jobs::repository::{list_all_jobs, list_jobs_by_company};
use crate::matching::scoring::{
    at_least, rank_jobs, rank_pairs, CandidateProfile, JobProfile, MatchResult,
};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MatchQuery {
    #[serde(default)]
    pub min_match_percentage: f64,
}

impl MatchQuery {
    pub fn threshold(&self) -> Result<f64, AppError> {
        let t = self.min_match_percentage;
        if !t.is_finite() || !(0.0..=100.0).contains(&t) {
            return Err(AppError::Validation(
                "min_match_percentage must be between 0 and 100".to_string(),
            ));
        }
        Ok(t)
    }
}

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchResult>,
    pub scorer_backend: String,
}

/// GET /api/v1/matching/jobs/:id/candidates
///
/// Ranked applicants for one of the caller's jobs.
pub async fn handle_job_candidates(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<MatchListResponse>, AppError> {
    user.require(Role::Company)?;
    let threshold = query.threshold()?;

    let job = require_owned_job(&state.db, &user, job_id).await?;
    let candidates: Vec<CandidateProfile> = list_all_applicants(&state.db)
        .await?
        .iter()
        .map(CandidateProfile::from)
        .collect();

    let results = state
        .match_scorer
        .score(&JobProfile::from(&job), &candidates)
        .await?;

    Ok(Json(MatchListResponse {
        matches: at_least(results, threshold),
        scorer_backend: state.match_scorer.backend().to_string(),
    }))
}

/// GET /api/v1/matching/applicants/:id/matches
///
/// Jobs ranked for one applicant. Visible to companies and to the applicant.
pub async fn handle_applicant_matches(
    State(state): State<AppState>,
    user: AuthUser,
    Path(applicant_id): Path<Uuid>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<MatchListResponse>, AppError> {
    let threshold = query.threshold()?;

    let applicant = require_applicant(&state.db, applicant_id).await?;
    if user.role == Role::Applicant && applicant.user_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    let candidate = [CandidateProfile::from(&applicant)];
    let mut results = Vec::new();
    for job in list_all_jobs(&state.db).await? {
        results.extend(
            state
                .match_scorer
                .score(&JobProfile::from(&job), &candidate)
                .await?,
        );
    }
    rank_jobs(&mut results);

    Ok(Json(MatchListResponse {
        matches: at_least(results, threshold),
        scorer_backend: state.match_scorer.backend().to_string(),
    }))
}

/// GET /api/v1/matching/matches?min_match_percentage=
///
/// Every (applicant, job) pair across the caller's jobs at or above the threshold.
pub async fn handle_company_matches(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<MatchQuery>,
) -> Result<Json<Vec<MatchResult>>, AppError> {
    user.require(Role::Company)?;
    let threshold = query.threshold()?;

    let jobs = list_jobs_by_company(&state.db, user.user_id).await?;
    let candidates: Vec<CandidateProfile> = list_all_applicants(&state.db)
        .await?
        .iter()
        .map(CandidateProfile::from)
        .collect();

    let mut results = Vec::new();
    for job in &jobs {
        let scored = state
            .match_scorer
            .score(&JobProfile::from(job), &candidates)
            .await?;
        results.extend(at_least(scored, threshold));
    }
    rank_pairs(&mut results);

    Ok(Json(results))
}
