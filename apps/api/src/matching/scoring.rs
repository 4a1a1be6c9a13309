//! Match scoring: pluggable, trait-based scorer that measures applicants vs a job.
//!
//! Default: `SkillOverlapScorer` (required-skill overlap, deterministic ranking).
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`, so the handlers never depend on the
//! scoring formula.

use std::cmp::Ordering;
use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::applicant::ApplicantRow;
use crate::models::job::JobRow;

// ────────────────────────────────────────────────────────────────────────────
// Inputs / outputs
// ────────────────────────────────────────────────────────────────────────────

/// The job side of a match: its required skills as entered by the company.
#[derive(Debug, Clone)]
pub struct JobProfile {
    pub job_id: Uuid,
    pub title: String,
    pub required_skills: Vec<String>,
}

/// The applicant side of a match: the extracted skill set.
#[derive(Debug, Clone)]
pub struct CandidateProfile {
    pub applicant_id: Uuid,
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
}

impl From<&JobRow> for JobProfile {
    fn from(job: &JobRow) -> Self {
        Self {
            job_id: job.id,
            title: job.title.clone(),
            required_skills: job.skills.clone(),
        }
    }
}

impl From<&ApplicantRow> for CandidateProfile {
    fn from(applicant: &ApplicantRow) -> Self {
        Self {
            applicant_id: applicant.id,
            name: applicant.name.clone(),
            email: applicant.email.clone(),
            skills: applicant.skills.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub applicant_id: Uuid,
    pub applicant_name: String,
    pub applicant_email: String,
    pub job_id: Uuid,
    pub job_title: String,
    /// 0.0 – 100.0, one decimal.
    pub match_percentage: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching the handlers.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    /// Scores every candidate against `job`. Results come back ranked.
    async fn score(
        &self,
        job: &JobProfile,
        candidates: &[CandidateProfile],
    ) -> Result<Vec<MatchResult>, AppError>;

    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// SkillOverlapScorer
// ────────────────────────────────────────────────────────────────────────────

/// Share of the job's distinct required skills that the applicant has.
///
/// Ranking: percentage desc, matched count desc, applicant name asc
/// (case-insensitive), applicant id asc.
pub struct SkillOverlapScorer;

#[async_trait]
impl MatchScorer for SkillOverlapScorer {
    async fn score(
        &self,
        job: &JobProfile,
        candidates: &[CandidateProfile],
    ) -> Result<Vec<MatchResult>, AppError> {
        let mut results: Vec<MatchResult> = candidates
            .iter()
            .map(|candidate| score_pair(job, candidate))
            .collect();
        rank_candidates(&mut results);
        Ok(results)
    }

    fn backend(&self) -> &'static str {
        "skill_overlap"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub percentage: f64,
}

/// Case-insensitive overlap of `required` against `skills`.
///
/// Requirements are de-duplicated case-insensitively for scoring (first spelling and
/// order kept). No requirements scores 0.
pub fn compute_overlap(required: &[String], skills: &[String]) -> Overlap {
    let have: HashSet<String> = skills.iter().map(|s| normalize(s)).collect();

    let mut seen = HashSet::new();
    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for skill in required {
        let key = normalize(skill);
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }
        if have.contains(&key) {
            matched.push(skill.trim().to_string());
        } else {
            missing.push(skill.trim().to_string());
        }
    }

    let total = matched.len() + missing.len();
    let percentage = if total == 0 {
        0.0
    } else {
        round_one_decimal(matched.len() as f64 / total as f64 * 100.0)
    };

    Overlap {
        matched,
        missing,
        percentage,
    }
}

pub fn score_pair(job: &JobProfile, candidate: &CandidateProfile) -> MatchResult {
    let overlap = compute_overlap(&job.required_skills, &candidate.skills);
    MatchResult {
        applicant_id: candidate.applicant_id,
        applicant_name: candidate.name.clone(),
        applicant_email: candidate.email.clone(),
        job_id: job.job_id,
        job_title: job.title.clone(),
        match_percentage: overlap.percentage,
        matched_skills: overlap.matched,
        missing_skills: overlap.missing,
    }
}

/// Candidate ranking for one job.
pub fn rank_candidates(results: &mut [MatchResult]) {
    results.sort_by(|a, b| {
        by_score(a, b)
            .then_with(|| a.applicant_name.to_lowercase().cmp(&b.applicant_name.to_lowercase()))
            .then_with(|| a.applicant_id.cmp(&b.applicant_id))
    });
}

/// Job ranking for one applicant: score first, then job title, then id.
pub fn rank_jobs(results: &mut [MatchResult]) {
    results.sort_by(|a, b| {
        by_score(a, b)
            .then_with(|| a.job_title.to_lowercase().cmp(&b.job_title.to_lowercase()))
            .then_with(|| a.job_id.cmp(&b.job_id))
    });
}

/// Ranking across many jobs and applicants (company dashboard).
pub fn rank_pairs(results: &mut [MatchResult]) {
    results.sort_by(|a, b| {
        by_score(a, b)
            .then_with(|| a.applicant_name.to_lowercase().cmp(&b.applicant_name.to_lowercase()))
            .then_with(|| a.job_title.to_lowercase().cmp(&b.job_title.to_lowercase()))
            .then_with(|| a.applicant_id.cmp(&b.applicant_id))
            .then_with(|| a.job_id.cmp(&b.job_id))
    });
}

pub fn at_least(results: Vec<MatchResult>, min_percentage: f64) -> Vec<MatchResult> {
    results
        .into_iter()
        .filter(|r| r.match_percentage >= min_percentage)
        .collect()
}

fn by_score(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.match_percentage
        .total_cmp(&a.match_percentage)
        .then_with(|| b.matched_skills.len().cmp(&a.matched_skills.len()))
}

fn normalize(skill: &str) -> String {
    skill.trim().to_lowercase()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
