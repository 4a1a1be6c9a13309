//! Axum route handlers for interview scheduling.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::access::{ensure_party, own_profile, require_applicant, require_owned_job};
use crate::auth::{AuthUser, Role};
use crate::errors::AppError;
use crate::interviews::repository::{
    get_interview, insert_interview, list_for_applicant, list_for_company, update_interview,
};
use crate::models::interview::{InterviewPatch, InterviewRow, NewInterview};
use crate::state::AppState;

async fn require_interview(pool: &sqlx::PgPool, id: Uuid) -> Result<InterviewRow, AppError> {
    get_interview(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))
}

/// POST /api/v1/interviews
pub async fn handle_schedule_interview(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<NewInterview>,
) -> Result<(StatusCode, Json<InterviewRow>), AppError> {
    user.require(Role::Company)?;
    require_owned_job(&state.db, &user, request.position_id).await?;
    require_applicant(&state.db, request.applicant_id).await?;

    let interview = insert_interview(&state.db, &request).await?;
    info!(
        "Scheduled interview {} for applicant {} on job {}",
        interview.id, interview.applicant_id, interview.position_id
    );
    Ok((StatusCode::CREATED, Json(interview)))
}

/// GET /api/v1/interviews
///
/// Companies see interviews for their own jobs; applicants see their own.
pub async fn handle_list_interviews(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<InterviewRow>>, AppError> {
    let interviews = match user.role {
        Role::Company => list_for_company(&state.db, user.user_id).await?,
        Role::Applicant => match own_profile(&state.db, &user).await? {
            Some(applicant) => list_for_applicant(&state.db, applicant.id).await?,
            None => Vec::new(),
        },
    };
    Ok(Json(interviews))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    user: AuthUser,
    Path(interview_id): Path<Uuid>,
) -> Result<Json<InterviewRow>, AppError> {
    let interview = require_interview(&state.db, interview_id).await?;
    ensure_party(&state.db, &user, interview.applicant_id, interview.position_id).await?;
    Ok(Json(interview))
}

/// PATCH /api/v1/interviews/:id
///
/// Reschedule or move the status forward. Only the company that owns the job.
pub async fn handle_update_interview(
    State(state): State<AppState>,
    user: AuthUser,
    Path(interview_id): Path<Uuid>,
    Json(patch): Json<InterviewPatch>,
) -> Result<Json<InterviewRow>, AppError> {
    user.require(Role::Company)?;

    let mut interview = require_interview(&state.db, interview_id).await?;
    require_owned_job(&state.db, &user, interview.position_id).await?;

    patch.apply(&mut interview)?;
    let interview = update_interview(&state.db, &interview).await?;

    info!("Interview {} is now {}", interview.id, interview.status);
    Ok(Json(interview))
}
