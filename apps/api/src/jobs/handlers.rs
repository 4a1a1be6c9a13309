//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::access::{require_job, require_owned_job};
use crate::auth::{AuthUser, Role};
use crate::errors::AppError;
use crate::jobs::repository::{delete_job, insert_job, list_jobs, update_job};
use crate::models::job::{JobPatch, JobRow, NewJob};
use crate::models::Pagination;
use crate::state::AppState;

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<NewJob>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    user.require(Role::Company)?;
    request.validate()?;

    let job = insert_job(&state.db, user.user_id, &request).await?;
    info!("Company {} created job {} ({})", user.user_id, job.id, job.title);
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let (offset, limit) = page.clamped();
    Ok(Json(list_jobs(&state.db, offset, limit).await?))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    Ok(Json(require_job(&state.db, job_id).await?))
}

/// PATCH /api/v1/jobs/:id
///
/// Only the company that posted the job may edit it.
pub async fn handle_update_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
    Json(patch): Json<JobPatch>,
) -> Result<Json<JobRow>, AppError> {
    user.require(Role::Company)?;
    patch.validate()?;

    let mut job = require_owned_job(&state.db, &user, job_id).await?;
    if patch.is_empty() {
        return Ok(Json(job));
    }
    patch.apply(&mut job);

    let job = update_job(&state.db, &job).await?;
    info!("Job {job_id} updated");
    Ok(Json(job))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    require_owned_job(&state.db, &user, job_id).await?;

    if !delete_job(&state.db, job_id).await? {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }
    info!("Job {job_id} deleted");
    Ok(StatusCode::NO_CONTENT)
}
