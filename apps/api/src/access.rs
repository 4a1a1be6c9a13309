//! Ownership checks shared by the interview and offer handlers.

use sqlx::PgPool;
use uuid::Uuid;

use crate::applicants::repository::{get_applicant, get_applicant_by_user};
use crate::auth::{AuthUser, Role};
use crate::errors::AppError;
use crate::jobs::repository::get_job;
use crate::models::applicant::ApplicantRow;
use crate::models::job::JobRow;

pub async fn require_job(pool: &PgPool, job_id: Uuid) -> Result<JobRow, AppError> {
    get_job(pool, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

pub async fn require_applicant(
    pool: &PgPool,
    applicant_id: Uuid,
) -> Result<ApplicantRow, AppError> {
    get_applicant(pool, applicant_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Applicant {applicant_id} not found")))
}

/// The job, if `user` is the company that posted it.
pub async fn require_owned_job(
    pool: &PgPool,
    user: &AuthUser,
    job_id: Uuid,
) -> Result<JobRow, AppError> {
    user.require(Role::Company)?;
    let job = require_job(pool, job_id).await?;
    ensure_job_owner(user, &job)?;
    Ok(job)
}

pub fn ensure_job_owner(user: &AuthUser, job: &JobRow) -> Result<(), AppError> {
    if user.role == Role::Company && job.company_id == user.user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// The caller's own applicant profile, if any.
pub async fn own_profile(pool: &PgPool, user: &AuthUser) -> Result<Option<ApplicantRow>, AppError> {
    user.require(Role::Applicant)?;
    Ok(get_applicant_by_user(pool, user.user_id).await?)
}

/// A record tied to one applicant and one job is visible to the company owning the
/// job and to that applicant.
pub async fn ensure_party(
    pool: &PgPool,
    user: &AuthUser,
    applicant_id: Uuid,
    position_id: Uuid,
) -> Result<(), AppError> {
    match user.role {
        Role::Company => {
            let job = require_job(pool, position_id).await?;
            ensure_job_owner(user, &job)
        }
        Role::Applicant => {
            let applicant = require_applicant(pool, applicant_id).await?;
            if applicant.user_id == user.user_id {
                Ok(())
            } else {
                Err(AppError::Forbidden)
            }
        }
    }
}
