//! Axum route handlers for the Applicants API.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::access::{own_profile, require_applicant};
use crate::applicants::form::ApplicantForm;
use crate::applicants::repository::{
    insert_applicant, list_applicants, replace_resume, NewApplicant,
};
use crate::auth::{AuthUser, Role};
use crate::errors::AppError;
use crate::models::applicant::{ApplicantRow, ApplicantSummary};
use crate::models::Pagination;
use crate::resume::pipeline::{process_upload, validate_upload};
use crate::state::AppState;
use crate::storage::resume_key;

const PDF_CONTENT_TYPE: &str = "application/pdf";
const PROFILE_EXISTS: &str = "Applicant profile already exists";

/// POST /api/v1/applicants
///
/// Multipart: `name`, `email`, optional `phone`, and the `resume` PDF.
/// One profile per applicant account.
pub async fn handle_register_applicant(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApplicantRow>), AppError> {
    user.require(Role::Applicant)?;

    let registration = ApplicantForm::read(&mut multipart).await?.into_registration()?;
    validate_upload(&registration.resume, state.config.max_upload_bytes)?;

    if own_profile(&state.db, &user).await?.is_some() {
        return Err(AppError::Conflict(PROFILE_EXISTS.to_string()));
    }

    let parsed = process_upload(
        &registration.resume,
        state.config.max_upload_bytes,
        &state.resume_parser,
    )
    .await?;

    let applicant_id = Uuid::new_v4();
    let key = resume_key(applicant_id);
    state
        .store
        .put(&key, registration.resume.bytes.clone(), PDF_CONTENT_TYPE)
        .await?;

    let skills = parsed.skills.into_vec();
    let inserted = insert_applicant(
        &state.db,
        NewApplicant {
            id: applicant_id,
            user_id: user.user_id,
            name: &registration.name,
            email: &registration.email,
            phone: registration.phone.as_deref(),
            resume_key: &key,
            resume_text: &parsed.text,
            skills: &skills,
        },
    )
    .await;

    // A concurrent registration by the same user can win the UNIQUE(user_id) race.
    let applicant = match inserted {
        Ok(applicant) => applicant,
        Err(e) => {
            if let Err(cleanup) = state.store.delete(&key).await {
                warn!("Failed to remove orphaned resume {key}: {cleanup}");
            }
            return Err(AppError::conflict_on_unique(e, PROFILE_EXISTS));
        }
    };

    info!(
        "Registered applicant {} with {} extracted skills",
        applicant.id,
        applicant.skills.len()
    );
    Ok((StatusCode::CREATED, Json(applicant)))
}

/// PUT /api/v1/applicants/me/resume
///
/// Re-parses a new resume and replaces the stored text and skills wholesale.
pub async fn handle_replace_resume(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ApplicantRow>, AppError> {
    user.require(Role::Applicant)?;

    let upload = ApplicantForm::read(&mut multipart).await?.into_resume()?;
    validate_upload(&upload, state.config.max_upload_bytes)?;

    let applicant = own_profile(&state.db, &user)
        .await?
        .ok_or_else(|| AppError::NotFound("Applicant profile not found".to_string()))?;

    let parsed =
        process_upload(&upload, state.config.max_upload_bytes, &state.resume_parser).await?;

    let key = resume_key(applicant.id);
    state
        .store
        .put(&key, upload.bytes.clone(), PDF_CONTENT_TYPE)
        .await?;

    let skills = parsed.skills.into_vec();
    let applicant = replace_resume(&state.db, applicant.id, &key, &parsed.text, &skills).await?;

    info!(
        "Replaced resume for applicant {} ({} skills)",
        applicant.id,
        applicant.skills.len()
    );
    Ok(Json(applicant))
}

/// GET /api/v1/applicants (companies only)
pub async fn handle_list_applicants(
    State(state): State<AppState>,
    user: AuthUser,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<ApplicantSummary>>, AppError> {
    user.require(Role::Company)?;
    let (offset, limit) = page.clamped();
    let applicants = list_applicants(&state.db, offset, limit).await?;
    Ok(Json(applicants.into_iter().map(ApplicantSummary::from).collect()))
}

/// GET /api/v1/applicants/me
pub async fn handle_get_own_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApplicantRow>, AppError> {
    let applicant = own_profile(&state.db, &user)
        .await?
        .ok_or_else(|| AppError::NotFound("Applicant profile not found".to_string()))?;
    Ok(Json(applicant))
}

/// GET /api/v1/applicants/:id
///
/// Companies can view any profile; applicants only their own.
pub async fn handle_get_applicant(
    State(state): State<AppState>,
    user: AuthUser,
    Path(applicant_id): Path<Uuid>,
) -> Result<Json<ApplicantRow>, AppError> {
    let applicant = require_applicant(&state.db, applicant_id).await?;
    if user.role == Role::Applicant && applicant.user_id != user.user_id {
        return Err(AppError::Forbidden);
    }
    Ok(Json(applicant))
}
