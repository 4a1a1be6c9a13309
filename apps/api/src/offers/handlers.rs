//! Axum route handlers for offer letters.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::access::{ensure_party, own_profile, require_applicant, require_owned_job};
use crate::auth::{AuthUser, Role};
use crate::errors::AppError;
use crate::models::offer::{NewOffer, OfferRow};
use crate::offers::letter::{render_offer_letter, OfferLetterParams};
use crate::offers::repository::{get_offer, insert_offer, list_for_applicant, list_for_company};
use crate::state::AppState;
use crate::storage::offer_letter_key;

const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// POST /api/v1/offers
///
/// Renders the letter, stores it, then records the offer.
pub async fn handle_create_offer(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<NewOffer>,
) -> Result<(StatusCode, Json<OfferRow>), AppError> {
    user.require(Role::Company)?;
    request.validate()?;

    let job = require_owned_job(&state.db, &user, request.position_id).await?;
    let applicant = require_applicant(&state.db, request.applicant_id).await?;
    let request = request.with_job_defaults(&job);

    let letter = render_offer_letter(&OfferLetterParams {
        applicant_name: &applicant.name,
        job_title: &job.title,
        location: job.location.as_deref(),
        salary: request.salary,
        start_date: request.start_date,
        issued_on: Utc::now().date_naive(),
    });

    let offer_id = Uuid::new_v4();
    let key = offer_letter_key(offer_id);
    state
        .store
        .put(&key, Bytes::from(letter.into_bytes()), MARKDOWN_CONTENT_TYPE)
        .await?;

    let offer = insert_offer(&state.db, offer_id, &request, &key).await?;
    info!(
        "Offer {} issued to applicant {} for job {}",
        offer.id, offer.applicant_id, offer.position_id
    );
    Ok((StatusCode::CREATED, Json(offer)))
}

/// GET /api/v1/offers
pub async fn handle_list_offers(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<OfferRow>>, AppError> {
    let offers = match user.role {
        Role::Company => list_for_company(&state.db, user.user_id).await?,
        Role::Applicant => match own_profile(&state.db, &user).await? {
            Some(applicant) => list_for_applicant(&state.db, applicant.id).await?,
            None => Vec::new(),
        },
    };
    Ok(Json(offers))
}

/// GET /api/v1/offers/:id
///
/// Returns the stored letter itself.
pub async fn handle_get_offer_letter(
    State(state): State<AppState>,
    user: AuthUser,
    Path(offer_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let offer = get_offer(&state.db, offer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Offer {offer_id} not found")))?;
    ensure_party(&state.db, &user, offer.applicant_id, offer.position_id).await?;

    let letter = state.store.get(&offer.letter_key).await?;
    Ok(([(header::CONTENT_TYPE, MARKDOWN_CONTENT_TYPE)], letter))
}
