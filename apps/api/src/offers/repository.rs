use sqlx::PgPool;
use uuid::Uuid;

use crate::models::offer::{NewOffer, OfferRow};

pub async fn insert_offer(
    pool: &PgPool,
    id: Uuid,
    offer: &NewOffer,
    letter_key: &str,
) -> Result<OfferRow, sqlx::Error> {
    sqlx::query_as::<_, OfferRow>(
        r#"
        INSERT INTO offer_letters (id, applicant_id, position_id, salary, start_date, letter_key)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(offer.applicant_id)
    .bind(offer.position_id)
    .bind(offer.salary)
    .bind(offer.start_date)
    .bind(letter_key)
    .fetch_one(pool)
    .await
}

pub async fn get_offer(pool: &PgPool, id: Uuid) -> Result<Option<OfferRow>, sqlx::Error> {
    sqlx::query_as::<_, OfferRow>("SELECT * FROM offer_letters WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_for_company(
    pool: &PgPool,
    company_id: Uuid,
) -> Result<Vec<OfferRow>, sqlx::Error> {
    sqlx::query_as::<_, OfferRow>(
        r#"
        SELECT o.*
        FROM offer_letters o
        JOIN jobs j ON j.id = o.position_id
        WHERE j.company_id = $1
        ORDER BY o.created_at DESC, o.id
        "#,
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}

pub async fn list_for_applicant(
    pool: &PgPool,
    applicant_id: Uuid,
) -> Result<Vec<OfferRow>, sqlx::Error> {
    sqlx::query_as::<_, OfferRow>(
        "SELECT * FROM offer_letters WHERE applicant_id = $1 ORDER BY created_at DESC, id",
    )
    .bind(applicant_id)
    .fetch_all(pool)
    .await
}
