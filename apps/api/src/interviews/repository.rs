use sqlx::PgPool;
use uuid::Uuid;

use crate::models::interview::{InterviewRow, InterviewStatus, NewInterview};

pub async fn insert_interview(
    pool: &PgPool,
    new: &NewInterview,
) -> Result<InterviewRow, sqlx::Error> {
    sqlx::query_as::<_, InterviewRow>(
        r#"
        INSERT INTO interviews (id, applicant_id, position_id, date_time, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.applicant_id)
    .bind(new.position_id)
    .bind(new.date_time)
    .bind(InterviewStatus::Scheduled.as_str())
    .fetch_one(pool)
    .await
}

pub async fn get_interview(pool: &PgPool, id: Uuid) -> Result<Option<InterviewRow>, sqlx::Error> {
    sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Interviews for every job owned by `company_id`.
pub async fn list_for_company(
    pool: &PgPool,
    company_id: Uuid,
) -> Result<Vec<InterviewRow>, sqlx::Error> {
    sqlx::query_as::<_, InterviewRow>(
        r#"
        SELECT i.*
        FROM interviews i
        JOIN jobs j ON j.id = i.position_id
        WHERE j.company_id = $1
        ORDER BY i.date_time, i.id
        "#,
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}

pub async fn list_for_applicant(
    pool: &PgPool,
    applicant_id: Uuid,
) -> Result<Vec<InterviewRow>, sqlx::Error> {
    sqlx::query_as::<_, InterviewRow>(
        "SELECT * FROM interviews WHERE applicant_id = $1 ORDER BY date_time, id",
    )
    .bind(applicant_id)
    .fetch_all(pool)
    .await
}

pub async fn update_interview(
    pool: &PgPool,
    row: &InterviewRow,
) -> Result<InterviewRow, sqlx::Error> {
    sqlx::query_as::<_, InterviewRow>(
        r#"
        UPDATE interviews
        SET date_time = $2, status = $3, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(row.id)
    .bind(row.date_time)
    .bind(&row.status)
    .fetch_one(pool)
    .await
}
