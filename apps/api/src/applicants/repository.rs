use sqlx::PgPool;
use uuid::Uuid;

use crate::models::applicant::ApplicantRow;

pub struct NewApplicant<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub resume_key: &'a str,
    pub resume_text: &'a str,
    pub skills: &'a [String],
}

pub async fn insert_applicant(
    pool: &PgPool,
    new: NewApplicant<'_>,
) -> Result<ApplicantRow, sqlx::Error> {
    let NewApplicant {
        id,
        user_id,
        name,
        email,
        phone,
        resume_key,
        resume_text,
        skills,
    } = new;

    sqlx::query_as::<_, ApplicantRow>(
        r#"
        INSERT INTO applicants (id, user_id, name, email, phone, resume_key, resume_text, skills)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(resume_key)
    .bind(resume_text)
    .bind(skills)
    .fetch_one(pool)
    .await
}

/// Replaces the stored resume text and skill set wholesale.
pub async fn replace_resume(
    pool: &PgPool,
    id: Uuid,
    resume_key: &str,
    resume_text: &str,
    skills: &[String],
) -> Result<ApplicantRow, sqlx::Error> {
    sqlx::query_as::<_, ApplicantRow>(
        r#"
        UPDATE applicants
        SET resume_key = $2, resume_text = $3, skills = $4, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(resume_key)
    .bind(resume_text)
    .bind(skills)
    .fetch_one(pool)
    .await
}

pub async fn list_applicants(
    pool: &PgPool,
    offset: i64,
    limit: i64,
) -> Result<Vec<ApplicantRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicantRow>(
        "SELECT * FROM applicants ORDER BY created_at DESC, id OFFSET $1 LIMIT $2",
    )
    .bind(offset)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn list_all_applicants(pool: &PgPool) -> Result<Vec<ApplicantRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicantRow>("SELECT * FROM applicants ORDER BY name, id")
        .fetch_all(pool)
        .await
}

pub async fn get_applicant(pool: &PgPool, id: Uuid) -> Result<Option<ApplicantRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicantRow>("SELECT * FROM applicants WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_applicant_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<ApplicantRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicantRow>("SELECT * FROM applicants WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}
