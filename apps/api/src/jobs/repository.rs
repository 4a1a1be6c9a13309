use sqlx::PgPool;
use uuid::Uuid;

use crate::models::job::{JobRow, NewJob};

pub async fn insert_job(
    pool: &PgPool,
    company_id: Uuid,
    job: &NewJob,
) -> Result<JobRow, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs (id, company_id, title, description, skills, salary, location)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(company_id)
    .bind(job.title.trim())
    .bind(&job.description)
    .bind(&job.skills)
    .bind(job.salary)
    .bind(&job.location)
    .fetch_one(pool)
    .await
}

pub async fn list_jobs(pool: &PgPool, offset: i64, limit: i64) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        "SELECT * FROM jobs ORDER BY created_at DESC, id OFFSET $1 LIMIT $2",
    )
    .bind(offset)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn list_all_jobs(pool: &PgPool) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY created_at DESC, id")
        .fetch_all(pool)
        .await
}

pub async fn list_jobs_by_company(
    pool: &PgPool,
    company_id: Uuid,
) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        "SELECT * FROM jobs WHERE company_id = $1 ORDER BY created_at DESC, id",
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}

pub async fn get_job(pool: &PgPool, id: Uuid) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Writes every mutable column of `job` back and bumps `updated_at`.
pub async fn update_job(pool: &PgPool, job: &JobRow) -> Result<JobRow, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        UPDATE jobs
        SET title = $2, description = $3, skills = $4, salary = $5, location = $6,
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(job.id)
    .bind(&job.title)
    .bind(&job.description)
    .bind(&job.skills)
    .bind(job.salary)
    .bind(&job.location)
    .fetch_one(pool)
    .await
}

pub async fn delete_job(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
