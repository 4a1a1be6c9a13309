use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicantRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume_key: Option<String>,
    pub resume_text: Option<String>,
    /// Extracted from the latest resume; replaced wholesale on re-upload.
    pub skills: Vec<String>,
    pub total_experience: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List view without the full resume text.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantSummary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub total_experience: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<ApplicantRow> for ApplicantSummary {
    fn from(row: ApplicantRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            skills: row.skills,
            total_experience: row.total_experience,
            created_at: row.created_at,
        }
    }
}
