use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    /// Required skills, kept in the order the company entered them.
    pub skills: Vec<String>,
    pub salary: Option<f64>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub salary: Option<f64>,
    pub location: Option<String>,
}

impl NewJob {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_title(&self.title)?;
        validate_salary(self.salary)?;
        validate_skills(&self.skills)
    }
}

/// Partial update. Absent fields leave the stored value untouched; an explicit
/// `null` clears `salary` or `location`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub skills: Option<Vec<String>>,
    #[serde(default, deserialize_with = "present")]
    pub salary: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub location: Option<Option<String>>,
}

/// Only runs for keys present in the body, so `null` arrives as `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl JobPatch {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(skills) = &self.skills {
            validate_skills(skills)?;
        }
        validate_salary(self.salary.flatten())
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.skills.is_none()
            && self.salary.is_none()
            && self.location.is_none()
    }

    /// Field-by-field merge onto an existing row.
    pub fn apply(self, job: &mut JobRow) {
        if let Some(title) = self.title {
            job.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            job.description = description;
        }
        if let Some(skills) = self.skills {
            job.skills = skills;
        }
        if let Some(salary) = self.salary {
            job.salary = salary;
        }
        if let Some(location) = self.location {
            job.location = location;
        }
    }
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    Ok(())
}

fn validate_salary(salary: Option<f64>) -> Result<(), AppError> {
    match salary {
        Some(s) if !s.is_finite() || s < 0.0 => Err(AppError::Validation(
            "salary must be a non-negative number".to_string(),
        )),
        _ => Ok(()),
    }
}

fn validate_skills(skills: &[String]) -> Result<(), AppError> {
    if skills.iter().any(|s| s.trim().is_empty()) {
        return Err(AppError::Validation(
            "skills cannot contain blank entries".to_string(),
        ));
    }
    Ok(())
}
