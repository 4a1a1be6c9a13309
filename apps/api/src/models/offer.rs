use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::JobRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OfferRow {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub position_id: Uuid,
    pub salary: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub letter_key: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewOffer {
    pub applicant_id: Uuid,
    pub position_id: Uuid,
    pub salary: Option<f64>,
    pub start_date: Option<NaiveDate>,
}

impl NewOffer {
    pub fn validate(&self) -> Result<(), AppError> {
        match self.salary {
            Some(s) if !s.is_finite() || s < 0.0 => Err(AppError::Validation(
                "salary must be a non-negative number".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Fills terms the request left out from the job posting. The result is what both
    /// the letter and the stored row carry.
    pub fn with_job_defaults(self, job: &JobRow) -> Self {
        Self {
            salary: self.salary.or(job.salary),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(salary: Option<f64>) -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            title: "Data Engineer".to_string(),
            description: String::new(),
            skills: vec![],
            salary,
            location: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn offer(salary: Option<f64>) -> NewOffer {
        NewOffer {
            applicant_id: Uuid::new_v4(),
            position_id: Uuid::new_v4(),
            salary,
            start_date: None,
        }
    }

    #[test]
    fn test_missing_salary_falls_back_to_job() {
        let resolved = offer(None).with_job_defaults(&job(Some(80_000.0)));
        assert_eq!(resolved.salary, Some(80_000.0));
    }

    #[test]
    fn test_explicit_salary_wins_over_job() {
        let resolved = offer(Some(95_000.0)).with_job_defaults(&job(Some(80_000.0)));
        assert_eq!(resolved.salary, Some(95_000.0));

        let resolved = offer(None).with_job_defaults(&job(None));
        assert_eq!(resolved.salary, None);
    }

    #[test]
    fn test_negative_salary_is_rejected() {
        assert!(matches!(
            offer(Some(-5.0)).validate(),
            Err(AppError::Validation(_))
        ));
        assert!(offer(None).validate().is_ok());
    }
}
