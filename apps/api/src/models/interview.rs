use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl InterviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, InterviewStatus::Scheduled)
    }

    /// `scheduled → completed | cancelled`; terminal states never change.
    pub fn can_transition_to(&self, next: InterviewStatus) -> bool {
        *self == next || (*self == InterviewStatus::Scheduled && next.is_terminal())
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(InterviewStatus::Scheduled),
            "completed" => Ok(InterviewStatus::Completed),
            "cancelled" => Ok(InterviewStatus::Cancelled),
            other => Err(format!("unknown interview status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub position_id: Uuid,
    pub date_time: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InterviewRow {
    pub fn status(&self) -> Result<InterviewStatus, AppError> {
        self.status
            .parse()
            .map_err(|e: String| AppError::Internal(anyhow::anyhow!(e)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewInterview {
    pub applicant_id: Uuid,
    pub position_id: Uuid,
    pub date_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InterviewPatch {
    pub date_time: Option<DateTime<Utc>>,
    pub status: Option<InterviewStatus>,
}

impl InterviewPatch {
    /// Merges the patch onto `row`, enforcing the status lifecycle.
    /// Rescheduling is only allowed while the interview is still scheduled.
    pub fn apply(self, row: &mut InterviewRow) -> Result<(), AppError> {
        let current = row.status()?;

        if let Some(date_time) = self.date_time {
            if current.is_terminal() && date_time != row.date_time {
                return Err(AppError::Conflict(format!(
                    "cannot reschedule an interview that is {current}"
                )));
            }
            row.date_time = date_time;
        }

        if let Some(next) = self.status {
            if !current.can_transition_to(next) {
                return Err(AppError::Conflict(format!(
                    "interview is {current} and cannot become {next}"
                )));
            }
            row.status = next.as_str().to_string();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn interview(status: InterviewStatus) -> InterviewRow {
        InterviewRow {
            id: Uuid::new_v4(),
            applicant_id: Uuid::new_v4(),
            position_id: Uuid::new_v4(),
            date_time: Utc::now(),
            status: status.as_str().to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_transitions() {
        use InterviewStatus::*;
        assert!(Scheduled.can_transition_to(Completed));
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(Scheduled.can_transition_to(Scheduled));
        assert!(!Completed.can_transition_to(Scheduled));
        assert!(!Cancelled.can_transition_to(Completed));
        assert!(Completed.can_transition_to(Completed));
    }

    #[test]
    fn test_patch_reschedules_and_completes() {
        let mut row = interview(InterviewStatus::Scheduled);
        let later = row.date_time + Duration::days(2);
        InterviewPatch {
            date_time: Some(later),
            status: Some(InterviewStatus::Completed),
        }
        .apply(&mut row)
        .unwrap();
        assert_eq!(row.date_time, later);
        assert_eq!(row.status().unwrap(), InterviewStatus::Completed);
    }

    #[test]
    fn test_terminal_interview_cannot_be_reopened() {
        let mut row = interview(InterviewStatus::Cancelled);
        let err = InterviewPatch {
            status: Some(InterviewStatus::Scheduled),
            ..Default::default()
        }
        .apply(&mut row)
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(row.status, "cancelled");
    }

    #[test]
    fn test_terminal_interview_cannot_be_rescheduled() {
        let mut row = interview(InterviewStatus::Completed);
        let err = InterviewPatch {
            date_time: Some(row.date_time + Duration::hours(1)),
            ..Default::default()
        }
        .apply(&mut row)
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_status_serde_is_snake_case() {
        let patch: InterviewPatch = serde_json::from_str(r#"{"status": "cancelled"}"#).unwrap();
        assert_eq!(patch.status, Some(InterviewStatus::Cancelled));
        assert_eq!(
            serde_json::to_string(&InterviewStatus::Scheduled).unwrap(),
            r#""scheduled""#
        );
    }
}
