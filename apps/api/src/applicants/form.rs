//! Multipart form parsing for applicant registration and resume re-upload.

use axum::extract::Multipart;

use crate::errors::AppError;
use crate::resume::pipeline::ResumeUpload;

pub const RESUME_FIELD: &str = "resume";

#[derive(Debug, Default)]
pub struct ApplicantForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub resume: Option<ResumeUpload>,
}

/// Registration fields after validation.
#[derive(Debug)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume: ResumeUpload,
}

impl ApplicantForm {
    pub async fn read(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = ApplicantForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                RESUME_FIELD => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read resume upload: {e}"))
                    })?;
                    form.resume = Some(ResumeUpload { filename, bytes });
                }
                "name" | "email" | "phone" => {
                    let value = field.text().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read field '{name}': {e}"))
                    })?;
                    let value = Some(value.trim().to_string()).filter(|v| !v.is_empty());
                    match name.as_str() {
                        "name" => form.name = value,
                        "email" => form.email = value,
                        _ => form.phone = value,
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    pub fn into_registration(self) -> Result<Registration, AppError> {
        let name = self
            .name
            .ok_or_else(|| AppError::Validation("name is required".to_string()))?;
        let email = self
            .email
            .ok_or_else(|| AppError::Validation("email is required".to_string()))?;
        if !looks_like_email(&email) {
            return Err(AppError::Validation(format!("'{email}' is not a valid email")));
        }
        let resume = self.resume.ok_or_else(missing_resume)?;

        Ok(Registration {
            name,
            email,
            phone: self.phone,
            resume,
        })
    }

    pub fn into_resume(self) -> Result<ResumeUpload, AppError> {
        self.resume.ok_or_else(missing_resume)
    }
}

fn missing_resume() -> AppError {
    AppError::Validation(format!("a '{RESUME_FIELD}' file part is required"))
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    }
}
