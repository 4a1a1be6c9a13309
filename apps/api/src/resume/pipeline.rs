//! Upload pipeline: validate the uploaded file, then PDF → text → skills.
//!
//! The decode runs on a blocking thread so large documents never stall the runtime.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::resume::extract::{ExtractionError, TextExtractor};
use crate::resume::skills::{ExtractedSkillSet, SkillExtractor};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// A file part received from a multipart upload.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub filename: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedResume {
    pub text: String,
    pub skills: ExtractedSkillSet,
}

/// Extractor + skill scanner pair shared through `AppState`.
#[derive(Clone)]
pub struct ResumeParser {
    extractor: Arc<dyn TextExtractor>,
    skills: Arc<SkillExtractor>,
}

impl ResumeParser {
    pub fn new(extractor: Arc<dyn TextExtractor>, skills: Arc<SkillExtractor>) -> Self {
        Self { extractor, skills }
    }

    pub fn skills(&self) -> &SkillExtractor {
        &self.skills
    }

    /// Synchronous core: text extraction followed by skill extraction.
    pub fn parse(&self, bytes: &[u8]) -> Result<ParsedResume, ExtractionError> {
        let text = self.extractor.extract_text(bytes)?;
        let skills = self.skills.extract(&text);
        Ok(ParsedResume { text, skills })
    }
}

/// Rejects uploads that are not worth handing to the decoder.
pub fn validate_upload(upload: &ResumeUpload, max_bytes: usize) -> Result<(), AppError> {
    if !upload.filename.to_ascii_lowercase().ends_with(".pdf") {
        return Err(AppError::Validation(
            "Only PDF files are allowed".to_string(),
        ));
    }
    if upload.bytes.is_empty() {
        return Err(AppError::Validation("Uploaded resume is empty".to_string()));
    }
    if upload.bytes.len() > max_bytes {
        return Err(AppError::Validation(format!(
            "Uploaded resume exceeds the {max_bytes} byte limit"
        )));
    }
    if !upload.bytes.starts_with(PDF_MAGIC) {
        return Err(AppError::Validation(
            "Uploaded file is not a PDF document".to_string(),
        ));
    }
    Ok(())
}

/// Validates the upload and parses it off the async runtime.
pub async fn process_upload(
    upload: &ResumeUpload,
    max_bytes: usize,
    parser: &ResumeParser,
) -> Result<ParsedResume, AppError> {
    validate_upload(upload, max_bytes)?;

    let bytes = upload.bytes.clone();
    let worker = parser.clone();
    let parsed = tokio::task::spawn_blocking(move || worker.parse(&bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("resume parse task failed: {e}")))??;

    if parsed.skills.is_empty() {
        warn!(
            "Parsed resume '{}': {} chars, no vocabulary skills found",
            upload.filename,
            parsed.text.len()
        );
    } else {
        info!(
            "Parsed resume '{}': {} chars, {} skills {:?}",
            upload.filename,
            parsed.text.len(),
            parsed.skills.len(),
            parser.skills().categorize(&parsed.skills)
        );
    }
    Ok(parsed)
}
