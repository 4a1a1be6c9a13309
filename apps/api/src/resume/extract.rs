//! Resume Text Extractor: PDF bytes in, page-ordered plain text out.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

/// The PDF could not be decoded. Carries the decoder's message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to extract text from PDF: {message}")]
pub struct ExtractionError {
    pub message: String,
}

impl ExtractionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Seam between the upload pipeline and the PDF decoder.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Default extractor backed by `pdf-extract`.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        extract_text(bytes)
    }
}

/// Concatenated text of every page in page order.
///
/// Any page failure aborts the whole document: nothing partial is returned.
/// A document with zero pages yields an empty string.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::new("input is empty"));
    }

    // pdf-extract panics on some malformed inputs instead of returning an error.
    match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::new(e.to_string())),
        Err(payload) => Err(ExtractionError::new(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("decoder panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("decoder panicked: {s}")
    } else {
        "decoder panicked".to_string()
    }
}
