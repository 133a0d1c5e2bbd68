//! Document text extraction for the summary tool.
//!
//! PDF parsing is CPU-bound and runs inside `tokio::task::spawn_blocking`.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

/// Upper bound on the document text forwarded to the model.
pub const MAX_DOCUMENT_CHARS: usize = 48_000;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document could not be parsed: {0}")]
    Unreadable(String),
}

#[async_trait]
pub trait DocumentTextExtractor: Send + Sync {
    async fn extract(&self, bytes: Bytes) -> Result<String, ExtractError>;
}

/// Text extraction backed by `pdf-extract`.
pub struct PdfTextExtractor;

#[async_trait]
impl DocumentTextExtractor for PdfTextExtractor {
    async fn extract(&self, bytes: Bytes) -> Result<String, ExtractError> {
        let size = bytes.len();
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            // the parser panics on some malformed files
            .map_err(|e| ExtractError::Unreadable(format!("parser aborted: {e}")))?
            .map_err(|e| ExtractError::Unreadable(e.to_string()))?;

        debug!(bytes = size, chars = text.len(), "pdf text extracted");
        Ok(text)
    }
}

/// Trims trailing whitespace, collapses blank-line runs, and truncates to
/// `MAX_DOCUMENT_CHARS` on a character boundary.
pub fn normalize_document_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len().min(MAX_DOCUMENT_CHARS * 4));
    let mut blank_run = 0usize;

    for line in raw.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 || out.is_empty() {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }

    let trimmed = out.trim_end();
    match trimmed.char_indices().nth(MAX_DOCUMENT_CHARS) {
        Some((cut, _)) => trimmed[..cut].to_string(),
        None => trimmed.to_string(),
    }
}
