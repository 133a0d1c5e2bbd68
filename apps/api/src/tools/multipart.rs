//! Reading the PDF summary form (`multipart/form-data`).

use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};

use crate::tools::validation::{is_pdf_content_type, optional, ValidationError};

/// Largest accepted PDF upload.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Body limit of the upload route: the file plus form fields and multipart framing.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

const FILE_FIELD: &str = "pdf";

#[derive(Debug)]
pub struct PdfUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

#[derive(Debug)]
pub struct SummaryForm {
    pub upload: PdfUpload,
    pub summary_type: String,
    pub summary_length: String,
    pub focus_areas: Option<String>,
}

/// Reads every part of the form. Parts may arrive in any order; unknown parts
/// are skipped. The file is checked before the summary options.
pub async fn read_summary_form(mut multipart: Multipart) -> Result<SummaryForm, ValidationError> {
    let mut upload = None;
    let mut summary_type = None;
    let mut summary_length = None;
    let mut focus_areas = None;

    while let Some(field) = multipart.next_field().await.map_err(from_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FILE_FIELD => upload = Some(read_pdf(field).await?),
            "summaryType" => summary_type = Some(field.text().await.map_err(from_multipart)?),
            "summaryLength" => summary_length = Some(field.text().await.map_err(from_multipart)?),
            "focusAreas" => focus_areas = Some(field.text().await.map_err(from_multipart)?),
            _ => {}
        }
    }

    let upload = upload.ok_or(ValidationError::MissingFile)?;
    let (Some(summary_type), Some(summary_length)) =
        (optional(summary_type), optional(summary_length))
    else {
        return Err(ValidationError::MissingSummaryOptions);
    };

    Ok(SummaryForm {
        upload,
        summary_type,
        summary_length,
        focus_areas: optional(focus_areas),
    })
}

/// Streams the file part, stopping as soon as it exceeds `MAX_UPLOAD_BYTES`.
async fn read_pdf(mut field: Field<'_>) -> Result<PdfUpload, ValidationError> {
    let content_type = field.content_type().unwrap_or_default().to_string();
    if !is_pdf_content_type(&content_type) {
        return Err(ValidationError::NotPdf(content_type));
    }
    let file_name = field
        .file_name()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or("document.pdf")
        .to_string();

    let mut buffer = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(from_multipart)? {
        if buffer.len() + chunk.len() > MAX_UPLOAD_BYTES {
            return Err(ValidationError::FileTooLarge {
                limit: MAX_UPLOAD_BYTES,
            });
        }
        buffer.extend_from_slice(&chunk);
    }

    if buffer.is_empty() {
        return Err(ValidationError::MissingFile);
    }

    Ok(PdfUpload {
        file_name,
        bytes: buffer.freeze(),
    })
}

fn from_multipart(error: MultipartError) -> ValidationError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ValidationError::FileTooLarge {
            limit: MAX_UPLOAD_BYTES,
        }
    } else {
        ValidationError::MalformedBody(error.body_text())
    }
}
