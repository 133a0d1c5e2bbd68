//! Axum route handlers for the five tools and record lookup.
//!
//! Every tool handler follows the same loop: validate → generate (timed) →
//! persist → `{success: true, <kind>: record, processingTime}`. Errors are
//! rendered in the request locale by `ApiError`.

use std::time::Instant;

use anyhow::Context;
use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection},
        Multipart, Path, State,
    },
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::errors::{ApiError, AppError};
use crate::generation::pdf_text::normalize_document_text;
use crate::locale::Locale;
use crate::models::{
    CodeGenerationRecord, CodeInput, EmailInput, EmailRecord, PdfSummaryRecord, Record,
    RecordData, RecordKind, ResumeInput, ResumeRecord, SummaryInput, TextCorrectionRecord,
};
use crate::state::AppState;
use crate::tools::multipart::read_summary_form;
use crate::tools::validation::{optional, require, ValidationError};

const DEFAULT_CODE_STYLE: &str = "clean";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

// Fields are optional at the serde level so a missing field is reported by
// name instead of as a generic body error.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRequest {
    pub name: Option<String>,
    pub position: Option<String>,
    pub contact: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<String>,
    pub education: Option<String>,
}

impl ResumeRequest {
    pub fn into_input(self) -> Result<ResumeInput, ValidationError> {
        Ok(ResumeInput {
            name: require("name", self.name)?,
            position: require("position", self.position)?,
            contact: require("contact", self.contact)?,
            experience: require("experience", self.experience)?,
            skills: require("skills", self.skills)?,
            education: require("education", self.education)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionRequest {
    pub original_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub email_type: Option<String>,
    pub subject: Option<String>,
    pub recipient_name: Option<String>,
    pub key_points: Option<String>,
    pub tone: Option<String>,
}

impl EmailRequest {
    pub fn into_input(self) -> Result<EmailInput, ValidationError> {
        Ok(EmailInput {
            email_type: require("emailType", self.email_type)?,
            subject: require("subject", self.subject)?,
            recipient_name: require("recipientName", self.recipient_name)?,
            key_points: require("keyPoints", self.key_points)?,
            tone: require("tone", self.tone)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeRequest {
    pub project_title: Option<String>,
    pub project_description: Option<String>,
    pub language: Option<String>,
    pub framework: Option<String>,
    pub features: Option<String>,
    pub code_style: Option<String>,
}

impl CodeRequest {
    pub fn into_input(self) -> Result<CodeInput, ValidationError> {
        Ok(CodeInput {
            project_title: require("projectTitle", self.project_title)?,
            project_description: require("projectDescription", self.project_description)?,
            language: require("language", self.language)?,
            framework: optional(self.framework),
            features: require("features", self.features)?,
            code_style: optional(self.code_style)
                .unwrap_or_else(|| DEFAULT_CODE_STYLE.to_string()),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate-resume
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    locale: Locale,
    payload: Result<Json<ResumeRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    generate_resume(&state, payload)
        .await
        .map_err(|e| e.localized(locale))
}

async fn generate_resume(
    state: &AppState,
    payload: Result<Json<ResumeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(ValidationError::from)?;
    let input = request.into_input()?;

    let started = Instant::now();
    let generated_content = state
        .generator
        .resume(&input)
        .await
        .map_err(AppError::generation(RecordKind::Resume))?;
    let processing_time = elapsed_ms(started);

    persist(
        state,
        RecordData::Resume(ResumeRecord {
            input,
            generated_content,
        }),
        processing_time,
    )
    .await
}

/// POST /api/correct-arabic
pub async fn handle_correct_arabic(
    State(state): State<AppState>,
    locale: Locale,
    payload: Result<Json<CorrectionRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    correct_arabic(&state, payload)
        .await
        .map_err(|e| e.localized(locale))
}

async fn correct_arabic(
    state: &AppState,
    payload: Result<Json<CorrectionRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(ValidationError::from)?;
    let original_text = require("originalText", request.original_text)?;

    let started = Instant::now();
    let outcome = state
        .generator
        .correct_arabic(&original_text)
        .await
        .map_err(AppError::generation(RecordKind::TextCorrection))?;
    let processing_time = elapsed_ms(started);

    persist(
        state,
        RecordData::TextCorrection(TextCorrectionRecord {
            original_text,
            corrected_text: outcome.corrected_text,
            errors_found: outcome.errors_found,
            words_improved: outcome.words_improved,
            readability_score: outcome.readability_score,
        }),
        processing_time,
    )
    .await
}

/// POST /api/generate-email
pub async fn handle_generate_email(
    State(state): State<AppState>,
    locale: Locale,
    payload: Result<Json<EmailRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    generate_email(&state, payload)
        .await
        .map_err(|e| e.localized(locale))
}

async fn generate_email(
    state: &AppState,
    payload: Result<Json<EmailRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(ValidationError::from)?;
    let input = request.into_input()?;

    let started = Instant::now();
    let generated_content = state
        .generator
        .email(&input)
        .await
        .map_err(AppError::generation(RecordKind::Email))?;
    let processing_time = elapsed_ms(started);

    persist(
        state,
        RecordData::Email(EmailRecord {
            input,
            generated_content,
        }),
        processing_time,
    )
    .await
}

/// POST /api/summarize-pdf (multipart: `pdf`, `summaryType`, `summaryLength`, `focusAreas`)
pub async fn handle_summarize_pdf(
    State(state): State<AppState>,
    locale: Locale,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, ApiError> {
    summarize_pdf(&state, multipart)
        .await
        .map_err(|e| e.localized(locale))
}

async fn summarize_pdf(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, AppError> {
    let multipart = multipart.map_err(ValidationError::from)?;
    let form = read_summary_form(multipart).await?;
    let file_size = form.upload.bytes.len() as u64;

    let raw_text = state
        .extractor
        .extract(form.upload.bytes)
        .await
        .map_err(|e| ValidationError::UnreadablePdf(e.to_string()))?;
    let original_content = normalize_document_text(&raw_text);
    if original_content.is_empty() {
        warn!(file = %form.upload.file_name, "pdf has no extractable text");
        return Err(ValidationError::UnreadablePdf("no extractable text".to_string()).into());
    }

    let input = SummaryInput {
        file_name: form.upload.file_name,
        file_size,
        summary_type: form.summary_type,
        summary_length: form.summary_length,
        focus_areas: form.focus_areas,
        original_content,
    };

    let started = Instant::now();
    let outcome = state
        .generator
        .summarize(&input)
        .await
        .map_err(AppError::generation(RecordKind::PdfSummary))?;
    let processing_time = elapsed_ms(started);

    persist(
        state,
        RecordData::PdfSummary(PdfSummaryRecord {
            input,
            summary_content: outcome.summary,
            original_pages: outcome.original_pages,
            summary_words: outcome.summary_words,
            compression_ratio: outcome.compression_ratio,
            processing_time,
        }),
        processing_time,
    )
    .await
}

/// POST /api/generate-code
pub async fn handle_generate_code(
    State(state): State<AppState>,
    locale: Locale,
    payload: Result<Json<CodeRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    generate_code(&state, payload)
        .await
        .map_err(|e| e.localized(locale))
}

async fn generate_code(
    state: &AppState,
    payload: Result<Json<CodeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(ValidationError::from)?;
    let input = request.into_input()?;

    let started = Instant::now();
    let outcome = state
        .generator
        .code(&input)
        .await
        .map_err(AppError::generation(RecordKind::CodeGeneration))?;
    let processing_time = elapsed_ms(started);

    persist(
        state,
        RecordData::CodeGeneration(CodeGenerationRecord {
            input,
            generated_code: outcome.code,
            file_structure: outcome.file_structure,
            lines_of_code: outcome.lines_of_code,
            estimated_time: outcome.estimated_time,
        }),
        processing_time,
    )
    .await
}

/// GET /api/records/:kind/:id
pub async fn handle_get_record(
    State(state): State<AppState>,
    locale: Locale,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    get_record(&state, path)
        .await
        .map_err(|e| e.localized(locale))
}

async fn get_record(
    state: &AppState,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Value>, AppError> {
    let Path((segment, raw_id)) =
        path.map_err(|e| ValidationError::MalformedBody(e.body_text()))?;

    let kind = RecordKind::from_path_segment(&segment)
        .ok_or_else(|| AppError::NotFound(format!("record kind '{segment}'")))?;
    let id: i64 = raw_id
        .parse()
        .map_err(|_| ValidationError::InvalidId(raw_id.clone()))?;

    let record = state
        .store
        .get(kind, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {id}", kind.as_str())))?;

    success_envelope(&record, None)
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn persist(
    state: &AppState,
    data: RecordData,
    processing_time: u64,
) -> Result<Json<Value>, AppError> {
    let record = state.store.create(data).await?;
    info!(
        id = record.id,
        tool = record.kind().as_str(),
        processing_time_ms = processing_time,
        "generation stored"
    );
    success_envelope(&record, Some(processing_time))
}

fn success_envelope(record: &Record, processing_time: Option<u64>) -> Result<Json<Value>, AppError> {
    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert(
        record.kind().envelope_key().to_string(),
        serde_json::to_value(record).context("serializing record")?,
    );
    if let Some(ms) = processing_time {
        body.insert("processingTime".to_string(), Value::from(ms));
    }
    Ok(Json(Value::Object(body)))
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
