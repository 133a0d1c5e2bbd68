//! Generation records: the persisted result of one tool request.
//!
//! Every record shares the same envelope (`id`, `createdAt`) around a
//! kind-specific payload. Input fields are kept in separate `*Input` structs so
//! the generation client and the stored record use the exact same values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The five tools, one record kind each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Resume,
    TextCorrection,
    Email,
    PdfSummary,
    CodeGeneration,
}

impl RecordKind {
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Resume,
        RecordKind::TextCorrection,
        RecordKind::Email,
        RecordKind::PdfSummary,
        RecordKind::CodeGeneration,
    ];

    /// Storage tag, used as the `kind` column of the database backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Resume => "resume",
            RecordKind::TextCorrection => "text_correction",
            RecordKind::Email => "email",
            RecordKind::PdfSummary => "pdf_summary",
            RecordKind::CodeGeneration => "code_generation",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == tag)
    }

    /// Key under which the record is returned in a success envelope.
    pub fn envelope_key(&self) -> &'static str {
        match self {
            RecordKind::Resume => "resume",
            RecordKind::TextCorrection => "correction",
            RecordKind::Email => "email",
            RecordKind::PdfSummary => "summary",
            RecordKind::CodeGeneration => "codeGeneration",
        }
    }

    /// Path segment of `GET /api/records/:kind/:id`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            RecordKind::Resume => "resumes",
            RecordKind::TextCorrection => "corrections",
            RecordKind::Email => "emails",
            RecordKind::PdfSummary => "summaries",
            RecordKind::CodeGeneration => "code-generations",
        }
    }

    pub fn from_path_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.path_segment() == segment)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tool inputs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeInput {
    pub name: String,
    pub position: String,
    pub contact: String,
    pub experience: String,
    pub skills: String,
    pub education: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailInput {
    pub email_type: String,
    pub subject: String,
    pub recipient_name: String,
    pub key_points: String,
    pub tone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeInput {
    pub project_title: String,
    pub project_description: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    pub features: String,
    pub code_style: String,
}

/// Metadata and extracted text of an uploaded document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryInput {
    pub file_name: String,
    pub file_size: u64,
    pub summary_type: String,
    pub summary_length: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_areas: Option<String>,
    pub original_content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Record payloads
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    #[serde(flatten)]
    pub input: ResumeInput,
    pub generated_content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextCorrectionRecord {
    pub original_text: String,
    pub corrected_text: String,
    pub errors_found: i64,
    pub words_improved: i64,
    pub readability_score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRecord {
    #[serde(flatten)]
    pub input: EmailInput,
    pub generated_content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfSummaryRecord {
    #[serde(flatten)]
    pub input: SummaryInput,
    pub summary_content: String,
    pub original_pages: i64,
    pub summary_words: i64,
    pub compression_ratio: i64,
    /// Duration of the completion call in milliseconds.
    pub processing_time: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeGenerationRecord {
    #[serde(flatten)]
    pub input: CodeInput,
    pub generated_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_structure: Option<String>,
    pub lines_of_code: i64,
    pub estimated_time: i64,
}

/// Kind-specific payload of a record. Serializes as the bare payload object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordData {
    Resume(ResumeRecord),
    TextCorrection(TextCorrectionRecord),
    Email(EmailRecord),
    PdfSummary(PdfSummaryRecord),
    CodeGeneration(CodeGenerationRecord),
}

impl RecordData {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordData::Resume(_) => RecordKind::Resume,
            RecordData::TextCorrection(_) => RecordKind::TextCorrection,
            RecordData::Email(_) => RecordKind::Email,
            RecordData::PdfSummary(_) => RecordKind::PdfSummary,
            RecordData::CodeGeneration(_) => RecordKind::CodeGeneration,
        }
    }

    /// Rebuilds a payload from its stored JSON form. The kind is stored
    /// alongside the payload because the untagged form is ambiguous.
    pub fn from_json(kind: RecordKind, payload: Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            RecordKind::Resume => RecordData::Resume(serde_json::from_value(payload)?),
            RecordKind::TextCorrection => {
                RecordData::TextCorrection(serde_json::from_value(payload)?)
            }
            RecordKind::Email => RecordData::Email(serde_json::from_value(payload)?),
            RecordKind::PdfSummary => RecordData::PdfSummary(serde_json::from_value(payload)?),
            RecordKind::CodeGeneration => {
                RecordData::CodeGeneration(serde_json::from_value(payload)?)
            }
        })
    }
}

/// A stored, immutable record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: i64,
    #[serde(flatten)]
    pub data: RecordData,
    pub created_at: DateTime<Utc>,
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        self.data.kind()
    }
}
