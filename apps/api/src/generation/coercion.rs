//! Fail-open coercion of model output into record fields.
//!
//! A malformed or partial model answer is never an error: every field falls
//! back to a safe default here, at the single boundary between the external
//! response and the internal record.

use serde_json::{Map, Value};
use tracing::warn;

use crate::llm_client::strip_json_fences;

pub type Envelope = Map<String, Value>;

/// Normalized result of the Arabic correction tool.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionOutcome {
    pub corrected_text: String,
    pub errors_found: i64,
    pub words_improved: i64,
    pub readability_score: i64,
}

/// Normalized result of the document summary tool.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOutcome {
    pub summary: String,
    pub original_pages: i64,
    pub summary_words: i64,
    pub compression_ratio: i64,
}

/// Normalized result of the code generation tool.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeOutcome {
    pub code: String,
    pub file_structure: Option<String>,
    pub lines_of_code: i64,
    pub estimated_time: i64,
}

/// Parses a model answer that should be a JSON object.
/// Anything else becomes an empty object.
pub fn parse_envelope(text: Option<&str>) -> Envelope {
    let Some(text) = text else {
        warn!("model returned no content; using defaults");
        return Envelope::new();
    };

    match serde_json::from_str::<Value>(strip_json_fences(text)) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            warn!(kind = value_kind(&other), "model returned non-object JSON; using defaults");
            Envelope::new()
        }
        Err(e) => {
            warn!(error = %e, "model returned invalid JSON; using defaults");
            Envelope::new()
        }
    }
}

/// Non-empty string at `key`, otherwise `default`.
pub fn text_or(envelope: &Envelope, key: &str, default: &str) -> String {
    envelope
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Non-negative integer at `key`, otherwise 0.
///
/// Accepts JSON numbers (floats are rounded) and numeric strings, including a
/// trailing `%` ("75%").
pub fn count_or_zero(envelope: &Envelope, key: &str) -> i64 {
    let number = match envelope.get(key) {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(round_to_i64)),
        Some(Value::String(s)) => {
            let s = s.trim().trim_end_matches('%').trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(round_to_i64))
        }
        _ => None,
    };

    number.filter(|n| *n >= 0).unwrap_or(0)
}

pub fn coerce_correction(envelope: &Envelope, original_text: &str) -> CorrectionOutcome {
    CorrectionOutcome {
        corrected_text: text_or(envelope, "correctedText", original_text),
        errors_found: count_or_zero(envelope, "errorsFound"),
        words_improved: count_or_zero(envelope, "wordsImproved"),
        readability_score: count_or_zero(envelope, "readabilityScore"),
    }
}

pub fn coerce_summary(envelope: &Envelope) -> SummaryOutcome {
    SummaryOutcome {
        summary: text_or(envelope, "summary", ""),
        original_pages: count_or_zero(envelope, "originalPages"),
        summary_words: count_or_zero(envelope, "summaryWords"),
        compression_ratio: count_or_zero(envelope, "compressionRatio"),
    }
}

pub fn coerce_code(envelope: &Envelope) -> CodeOutcome {
    let file_structure = text_or(envelope, "fileStructure", "");
    CodeOutcome {
        code: text_or(envelope, "code", ""),
        file_structure: (!file_structure.is_empty()).then_some(file_structure),
        lines_of_code: count_or_zero(envelope, "linesOfCode"),
        estimated_time: count_or_zero(envelope, "estimatedTime"),
    }
}

fn round_to_i64(f: f64) -> i64 {
    if f.is_finite() {
        f.round() as i64
    } else {
        0
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
