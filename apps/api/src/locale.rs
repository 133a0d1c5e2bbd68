//! Request locale and the catalog of user-visible messages.
//!
//! The UI ships in Arabic (default) and English. The server only renders
//! error messages; page copy stays in the UI bundle.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::ACCEPT_LANGUAGE, request::Parts},
};

use crate::models::RecordKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Ar,
    En,
}

impl Locale {
    /// Picks the supported language with the highest q-value in an
    /// `Accept-Language` value; the earlier entry wins a tie. Falls back to Arabic.
    pub fn from_accept_language(header: &str) -> Self {
        let mut best: Option<(f32, Locale)> = None;

        for part in header.split(',') {
            let mut pieces = part.split(';');
            let tag = pieces.next().unwrap_or("").trim().to_ascii_lowercase();
            let quality = pieces
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);

            let primary = tag.split('-').next().unwrap_or("");
            let locale = match primary {
                "ar" => Locale::Ar,
                "en" => Locale::En,
                _ => continue,
            };

            if quality > 0.0 && best.map_or(true, |(q, _)| quality > q) {
                best = Some((quality, locale));
            }
        }

        best.map(|(_, locale)| locale).unwrap_or_default()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .map(Locale::from_accept_language)
            .unwrap_or_default())
    }
}

/// Every message a client can see.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    MalformedBody,
    MissingField(String),
    MissingFile,
    NotPdf,
    FileTooLarge,
    BodyTooLarge,
    UnreadablePdf,
    MissingSummaryOptions,
    InvalidId,
    NotFound,
    GenerationFailed(RecordKind),
    StorageFailed,
    Internal,
}

impl Message {
    pub fn render(&self, locale: Locale) -> String {
        match locale {
            Locale::Ar => self.arabic(),
            Locale::En => self.english(),
        }
    }

    fn english(&self) -> String {
        match self {
            Message::MalformedBody => "The request could not be read. Please check your input.".into(),
            Message::MissingField(field) => format!("The field '{field}' is required."),
            Message::MissingFile => "Please upload a PDF file.".into(),
            Message::NotPdf => "Only PDF files are accepted.".into(),
            Message::FileTooLarge => "The file is larger than the 10 MB limit.".into(),
            Message::BodyTooLarge => "The request is too large. Please shorten your text.".into(),
            Message::UnreadablePdf => "The PDF file could not be read or contains no text.".into(),
            Message::MissingSummaryOptions => "Please specify summary type and length.".into(),
            Message::InvalidId => "The record identifier is not valid.".into(),
            Message::NotFound => "The requested record was not found.".into(),
            Message::GenerationFailed(kind) => english_generation_failure(*kind).into(),
            Message::StorageFailed => "The result could not be saved. Please try again.".into(),
            Message::Internal => "An unexpected error occurred. Please try again.".into(),
        }
    }

    fn arabic(&self) -> String {
        match self {
            Message::MalformedBody => "تعذرت قراءة الطلب. يرجى التحقق من المدخلات.".into(),
            Message::MissingField(field) => format!("الحقل '{field}' مطلوب."),
            Message::MissingFile => "يرجى رفع ملف PDF.".into(),
            Message::NotPdf => "يُقبل فقط ملفات PDF.".into(),
            Message::FileTooLarge => "حجم الملف يتجاوز الحد الأقصى 10 ميجابايت.".into(),
            Message::BodyTooLarge => "حجم الطلب كبير جدًا. يرجى تقصير النص.".into(),
            Message::UnreadablePdf => "تعذرت قراءة ملف PDF أو أنه لا يحتوي على نص.".into(),
            Message::MissingSummaryOptions => "يرجى تحديد نوع الملخص وطوله.".into(),
            Message::InvalidId => "معرّف السجل غير صالح.".into(),
            Message::NotFound => "السجل المطلوب غير موجود.".into(),
            Message::GenerationFailed(kind) => arabic_generation_failure(*kind).into(),
            Message::StorageFailed => "تعذر حفظ النتيجة. يرجى المحاولة مرة أخرى.".into(),
            Message::Internal => "حدث خطأ غير متوقع. يرجى المحاولة مرة أخرى.".into(),
        }
    }
}

fn english_generation_failure(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Resume => "Failed to generate resume. Please check your input and try again.",
        RecordKind::TextCorrection => "Failed to correct Arabic text. Please try again.",
        RecordKind::Email => "Failed to generate email. Please check your input and try again.",
        RecordKind::PdfSummary => "Failed to summarize PDF. Please try again with a valid PDF file.",
        RecordKind::CodeGeneration => {
            "Failed to generate code. Please check your input and try again."
        }
    }
}

fn arabic_generation_failure(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Resume => "فشل إنشاء السيرة الذاتية. يرجى التحقق من المدخلات والمحاولة مرة أخرى.",
        RecordKind::TextCorrection => "فشل تصحيح النص العربي. يرجى المحاولة مرة أخرى.",
        RecordKind::Email => "فشل إنشاء البريد الإلكتروني. يرجى التحقق من المدخلات والمحاولة مرة أخرى.",
        RecordKind::PdfSummary => "فشل تلخيص ملف PDF. يرجى المحاولة مرة أخرى بملف PDF صالح.",
        RecordKind::CodeGeneration => "فشل إنشاء الكود. يرجى التحقق من المدخلات والمحاولة مرة أخرى.",
    }
}
