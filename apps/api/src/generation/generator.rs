//! Generation client: one structured tool request in, one normalized result out.
//!
//! Flow per tool: render prompt template → completion call → (JSON tools)
//! fail-open coercion. Only transport/provider failures are returned as errors.

use std::sync::Arc;

use tracing::debug;

use crate::generation::coercion::{
    coerce_code, coerce_correction, coerce_summary, parse_envelope, CodeOutcome,
    CorrectionOutcome, SummaryOutcome,
};
use crate::generation::prompts::{
    render_template, summary_length_hint, CODE_PROMPT_TEMPLATE, CODE_SYSTEM,
    CORRECTION_PROMPT_TEMPLATE, CORRECTION_SYSTEM, EMAIL_PROMPT_TEMPLATE, EMAIL_SYSTEM,
    RESUME_PROMPT_TEMPLATE, RESUME_SYSTEM, SUMMARY_PROMPT_TEMPLATE, SUMMARY_SYSTEM,
};
use crate::llm_client::prompts::{ARABIC_HTML_INSTRUCTION, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{CompletionModel, CompletionRequest, LlmError};
use crate::models::{CodeInput, EmailInput, ResumeInput, SummaryInput};

const RESUME_MAX_TOKENS: u32 = 2000;
const CORRECTION_MAX_TOKENS: u32 = 1500;
const EMAIL_MAX_TOKENS: u32 = 1500;
const SUMMARY_MAX_TOKENS: u32 = 2000;
const CODE_MAX_TOKENS: u32 = 4000;

/// Shared by all handlers through `AppState`.
#[derive(Clone)]
pub struct Generator {
    model: Arc<dyn CompletionModel>,
}

impl Generator {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    /// Returns the resume as an HTML fragment; empty when the model returns nothing.
    pub async fn resume(&self, input: &ResumeInput) -> Result<String, LlmError> {
        let prompt = render_template(
            RESUME_PROMPT_TEMPLATE,
            &[
                ("name", &input.name),
                ("position", &input.position),
                ("contact", &input.contact),
                ("experience", &input.experience),
                ("skills", &input.skills),
                ("education", &input.education),
                ("format", ARABIC_HTML_INSTRUCTION),
            ],
        );
        self.html(RESUME_SYSTEM, &prompt, RESUME_MAX_TOKENS).await
    }

    pub async fn correct_arabic(&self, text: &str) -> Result<CorrectionOutcome, LlmError> {
        let prompt = render_template(
            CORRECTION_PROMPT_TEMPLATE,
            &[("text", text), ("json_only", JSON_ONLY_INSTRUCTION)],
        );
        let answer = self
            .json(CORRECTION_SYSTEM, &prompt, CORRECTION_MAX_TOKENS)
            .await?;
        Ok(coerce_correction(&parse_envelope(answer.as_deref()), text))
    }

    /// Returns the email as an HTML fragment; empty when the model returns nothing.
    pub async fn email(&self, input: &EmailInput) -> Result<String, LlmError> {
        let prompt = render_template(
            EMAIL_PROMPT_TEMPLATE,
            &[
                ("email_type", &input.email_type),
                ("subject", &input.subject),
                ("recipient_name", &input.recipient_name),
                ("key_points", &input.key_points),
                ("tone", &input.tone),
                ("format", ARABIC_HTML_INSTRUCTION),
            ],
        );
        self.html(EMAIL_SYSTEM, &prompt, EMAIL_MAX_TOKENS).await
    }

    pub async fn summarize(&self, input: &SummaryInput) -> Result<SummaryOutcome, LlmError> {
        let focus = input
            .focus_areas
            .as_deref()
            .map(|areas| format!("Focus areas: {areas}\n"))
            .unwrap_or_default();
        let prompt = render_template(
            SUMMARY_PROMPT_TEMPLATE,
            &[
                ("summary_type", &input.summary_type),
                ("length", summary_length_hint(&input.summary_length)),
                ("focus", &focus),
                ("content", &input.original_content),
                ("json_only", JSON_ONLY_INSTRUCTION),
            ],
        );
        let answer = self.json(SUMMARY_SYSTEM, &prompt, SUMMARY_MAX_TOKENS).await?;
        Ok(coerce_summary(&parse_envelope(answer.as_deref())))
    }

    pub async fn code(&self, input: &CodeInput) -> Result<CodeOutcome, LlmError> {
        let prompt = render_template(
            CODE_PROMPT_TEMPLATE,
            &[
                ("project_title", &input.project_title),
                ("project_description", &input.project_description),
                ("language", &input.language),
                (
                    "framework",
                    input.framework.as_deref().unwrap_or("None specified"),
                ),
                ("features", &input.features),
                ("code_style", &input.code_style),
                ("json_only", JSON_ONLY_INSTRUCTION),
            ],
        );
        let answer = self.json(CODE_SYSTEM, &prompt, CODE_MAX_TOKENS).await?;
        Ok(coerce_code(&parse_envelope(answer.as_deref())))
    }

    async fn html(&self, system: &str, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        let answer = self
            .model
            .complete(CompletionRequest {
                system: Some(system),
                prompt,
                max_tokens,
                json_mode: false,
            })
            .await?;
        debug!(chars = answer.as_ref().map_or(0, String::len), "html completion received");
        Ok(answer.unwrap_or_default())
    }

    async fn json(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<Option<String>, LlmError> {
        self.model
            .complete(CompletionRequest {
                system: Some(system),
                prompt,
                max_tokens,
                json_mode: true,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::stub::StubModel;

    fn resume_input() -> ResumeInput {
        ResumeInput {
            name: "أحمد علي".to_string(),
            position: "مهندس برمجيات".to_string(),
            contact: "ahmed@example.com".to_string(),
            experience: "5 years backend".to_string(),
            skills: "Rust, SQL".to_string(),
            education: "BSc CS".to_string(),
        }
    }

    fn generator(stub: &Arc<StubModel>) -> Generator {
        Generator::new(Arc::clone(stub) as Arc<dyn CompletionModel>)
    }

    #[tokio::test]
    async fn test_resume_returns_raw_html_and_embeds_fields() {
        let stub = Arc::new(StubModel::text("<section>cv</section>"));
        let html = generator(&stub).resume(&resume_input()).await.unwrap();

        assert_eq!(html, "<section>cv</section>");
        assert_eq!(stub.calls(), 1);
        assert_eq!(stub.last_json_mode(), Some(false));
        let prompt = stub.last_prompt().unwrap();
        assert!(prompt.contains("Name: أحمد علي"));
        assert!(prompt.contains("Skills: Rust, SQL"));
        assert!(!prompt.contains("{format}"));
    }

    #[tokio::test]
    async fn test_html_tools_fail_open_to_empty_string() {
        let stub = Arc::new(StubModel::empty());
        let gen = generator(&stub);

        assert_eq!(gen.resume(&resume_input()).await.unwrap(), "");
        let email = EmailInput {
            email_type: "thanks".to_string(),
            subject: "s".to_string(),
            recipient_name: "r".to_string(),
            key_points: "k".to_string(),
            tone: "formal".to_string(),
        };
        assert_eq!(gen.email(&email).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_correction_uses_json_mode_and_coerces() {
        let stub = Arc::new(StubModel::text(
            r#"{"correctedText": "ذهبت إلى المدرسة", "errorsFound": 1}"#,
        ));
        let outcome = generator(&stub)
            .correct_arabic("ذهبت الى المدرسه")
            .await
            .unwrap();

        assert_eq!(stub.last_json_mode(), Some(true));
        assert_eq!(outcome.corrected_text, "ذهبت إلى المدرسة");
        assert_eq!(outcome.errors_found, 1);
        assert_eq!(outcome.words_improved, 0);
        assert_eq!(outcome.readability_score, 0);
    }

    #[tokio::test]
    async fn test_correction_with_unparsable_answer_keeps_original() {
        let stub = Arc::new(StubModel::text("Sorry, I cannot help with that."));
        let outcome = generator(&stub).correct_arabic("نص").await.unwrap();
        assert_eq!(outcome.corrected_text, "نص");
        assert_eq!(outcome.errors_found, 0);
    }

    #[tokio::test]
    async fn test_summary_prompt_includes_length_hint_and_focus() {
        let stub = Arc::new(StubModel::text(r#"{"summary": "ملخص", "summaryWords": 1}"#));
        let input = SummaryInput {
            file_name: "report.pdf".to_string(),
            file_size: 2048,
            summary_type: "academic".to_string(),
            summary_length: "medium".to_string(),
            focus_areas: Some("methodology".to_string()),
            original_content: "Chapter one text".to_string(),
        };

        let outcome = generator(&stub).summarize(&input).await.unwrap();
        assert_eq!(outcome.summary, "ملخص");
        assert_eq!(outcome.summary_words, 1);
        assert_eq!(outcome.original_pages, 0);

        let prompt = stub.last_prompt().unwrap();
        assert!(prompt.contains("500-700 words"));
        assert!(prompt.contains("Focus areas: methodology"));
        assert!(prompt.contains("Content: Chapter one text"));
    }

    #[tokio::test]
    async fn test_summary_without_focus_omits_focus_line() {
        let stub = Arc::new(StubModel::text("{}"));
        let input = SummaryInput {
            file_name: "a.pdf".to_string(),
            file_size: 1,
            summary_type: "general".to_string(),
            summary_length: "short".to_string(),
            focus_areas: None,
            original_content: "x".to_string(),
        };
        generator(&stub).summarize(&input).await.unwrap();
        assert!(!stub.last_prompt().unwrap().contains("Focus areas"));
    }

    #[tokio::test]
    async fn test_code_without_framework_says_none_specified() {
        let stub = Arc::new(StubModel::text(
            r#"{"code": "print('hi')", "linesOfCode": 1, "estimatedTime": 2}"#,
        ));
        let input = CodeInput {
            project_title: "Hello".to_string(),
            project_description: "Greets".to_string(),
            language: "python".to_string(),
            framework: None,
            features: "greeting".to_string(),
            code_style: "clean".to_string(),
        };

        let outcome = generator(&stub).code(&input).await.unwrap();
        assert_eq!(outcome.code, "print('hi')");
        assert_eq!(outcome.estimated_time, 2);
        assert!(outcome.file_structure.is_none());
        assert!(stub
            .last_prompt()
            .unwrap()
            .contains("Framework: None specified"));
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let stub = Arc::new(StubModel::failing(503));
        let err = generator(&stub).correct_arabic("نص").await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 503, .. }));
    }
}
