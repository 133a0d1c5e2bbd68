// All LLM prompt constants for the tools.
// Reuses cross-cutting fragments from llm_client::prompts.

pub const RESUME_SYSTEM: &str =
    "You are an expert resume writer for the Arabic-speaking job market.";

/// Placeholders: {name} {position} {contact} {experience} {skills} {education} {format}
pub const RESUME_PROMPT_TEMPLATE: &str = "Create a professional resume in Arabic for the following person.

Name: {name}
Desired Position: {position}
Contact Info: {contact}
Experience: {experience}
Skills: {skills}
Education: {education}

Create a well-structured, professional resume with appropriate sections and formatting.
{format}";

pub const CORRECTION_SYSTEM: &str =
    "You are an expert Arabic language corrector. Provide corrections and improvements in JSON format.";

/// Placeholders: {text} {json_only}
pub const CORRECTION_PROMPT_TEMPLATE: &str = r#"Correct and improve the following Arabic text. Fix grammar, spelling, and style issues while keeping the original meaning.

Original text: {text}

Respond with JSON in this format:
{
  "correctedText": "the corrected Arabic text",
  "errorsFound": number of errors found,
  "wordsImproved": number of words improved,
  "readabilityScore": readability score from 0-100
}
{json_only}"#;

pub const EMAIL_SYSTEM: &str =
    "You are an expert in writing professional Arabic emails. Create formal, well-structured emails.";

/// Placeholders: {email_type} {subject} {recipient_name} {key_points} {tone} {format}
pub const EMAIL_PROMPT_TEMPLATE: &str = "Create a professional email in Arabic with the following details:

Email Type: {email_type}
Subject: {subject}
Recipient Name: {recipient_name}
Key Points: {key_points}
Tone: {tone}

The email must include:
- A proper greeting
- A clear subject line
- Well-organized content based on the key points
- An appropriate closing
- A professional tone matching the requested style

{format}";

pub const SUMMARY_SYSTEM: &str =
    "You are an expert in creating summaries of academic and professional documents in Arabic.";

/// Placeholders: {summary_type} {length} {focus} {content} {json_only}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Create a {summary_type} summary of the following document content in Arabic.

Summary length: {length}
{focus}
Content: {content}

Respond with JSON in this format:
{
  "summary": "the summary in Arabic",
  "keyPoints": ["key point 1", "key point 2"],
  "originalPages": estimated number of pages,
  "summaryWords": number of words in summary,
  "compressionRatio": percentage of compression
}
{json_only}"#;

pub const CODE_SYSTEM: &str = "You are an expert senior software developer with years of experience \
    in creating professional, secure, and scalable applications. Provide complete, production-ready \
    code solutions with proper architecture and best practices.";

/// Placeholders: {project_title} {project_description} {language} {framework} {features} {code_style} {json_only}
pub const CODE_PROMPT_TEMPLATE: &str = r#"Create a professional and complete code solution for the following project:

Project Title: {project_title}
Project Description: {project_description}
Programming Language: {language}
Framework: {framework}
Required Features: {features}
Code Style: {code_style}

Provide a complete, production-ready solution with:
1. Clean, well-structured code following best practices
2. Proper error handling and validation
3. Comments in Arabic for key functions
4. Secure and efficient implementation
5. Responsive design (if applicable)

Respond with JSON in this format:
{
  "code": "the complete code solution",
  "fileStructure": "recommended file/folder structure",
  "linesOfCode": estimated number of lines,
  "estimatedTime": estimated development time in hours,
  "technicalNotes": "important technical considerations"
}
{json_only}"#;

/// Word-count hint for a summary length option; unknown options pass through.
pub fn summary_length_hint(length: &str) -> &str {
    match length.trim() {
        "short" => "200-300 words",
        "medium" => "500-700 words",
        "long" => "1000+ words",
        _ => length,
    }
}

/// Substitutes `{key}` placeholders in a single left-to-right pass.
///
/// Substituted values are never scanned again, so user text containing
/// `{placeholder}` markers is inserted verbatim. Unknown placeholders and
/// stray braces (the JSON examples in the templates) are kept as-is.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substituted = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (close, *value))
        });

        match substituted {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
