// Shared prompt fragments. Each tool's templates live in generation::prompts.

/// Appended to every prompt whose answer must be a single JSON object.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Appended to every prompt whose answer is rendered directly as HTML in the UI.
pub const ARABIC_HTML_INSTRUCTION: &str = "Write the content in Arabic. \
    Format it as clean HTML with right-to-left (dir=\"rtl\") styling. \
    Return only the HTML content without <html>, <head> or <body> wrapper elements.";
