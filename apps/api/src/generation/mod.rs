// Generation client: prompt assembly, completion calls, fail-open coercion.
// All completion calls go through llm_client — no direct HTTP calls here.

pub mod coercion;
pub mod generator;
pub mod pdf_text;
pub mod prompts;

pub use generator::Generator;
pub use pdf_text::{DocumentTextExtractor, PdfTextExtractor};
