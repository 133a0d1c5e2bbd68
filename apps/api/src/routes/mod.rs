pub mod health;

use std::path::Path;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;
use crate::tools::handlers;
use crate::tools::multipart::UPLOAD_BODY_LIMIT;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/generate-resume",
            post(handlers::handle_generate_resume),
        )
        .route("/api/correct-arabic", post(handlers::handle_correct_arabic))
        .route("/api/generate-email", post(handlers::handle_generate_email))
        .route(
            "/api/summarize-pdf",
            post(handlers::handle_summarize_pdf).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/generate-code", post(handlers::handle_generate_code))
        .route("/api/records/:kind/:id", get(handlers::handle_get_record))
        .with_state(state)
}

/// Serves the built UI from `dir`; unknown paths fall back to `index.html`
/// so client-side routes resolve.
pub fn with_static_ui(router: Router, dir: &Path) -> Router {
    let index = ServeFile::new(dir.join("index.html"));
    router.fallback_service(ServeDir::new(dir).fallback(index))
}
