use std::sync::Arc;

use crate::generation::{DocumentTextExtractor, Generator};
use crate::storage::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub generator: Generator,
    /// In-memory by default; Postgres when `DATABASE_URL` is set.
    pub store: Arc<dyn RecordStore>,
    pub extractor: Arc<dyn DocumentTextExtractor>,
}
