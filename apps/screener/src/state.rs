use std::sync::Arc;

use crate::config::Config;
use crate::engine::ScreeningEngine;
use crate::ingest::TextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Holds the readiness gate; every scoring handler goes through it.
    pub engine: Arc<ScreeningEngine>,
    /// Pluggable document reader. Default: UploadTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
    pub config: Config,
}
