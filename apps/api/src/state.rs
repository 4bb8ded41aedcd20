use std::sync::Arc;

use crate::recommendation::RecommendationEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Catalog, scorer, and the optional AI and job-search providers, wired once at startup.
    pub engine: Arc<RecommendationEngine>,
}
