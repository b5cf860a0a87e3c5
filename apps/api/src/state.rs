use std::sync::Arc;

use crate::recommend::scoring::RecommendationConfig;
use crate::recommend::store::PlacementStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only view of students, postings and applications. Postgres in production.
    pub store: Arc<dyn PlacementStore>,
    pub recommend: RecommendationConfig,
}
