pub mod health;

use axum::{routing::get, Router};

use crate::recommend::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Recommendations
        .route(
            "/api/v1/students/:id/recommendations",
            get(handlers::handle_recommendations),
        )
        // Job browsing
        .route("/api/v1/jobs", get(handlers::handle_list_jobs))
        .route("/api/v1/jobs/locations", get(handlers::handle_job_locations))
        .with_state(state)
}
