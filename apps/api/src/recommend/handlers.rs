//! Axum route handlers for recommendations and job browsing.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::job::JobSummary;
use crate::recommend::engine::{recommend, Recommendation};
use crate::recommend::scoring::round2;
use crate::state::AppState;

/// Cities postings can be filed under.
pub const JOB_LOCATIONS: &[&str] = &[
    "Bangalore",
    "Hyderabad",
    "Pune",
    "Chennai",
    "Gurgaon",
    "Noida",
    "Mumbai",
    "Kolkata",
    "Ahmedabad",
    "Bhubaneswar",
    "Kochi",
];

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub location: Option<String>,
}

impl LocationQuery {
    fn validated(&self) -> Result<Option<&str>, AppError> {
        match self.location.as_deref() {
            Some(loc) if loc.trim().is_empty() => {
                Err(AppError::Validation("location cannot be empty".to_string()))
            }
            Some(loc) => Ok(Some(loc.trim())),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendedJob {
    pub job_id: i64,
    pub job_role: String,
    pub company_id: i64,
    pub location: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub content_score: f64,
    pub cgpa_score: f64,
    pub score: f64,
}

impl From<Recommendation> for RecommendedJob {
    fn from(rec: Recommendation) -> Self {
        Self {
            job_id: rec.job.id,
            job_role: rec.job.job_role,
            company_id: rec.job.company_id,
            location: rec.job.location,
            salary_min: rec.job.salary_min,
            salary_max: rec.job.salary_max,
            content_score: round2(rec.score.content_score),
            cgpa_score: round2(rec.score.cgpa_score),
            score: rec.score.total_score,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub student_id: i64,
    pub recommendations: Vec<RecommendedJob>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/students/:id/recommendations
///
/// Top-ranked postings for a student. Unknown students get an empty list.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let location = query.validated()?;
    let recs = recommend(state.store.as_ref(), student_id, location, &state.recommend).await?;

    Ok(Json(RecommendationsResponse {
        student_id,
        recommendations: recs.into_iter().map(RecommendedJob::from).collect(),
    }))
}

/// GET /api/v1/jobs
///
/// Postings newest first, optionally filtered by location.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<Vec<JobSummary>>, AppError> {
    let location = query.validated()?;
    let mut jobs = state.store.list_open_jobs(location).await?;
    jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(jobs.iter().map(JobSummary::from).collect()))
}

/// GET /api/v1/jobs/locations
pub async fn handle_job_locations() -> Json<Vec<&'static str>> {
    Json(JOB_LOCATIONS.to_vec())
}
