use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::skills::SkillList;

/// Raw `job_postings` row as stored.
#[derive(Debug, Clone, FromRow)]
pub struct JobPostingRow {
    pub id: i64,
    pub company_id: i64,
    pub job_role: String,
    pub description: Option<String>,
    pub required_skills: Option<String>,
    pub cgpa_required: Option<f64>,
    pub location: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: i64,
    pub company_id: i64,
    pub job_role: String,
    pub description: String,
    pub required_skills: SkillList,
    /// 0.0 when the posting states no requirement.
    pub cgpa_required: f64,
    pub location: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<JobPostingRow> for JobPosting {
    fn from(row: JobPostingRow) -> Self {
        Self {
            id: row.id,
            company_id: row.company_id,
            job_role: row.job_role,
            description: row.description.unwrap_or_default(),
            required_skills: SkillList::from_stored(row.required_skills.as_deref()),
            cgpa_required: row.cgpa_required.unwrap_or(0.0),
            location: row.location,
            salary_min: row.salary_min,
            salary_max: row.salary_max,
            created_at: row.created_at,
        }
    }
}

/// Listing view of a posting, without the long-form text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub job_id: i64,
    pub job_role: String,
    pub company_id: i64,
    pub location: String,
    pub cgpa_required: f64,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<&JobPosting> for JobSummary {
    fn from(job: &JobPosting) -> Self {
        Self {
            job_id: job.id,
            job_role: job.job_role.clone(),
            company_id: job.company_id,
            location: job.location.clone(),
            cgpa_required: job.cgpa_required,
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            created_at: job.created_at,
        }
    }
}
