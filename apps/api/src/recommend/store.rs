//! Read interface over students, postings and applications.
//!
//! The engine only depends on `PlacementStore`; production wires in `PgPlacementStore`.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::job::{JobPosting, JobPostingRow};
use crate::models::student::{StudentProfile, StudentRow};

#[async_trait]
pub trait PlacementStore: Send + Sync {
    /// `None` when no student has this id.
    async fn get_student(&self, student_id: i64) -> Result<Option<StudentProfile>, AppError>;

    /// All open postings in ascending id order, optionally restricted to one location.
    async fn list_open_jobs(&self, location: Option<&str>) -> Result<Vec<JobPosting>, AppError>;

    /// Ids of every posting the student has applied to.
    async fn get_applications(&self, student_id: i64) -> Result<HashSet<i64>, AppError>;
}

#[derive(Clone)]
pub struct PgPlacementStore {
    pool: PgPool,
}

impl PgPlacementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlacementStore for PgPlacementStore {
    async fn get_student(&self, student_id: i64) -> Result<Option<StudentProfile>, AppError> {
        let row: Option<StudentRow> =
            sqlx::query_as("SELECT id, cgpa, skills FROM students WHERE id = $1")
                .bind(student_id)
                .fetch_optional(&self.pool)
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let descriptions: Vec<Option<String>> = sqlx::query_scalar(
            "SELECT description FROM student_projects WHERE student_id = $1 ORDER BY id",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        let descriptions = descriptions
            .into_iter()
            .flatten()
            .filter(|d| !d.trim().is_empty())
            .collect();

        Ok(Some(StudentProfile::from_row(row, descriptions)))
    }

    async fn list_open_jobs(&self, location: Option<&str>) -> Result<Vec<JobPosting>, AppError> {
        let rows: Vec<JobPostingRow> = sqlx::query_as(
            r#"
            SELECT id, company_id, job_role, description, required_skills, cgpa_required,
                   location, salary_min, salary_max, created_at
            FROM job_postings
            WHERE $1::TEXT IS NULL OR location = $1
            ORDER BY id
            "#,
        )
        .bind(location)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(JobPosting::from).collect())
    }

    async fn get_applications(&self, student_id: i64) -> Result<HashSet<i64>, AppError> {
        let job_ids: Vec<i64> =
            sqlx::query_scalar("SELECT job_id FROM job_applications WHERE student_id = $1")
                .bind(student_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(job_ids.into_iter().collect())
    }
}
