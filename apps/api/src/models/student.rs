use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::skills::SkillList;

/// Raw `students` row as stored; `skills` is an undecoded JSON blob.
#[derive(Debug, Clone, FromRow)]
pub struct StudentRow {
    pub id: i64,
    pub cgpa: Option<f64>,
    pub skills: Option<String>,
}

/// Everything the recommendation engine needs to know about a student.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: i64,
    /// Missing CGPA is stored as 0.0.
    pub cgpa: f64,
    pub skills: SkillList,
    /// Free-text project descriptions, in stored order.
    pub project_descriptions: Vec<String>,
}

impl StudentProfile {
    pub fn from_row(row: StudentRow, project_descriptions: Vec<String>) -> Self {
        Self {
            id: row.id,
            cgpa: row.cgpa.unwrap_or(0.0),
            skills: SkillList::from_stored(row.skills.as_deref()),
            project_descriptions,
        }
    }
}
