//! Hybrid job ranking for one student.
//!
//! Algorithm:
//! 1. Student document = skills + project descriptions; job document = role + description + skills.
//! 2. Fit TF-IDF on the student document plus every job document.
//! 3. Cosine similarity between the student and each job, carried as (job, similarity) pairs.
//! 4. Skip applied jobs; score = similarity × content weight + CGPA score, rounded to 2dp.
//! 5. Keep scores above the threshold, sort descending (stable), truncate.

use std::collections::HashSet;

use anyhow::anyhow;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::models::student::StudentProfile;
use crate::recommend::scoring::{hybrid_score, HybridScore, RecommendationConfig};
use crate::recommend::store::PlacementStore;
use crate::recommend::tfidf::{cosine_similarity, TfIdfVectorizer};

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub job: JobPosting,
    pub score: HybridScore,
}

pub fn student_document(student: &StudentProfile) -> String {
    format!(
        "{} {}",
        student.skills.joined(),
        student.project_descriptions.join(" ")
    )
}

pub fn job_document(job: &JobPosting) -> String {
    format!(
        "{} {} {}",
        job.job_role,
        job.description,
        job.required_skills.joined()
    )
}

/// Cosine similarity of the student against every job, paired with the job it belongs to.
///
/// A corpus with no usable vocabulary yields 0.0 for every job.
pub fn content_similarities<'a>(
    student: &StudentProfile,
    jobs: &'a [JobPosting],
) -> Vec<(&'a JobPosting, f64)> {
    let student_doc = student_document(student);
    let job_docs: Vec<(&JobPosting, String)> = jobs.iter().map(|j| (j, job_document(j))).collect();

    let corpus: Vec<&str> = std::iter::once(student_doc.as_str())
        .chain(job_docs.iter().map(|(_, doc)| doc.as_str()))
        .collect();

    let vectorizer = match TfIdfVectorizer::fit(corpus.as_slice()) {
        Ok(v) => v,
        Err(e) => {
            debug!(
                "Student {}: {e}; falling back to eligibility-only scoring",
                student.id
            );
            return jobs.iter().map(|j| (j, 0.0)).collect();
        }
    };

    debug!(
        "Student {}: fitted corpus of {} documents, vocabulary {}",
        student.id,
        corpus.len(),
        vectorizer.vocabulary_len()
    );

    let student_vec = vectorizer.transform(&student_doc);
    job_docs
        .into_iter()
        .map(|(job, doc)| {
            let job_vec = vectorizer.transform(&doc);
            (job, cosine_similarity(&student_vec, &job_vec))
        })
        .collect()
}

/// Ranks `jobs` for `student`. Pure: reads only its arguments.
pub fn rank_jobs(
    student: &StudentProfile,
    jobs: &[JobPosting],
    applied: &HashSet<i64>,
    config: &RecommendationConfig,
) -> Vec<Recommendation> {
    if jobs.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<Recommendation> = content_similarities(student, jobs)
        .into_iter()
        .filter(|(job, _)| !applied.contains(&job.id))
        .map(|(job, similarity)| Recommendation {
            job: job.clone(),
            score: hybrid_score(similarity, student.cgpa, job.cgpa_required, config),
        })
        .filter(|rec| rec.score.total_score > config.min_score)
        .collect();

    // sort_by is stable, so equal scores keep job order.
    ranked.sort_by(|a, b| b.score.total_score.total_cmp(&a.score.total_score));
    ranked.truncate(config.max_results);
    ranked
}

/// Loads a snapshot from `store` and ranks it. Unknown students get an empty list.
pub async fn recommend(
    store: &dyn PlacementStore,
    student_id: i64,
    location: Option<&str>,
    config: &RecommendationConfig,
) -> Result<Vec<Recommendation>, AppError> {
    let Some(student) = store.get_student(student_id).await? else {
        debug!("Student {student_id} not found; no recommendations");
        return Ok(Vec::new());
    };

    let jobs = store.list_open_jobs(location).await?;
    if jobs.is_empty() {
        return Ok(Vec::new());
    }

    let applied = store.get_applications(student_id).await?;
    let job_count = jobs.len();
    let config = config.clone();

    // Vectorization is CPU-bound; keep it off the async workers.
    let ranked = tokio::task::spawn_blocking(move || rank_jobs(&student, &jobs, &applied, &config))
        .await
        .map_err(|e| AppError::Internal(anyhow!("recommendation task failed: {e}")))?;

    info!(
        "Student {student_id}: {} recommendations from {job_count} postings",
        ranked.len()
    );
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::scoring::round2;
    use crate::recommend::store::memory::{job, student, InMemoryStore};

    fn scenario_student() -> StudentProfile {
        student(1, 8.0, vec!["python", "sql"], vec![])
    }

    fn backend_job(id: i64, cgpa: f64) -> JobPosting {
        job(
            id,
            "Backend Developer",
            "backend developer python django role",
            vec!["python", "django"],
            cgpa,
        )
    }

    fn ids(recs: &[Recommendation]) -> Vec<i64> {
        recs.iter().map(|r| r.job.id).collect()
    }

    #[test]
    fn test_documents_are_space_joined_in_order() {
        let s = student(1, 0.0, vec!["rust", "sql"], vec!["built a parser", "cli tool"]);
        assert_eq!(student_document(&s), "rust sql built a parser cli tool");
        let j = backend_job(1, 7.0);
        assert_eq!(
            job_document(&j),
            "Backend Developer backend developer python django role python django"
        );
    }

    #[test]
    fn test_eligible_student_with_overlap() {
        let recs = rank_jobs(
            &scenario_student(),
            &[backend_job(10, 7.0)],
            &HashSet::new(),
            &RecommendationConfig::default(),
        );
        assert_eq!(recs.len(), 1);
        let score = recs[0].score;
        assert_eq!(score.cgpa_score, 30.0);
        // cos = 0.212831... between "python sql" and the posting document.
        assert!((score.content_score - 14.8982).abs() < 1e-4, "{score:?}");
        assert_eq!(score.total_score, 44.90);
    }

    #[test]
    fn test_ineligible_student_gets_partial_cgpa_score() {
        let recs = rank_jobs(
            &scenario_student(),
            &[backend_job(10, 9.0)],
            &HashSet::new(),
            &RecommendationConfig::default(),
        );
        assert_eq!(recs.len(), 1);
        let score = recs[0].score;
        assert!((score.cgpa_score - 8.0 / 9.0 * 30.0).abs() < 1e-12);
        assert_eq!(round2(score.cgpa_score), 26.67);
        assert!((score.content_score - 14.8982).abs() < 1e-4, "{score:?}");
        assert_eq!(score.total_score, 41.56);
    }

    #[test]
    fn test_applied_job_is_never_recommended() {
        let applied: HashSet<i64> = [10].into_iter().collect();
        let recs = rank_jobs(
            &scenario_student(),
            &[backend_job(10, 7.0)],
            &applied,
            &RecommendationConfig::default(),
        );
        assert!(recs.is_empty());
    }

    #[test]
    fn test_top_five_of_six_descending() {
        // CGPA-only scores: 9.0 / req * 30, all distinct and above 25.
        let s = student(1, 9.0, vec![], vec![]);
        let reqs = [(1, 9.6), (2, 9.1), (3, 9.5), (4, 9.2), (5, 9.4), (6, 9.3)];
        let jobs: Vec<JobPosting> = reqs
            .iter()
            .map(|&(id, req)| job(id, "Analyst", "data analysis", vec!["excel"], req))
            .collect();

        let recs = rank_jobs(&s, &jobs, &HashSet::new(), &RecommendationConfig::default());
        assert_eq!(ids(&recs), vec![2, 4, 6, 5, 3]);
        assert!(recs
            .windows(2)
            .all(|w| w[0].score.total_score > w[1].score.total_score));
    }

    #[test]
    fn test_degenerate_corpus_scores_on_cgpa_only() {
        let s = student(1, 8.0, vec![], vec![]);
        let jobs = vec![job(1, "", "", vec![], 7.0), job(2, "", "", vec![], 0.0)];
        let recs = rank_jobs(&s, &jobs, &HashSet::new(), &RecommendationConfig::default());
        assert_eq!(ids(&recs), vec![1]);
        assert_eq!(recs[0].score.content_score, 0.0);
        assert_eq!(recs[0].score.total_score, 30.0);
    }

    #[test]
    fn test_stop_word_only_text_is_degenerate() {
        let s = student(1, 8.0, vec!["the"], vec!["and of which"]);
        let jobs = vec![job(1, "The", "of the", vec!["a"], 7.0)];
        let recs = rank_jobs(&s, &jobs, &HashSet::new(), &RecommendationConfig::default());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].score.content_score, 0.0);
    }

    #[test]
    fn test_student_without_skills_keeps_cgpa_score_when_jobs_have_text() {
        let s = student(1, 8.0, vec![], vec![]);
        let recs = rank_jobs(
            &s,
            &[backend_job(1, 7.0)],
            &HashSet::new(),
            &RecommendationConfig::default(),
        );
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].score.content_score, 0.0);
        assert_eq!(recs[0].score.cgpa_score, 30.0);
    }

    #[test]
    fn test_ties_keep_job_order() {
        let s = student(1, 8.0, vec![], vec![]);
        let jobs = vec![
            job(3, "", "", vec![], 7.0),
            job(1, "", "", vec![], 7.0),
            job(2, "", "", vec![], 7.0),
        ];
        let recs = rank_jobs(&s, &jobs, &HashSet::new(), &RecommendationConfig::default());
        assert_eq!(ids(&recs), vec![3, 1, 2]);
    }

    #[test]
    fn test_score_equal_to_threshold_is_excluded() {
        // 5.0 / 6.0 * 30 rounds to exactly 25.00
        let s = student(1, 5.0, vec![], vec![]);
        let recs = rank_jobs(
            &s,
            &[job(1, "", "", vec![], 6.0)],
            &HashSet::new(),
            &RecommendationConfig::default(),
        );
        assert!(recs.is_empty());
    }

    #[test]
    fn test_no_jobs_yields_empty() {
        let recs = rank_jobs(
            &scenario_student(),
            &[],
            &HashSet::new(),
            &RecommendationConfig::default(),
        );
        assert!(recs.is_empty());
    }

    #[test]
    fn test_scores_within_component_ranges() {
        let s = student(1, 7.5, vec!["python", "rust"], vec!["rust web server"]);
        let jobs = vec![
            backend_job(1, 7.0),
            job(2, "Rust Engineer", "rust systems", vec!["rust"], 8.0),
            job(3, "Designer", "figma", vec!["ux"], 0.0),
            job(4, "Rust Engineer", "rust web server python", vec!["rust", "python"], 6.0),
        ];
        let config = RecommendationConfig {
            min_score: 0.0,
            ..RecommendationConfig::default()
        };
        let recs = rank_jobs(&s, &jobs, &HashSet::new(), &config);
        assert!(!recs.is_empty());
        for r in &recs {
            assert!((0.0..=70.0).contains(&r.score.content_score));
            assert!((0.0..=30.0).contains(&r.score.cgpa_score));
            assert!((0.0..=100.0).contains(&r.score.total_score));
        }
        assert!(recs
            .windows(2)
            .all(|w| w[0].score.total_score >= w[1].score.total_score));
    }

    #[test]
    fn test_content_similarity_pairs_follow_jobs() {
        let s = student(1, 0.0, vec!["rust"], vec![]);
        let jobs = vec![
            job(7, "Designer", "figma", vec![], 0.0),
            job(8, "Rust Engineer", "rust", vec!["rust"], 0.0),
        ];
        let pairs = content_similarities(&s, &jobs);
        assert_eq!(pairs[0].0.id, 7);
        assert_eq!(pairs[0].1, 0.0);
        assert_eq!(pairs[1].0.id, 8);
        assert!(pairs[1].1 > 0.0);
    }

    #[test]
    fn test_custom_result_cap() {
        let s = student(1, 9.0, vec![], vec![]);
        let jobs: Vec<JobPosting> = (1..=4).map(|id| job(id, "", "", vec![], 8.0)).collect();
        let config = RecommendationConfig {
            max_results: 2,
            ..RecommendationConfig::default()
        };
        assert_eq!(ids(&rank_jobs(&s, &jobs, &HashSet::new(), &config)), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_unknown_student_gets_empty_list() {
        let store = InMemoryStore::default().with_job(backend_job(1, 7.0));
        let recs = recommend(&store, 42, None, &RecommendationConfig::default())
            .await
            .unwrap();
        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn test_recommend_excludes_stored_applications() {
        let store = InMemoryStore::default()
            .with_student(scenario_student())
            .with_job(backend_job(10, 7.0))
            .with_job(backend_job(11, 7.0))
            .with_application(1, 10);
        let recs = recommend(&store, 1, None, &RecommendationConfig::default())
            .await
            .unwrap();
        assert_eq!(ids(&recs), vec![11]);
    }

    #[tokio::test]
    async fn test_recommend_respects_location_filter() {
        let mut pune = backend_job(12, 7.0);
        pune.location = "Pune".to_string();
        let store = InMemoryStore::default()
            .with_student(scenario_student())
            .with_job(backend_job(10, 7.0))
            .with_job(pune);
        let recs = recommend(&store, 1, Some("Pune"), &RecommendationConfig::default())
            .await
            .unwrap();
        assert_eq!(ids(&recs), vec![12]);
    }

    #[tokio::test]
    async fn test_recommend_with_no_postings_is_empty() {
        let store = InMemoryStore::default().with_student(scenario_student());
        let recs = recommend(&store, 1, None, &RecommendationConfig::default())
            .await
            .unwrap();
        assert!(recs.is_empty());
    }
}
