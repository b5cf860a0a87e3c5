use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Weights and cut-offs for hybrid job scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Points awarded for a cosine similarity of 1.0.
    pub content_weight: f64,
    /// Points awarded for meeting the CGPA requirement.
    pub cgpa_weight: f64,
    /// Recommendations must score strictly above this.
    pub min_score: f64,
    pub max_results: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            content_weight: 70.0,
            cgpa_weight: 30.0,
            min_score: 25.0,
            max_results: 5,
        }
    }
}

impl RecommendationConfig {
    /// Rejects weights and thresholds that are negative or not finite.
    pub fn validate(&self) -> Result<()> {
        let bounds = [
            ("RECOMMEND_CONTENT_WEIGHT", self.content_weight),
            ("RECOMMEND_CGPA_WEIGHT", self.cgpa_weight),
            ("RECOMMEND_MIN_SCORE", self.min_score),
        ];
        for (key, value) in bounds {
            if !value.is_finite() || value < 0.0 {
                bail!("{key} must be a finite, non-negative number (got {value})");
            }
        }
        Ok(())
    }
}

/// Component breakdown of one job's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridScore {
    pub content_score: f64,
    pub cgpa_score: f64,
    /// `content_score + cgpa_score`, rounded to two decimals.
    pub total_score: f64,
}

/// Content contribution: similarity in [0, 1] scaled by the content weight.
pub fn content_score(similarity: f64, config: &RecommendationConfig) -> f64 {
    let similarity = if similarity.is_finite() {
        similarity.clamp(0.0, 1.0)
    } else {
        0.0
    };
    similarity * config.content_weight
}

/// Eligibility contribution from comparing CGPAs.
///
/// Full weight when the student meets the requirement, a proportional share when
/// below it, and zero when the posting states no requirement.
pub fn cgpa_score(student_cgpa: f64, required_cgpa: f64, config: &RecommendationConfig) -> f64 {
    if !required_cgpa.is_finite() || required_cgpa <= 0.0 {
        return 0.0;
    }
    if !student_cgpa.is_finite() || student_cgpa <= 0.0 {
        return 0.0;
    }
    if student_cgpa >= required_cgpa {
        return config.cgpa_weight;
    }
    (student_cgpa / required_cgpa * config.cgpa_weight)
        .min(config.cgpa_weight)
        .max(0.0)
}

pub fn hybrid_score(
    similarity: f64,
    student_cgpa: f64,
    required_cgpa: f64,
    config: &RecommendationConfig,
) -> HybridScore {
    let content_score = content_score(similarity, config);
    let cgpa_score = cgpa_score(student_cgpa, required_cgpa, config);
    HybridScore {
        content_score,
        cgpa_score,
        total_score: round2(content_score + cgpa_score),
    }
}

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
