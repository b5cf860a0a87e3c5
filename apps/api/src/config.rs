use std::str::FromStr;

use anyhow::{Context, Result};

use crate::recommend::scoring::RecommendationConfig;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or an optional one is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub recommend: RecommendationConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = RecommendationConfig::default();

        let config = Config {
            database_url: require_env("DATABASE_URL")?,
            port: optional_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            recommend: RecommendationConfig {
                content_weight: optional_env("RECOMMEND_CONTENT_WEIGHT", defaults.content_weight)?,
                cgpa_weight: optional_env("RECOMMEND_CGPA_WEIGHT", defaults.cgpa_weight)?,
                min_score: optional_env("RECOMMEND_MIN_SCORE", defaults.min_score)?,
                max_results: optional_env("RECOMMEND_MAX_RESULTS", defaults.max_results)?,
            },
        };

        config.recommend.validate()?;
        Ok(config)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has an invalid value: '{raw}'"))
}
