//! Job recommendations: TF-IDF content similarity fused with a CGPA eligibility score.
//!
//! Every call builds its own corpus and vectorizer from the live job snapshot;
//! nothing is cached between calls.

pub mod engine;
pub mod handlers;
pub mod scoring;
pub mod store;
pub mod text;
pub mod tfidf;
