//! Corpus-fitted TF-IDF vectorizer.
//!
//! Term frequency is the raw count, IDF is smoothed as `ln((1 + n) / (1 + df)) + 1`,
//! and every document vector is L2-normalised.

use std::collections::{BTreeSet, HashMap};

use thiserror::Error;

use crate::recommend::text::tokenize;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VectorizeError {
    #[error("empty vocabulary; documents contain only stop words or no text")]
    EmptyVocabulary,
}

/// Sparse document vector keyed by vocabulary index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    weights: HashMap<usize, f64>,
}

impl SparseVector {
    pub fn norm(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (small, large) = if self.weights.len() <= other.weights.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .weights
            .iter()
            .filter_map(|(idx, w)| large.weights.get(idx).map(|o| w * o))
            .sum()
    }

    fn normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for w in self.weights.values_mut() {
                *w /= norm;
            }
        }
        self
    }
}

/// Vocabulary and IDF weights learned from one corpus.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    /// Learns the vocabulary and IDF weights from `documents`.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Result<Self, VectorizeError> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();
        Self::fit_tokenized(&tokenized)
    }

    pub fn transform(&self, document: &str) -> SparseVector {
        self.vectorize_tokens(&tokenize(document))
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    fn fit_tokenized(tokenized: &[Vec<String>]) -> Result<Self, VectorizeError> {
        // Sorted so vocabulary indices are deterministic.
        let terms: BTreeSet<&str> = tokenized
            .iter()
            .flat_map(|tokens| tokens.iter().map(String::as_str))
            .collect();

        if terms.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx))
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for tokens in tokenized {
            let unique: BTreeSet<usize> = tokens.iter().map(|t| vocabulary[t.as_str()]).collect();
            for idx in unique {
                document_frequency[idx] += 1;
            }
        }

        let n = tokenized.len() as f64;
        let idf = document_frequency
            .into_iter()
            .map(|df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Ok(Self { vocabulary, idf })
    }

    fn vectorize_tokens(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let weights = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();

        SparseVector { weights }.normalized()
    }
}

/// Cosine similarity clamped to [0, 1]. A zero vector is similar to nothing.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    let sim = a.dot(b) / denom;
    if sim.is_finite() {
        sim.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
