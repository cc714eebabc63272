// Model capabilities: vectorizers, the quality model, and artifact loading.
// Everything in here is read-only after startup and shared across scoring tasks via Arc.

pub mod linear;
pub mod loader;
pub mod tfidf;

use thiserror::Error;

pub use linear::LinearQualityModel;
pub use loader::{initialize, Capabilities, Readiness, ReadinessReport};
pub use tfidf::TfidfVectorizer;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Vectorization failed: {0}")]
    Vectorize(String),

    #[error("Prediction failed: {0}")]
    Predict(String),

    #[error("Dimension mismatch: model expects {expected} features, vector has index {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid model artifact: {0}")]
    Artifact(String),
}

/// Sparse feature vector: `(index, value)` pairs sorted by index, no duplicate indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Builds a vector from arbitrary pairs; duplicate indices are summed, zeros dropped.
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.sort_by_key(|&(i, _)| i);
        let mut entries: Vec<(usize, f64)> = Vec::with_capacity(pairs.len());
        for (i, v) in pairs {
            if let Some((last, acc)) = entries.last_mut() {
                if *last == i {
                    *acc += v;
                    continue;
                }
            }
            entries.push((i, v));
        }
        entries.retain(|&(_, v)| v != 0.0);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_index(&self) -> Option<usize> {
        self.entries.last().map(|&(i, _)| i)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, v)| v * v).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut p, mut q) = (0, 0);
        let mut sum = 0.0;
        while p < a.len() && q < b.len() {
            let ((i, x), (j, y)) = (a[p], b[q]);
            if i == j {
                sum += x * y;
                p += 1;
                q += 1;
            } else if i < j {
                p += 1;
            } else {
                q += 1;
            }
        }
        sum
    }

    /// Scales to unit L2 norm. A zero vector stays zero.
    pub fn l2_normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, v) in &mut self.entries {
                *v /= norm;
            }
        }
        self
    }
}

/// Cosine similarity; 0.0 when either side is a zero vector.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let (na, nb) = (a.norm(), b.norm());
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    a.dot(b) / (na * nb)
}

/// Turns normalized text into a feature vector.
pub trait TextVectorizer: Send + Sync {
    fn vectorize(&self, text: &str) -> Result<SparseVector, ModelError>;
}

/// Pre-trained resume quality regressor. Output is expected in [0, 1].
pub trait QualityModel: Send + Sync {
    fn predict(&self, features: &SparseVector) -> Result<f64, ModelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_sorts_and_merges() {
        let v = SparseVector::from_pairs(vec![(3, 1.0), (1, 2.0), (3, 0.5), (2, 0.0)]);
        assert_eq!(v.entries(), &[(1, 2.0), (3, 1.5)]);
    }

    #[test]
    fn test_dot_product_sparse_merge() {
        let a = SparseVector::from_pairs(vec![(0, 1.0), (2, 2.0), (5, 3.0)]);
        let b = SparseVector::from_pairs(vec![(2, 4.0), (4, 1.0), (5, 1.0)]);
        assert!((a.dot(&b) - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_identical_is_one() {
        let a = SparseVector::from_pairs(vec![(0, 0.3), (7, 0.9)]);
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_zero_vector_is_zero() {
        let a = SparseVector::from_pairs(vec![(0, 1.0)]);
        let zero = SparseVector::default();
        assert_eq!(cosine_similarity(&a, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn test_l2_normalized_unit_length() {
        let v = SparseVector::from_pairs(vec![(0, 3.0), (1, 4.0)]).l2_normalized();
        assert!((v.norm() - 1.0).abs() < 1e-12);
        assert!(SparseVector::default().l2_normalized().is_empty());
    }
}
