//! TF-IDF vectorizer over whitespace-tokenized (already normalized) text.
//!
//! Artifact format (JSON):
//! `{"vocabulary": {"python": 0, "machine learning": 1}, "idf": [1.4, 2.1], "ngram_range": [1, 2]}`
//!
//! Vectors are raw n-gram counts times idf, L2-normalized. Terms outside the vocabulary
//! are ignored, so text sharing no vocabulary yields the zero vector.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ml::{ModelError, SparseVector, TextVectorizer};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

impl TfidfVectorizer {
    /// Fits vocabulary and smoothed idf (`ln((1 + n) / (1 + df)) + 1`) on a corpus.
    /// With `max_features`, only the terms with the highest document frequency are kept
    /// (ties broken alphabetically). Indices are assigned in alphabetical term order.
    /// Builds test fixtures; production vectorizers ship as trained artifacts.
    #[cfg(test)]
    pub fn fit(
        documents: &[&str],
        ngram_range: (usize, usize),
        max_features: Option<usize>,
    ) -> Result<Self, ModelError> {
        validate_ngram_range(ngram_range)?;

        let mut df: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            let unique: std::collections::HashSet<String> =
                ngrams(doc, ngram_range).into_iter().collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }
        if df.is_empty() {
            return Err(ModelError::Artifact(
                "corpus produced an empty vocabulary".to_string(),
            ));
        }

        let mut terms: Vec<(String, usize)> = df.into_iter().collect();
        if let Some(limit) = max_features {
            terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            terms.truncate(limit);
        }
        terms.sort_by(|a, b| a.0.cmp(&b.0));

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (index, (term, doc_freq)) in terms.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + doc_freq as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Ok(Self {
            vocabulary,
            idf,
            ngram_range,
        })
    }

    /// Checks a deserialized artifact for internal consistency.
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_ngram_range(self.ngram_range)?;
        if self.vocabulary.is_empty() {
            return Err(ModelError::Artifact("vocabulary is empty".to_string()));
        }
        if self.idf.len() != self.vocabulary.len() {
            return Err(ModelError::Artifact(format!(
                "idf has {} weights for {} vocabulary terms",
                self.idf.len(),
                self.vocabulary.len()
            )));
        }
        if let Some((term, &index)) = self.vocabulary.iter().find(|(_, &i)| i >= self.idf.len())
        {
            return Err(ModelError::Artifact(format!(
                "term '{term}' has out-of-range index {index}"
            )));
        }
        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::Artifact("idf contains non-finite weights".to_string()));
        }
        Ok(())
    }

    pub fn dimension(&self) -> usize {
        self.idf.len()
    }
}

impl TextVectorizer for TfidfVectorizer {
    fn vectorize(&self, text: &str) -> Result<SparseVector, ModelError> {
        let pairs: Vec<(usize, f64)> = ngrams(text, self.ngram_range)
            .iter()
            .filter_map(|gram| self.vocabulary.get(gram.as_str()))
            .map(|&index| {
                let weight = self.idf.get(index).copied().ok_or_else(|| {
                    ModelError::Vectorize(format!("vocabulary index {index} has no idf weight"))
                })?;
                Ok((index, weight))
            })
            .collect::<Result<_, ModelError>>()?;

        // from_pairs sums repeated indices, which yields count * idf.
        Ok(SparseVector::from_pairs(pairs).l2_normalized())
    }
}

fn validate_ngram_range((min_n, max_n): (usize, usize)) -> Result<(), ModelError> {
    if min_n == 0 || min_n > max_n {
        return Err(ModelError::Artifact(format!(
            "invalid ngram_range ({min_n}, {max_n})"
        )));
    }
    Ok(())
}

fn ngrams(text: &str, (min_n, max_n): (usize, usize)) -> Vec<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut grams = Vec::new();
    for n in min_n..=max_n {
        if n == 0 || n > tokens.len() {
            continue;
        }
        grams.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    grams
}
