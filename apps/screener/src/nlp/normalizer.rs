//! Text normalization and keyword extraction.
//!
//! `normalize` feeds the vectorizers; `extract_keywords` feeds coverage and the skill gap.
//! The two deliberately differ: normalized text is lemmatized, keywords keep surface forms.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::nlp::lexicon::is_stop_word;
use crate::nlp::LanguagePipeline;

/// Keyword sets are ordered so that every consumer sees a deterministic iteration order.
pub type KeywordSet = BTreeSet<String>;

/// Lowercase `[a-z0-9]` tokens joined by single spaces, stop-words removed, lemmatized,
/// every token longer than two characters or numeric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|t| !t.is_empty())
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalizes raw text for vectorization. Never fails; empty input gives empty output.
pub fn normalize(pipeline: &dyn LanguagePipeline, text: &str) -> NormalizedText {
    let lowered = text.to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    let cleaned: String = collapsed
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ' {
                c
            } else {
                ' '
            }
        })
        .collect();

    let kept: Vec<String> = pipeline
        .analyze(&cleaned)
        .tokens
        .into_iter()
        .filter(|t| !t.is_stop)
        .filter_map(|t| {
            // The pipeline may return lemmas outside [a-z0-9]; re-clean them.
            let lemma: String = t
                .lemma
                .chars()
                .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
                .collect();
            // A lemma can itself be a stop-word ("others" -> "other").
            if is_stop_word(&lemma) {
                return None;
            }
            let numeric = !lemma.is_empty() && lemma.chars().all(|c| c.is_ascii_digit());
            (lemma.len() > 2 || numeric || (t.like_num && !lemma.is_empty())).then_some(lemma)
        })
        .collect();

    NormalizedText(kept.join(" "))
}

/// Extracts salient keywords: nouns, proper nouns, adjectives and numerics from the
/// lowercased text, plus named-entity spans found in the original casing.
pub fn extract_keywords(pipeline: &dyn LanguagePipeline, text: &str) -> KeywordSet {
    let mut keywords = KeywordSet::new();

    for token in pipeline.analyze(&text.to_lowercase()).tokens {
        if token.is_stop {
            continue;
        }
        let eligible = token.pos.is_salient() || token.like_num;
        let long_enough = token.text.chars().count() > 2 || token.like_num;
        if eligible && long_enough {
            keywords.insert(token.text);
        }
    }

    for entity in pipeline.analyze(text).entities {
        let span = entity.text.trim().to_lowercase();
        if span.chars().count() > 2 && !is_stop_word(&span) {
            keywords.insert(span);
        }
    }

    keywords
}
