// Language layer: the pipeline contract (tokenize + lemmatize + POS + NER), a rule-based
// default implementation, and the two text operations the scorer is built on.

pub mod lexicon;
pub mod normalizer;
pub mod rule_based;

use serde::Serialize;

pub use normalizer::{extract_keywords, normalize, KeywordSet, NormalizedText};
pub use rule_based::RuleBasedPipeline;

/// Coarse part-of-speech tag. Only the noun/adjective/numeral split matters to scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Adjective,
    Verb,
    Adverb,
    Numeral,
    Other,
}

impl PartOfSpeech {
    /// Content-bearing tags that may become keywords.
    pub fn is_salient(self) -> bool {
        matches!(
            self,
            PartOfSpeech::Noun | PartOfSpeech::ProperNoun | PartOfSpeech::Adjective
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Surface form exactly as it appeared in the analyzed text.
    pub text: String,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub is_stop: bool,
    pub like_num: bool,
}

/// A recognized named entity, reported with the casing of the analyzed text.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpan {
    pub text: String,
    pub label: String,
}

#[derive(Debug, Clone, Default)]
pub struct AnalyzedText {
    pub tokens: Vec<Token>,
    pub entities: Vec<EntitySpan>,
}

/// Opaque language capability. Implementations must be deterministic and safe to share
/// across scoring tasks without locking.
pub trait LanguagePipeline: Send + Sync {
    fn analyze(&self, text: &str) -> AnalyzedText;
}
