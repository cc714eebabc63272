//! Rule-based language pipeline — the default `LanguagePipeline`.
//!
//! Deterministic and dictionary driven: no statistical model, no I/O after construction.
//! - Tokens are alphanumeric runs. `3.8` and `1,200` stay whole, `c++` / `c#` keep their
//!   suffix, `40%` keeps its percent sign.
//! - Lemmas come from the irregular table, the verb lexicon (inflected forms), or plural
//!   stripping for everything else.
//! - POS tags are heuristic: numerals, verb forms, `-ly` adverbs, adjective suffixes,
//!   capitalized words mid-sentence as proper nouns, nouns otherwise.
//! - Named entities are gazetteer hits for multi-word or symbol-bearing phrases
//!   (`machine learning`, `scikit-learn`, `c++`), reported in the analyzed text's casing.

use crate::nlp::lexicon::{
    irregular_lemma, is_noun_like_verb, is_number_word, is_stop_word, is_verb, ADJECTIVES,
    ADJECTIVE_SUFFIXES, SUFFIX_EXCEPTIONS,
};
use crate::nlp::{AnalyzedText, EntitySpan, LanguagePipeline, PartOfSpeech, Token};

const ENTITY_LABEL: &str = "SKILL";

#[derive(Debug, Clone, Default)]
pub struct RuleBasedPipeline {
    /// Lowercase phrases, longest first so overlapping hits prefer the longer span.
    gazetteer: Vec<String>,
}

impl RuleBasedPipeline {
    /// Builds a pipeline whose entity recognizer knows the given phrases.
    /// Single plain words are ignored: the tokenizer already yields them.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut gazetteer: Vec<String> = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_ascii_lowercase())
            .filter(|p| !p.is_empty() && p.chars().any(|c| !c.is_ascii_alphanumeric()))
            .collect();
        gazetteer.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        gazetteer.dedup();
        Self { gazetteer }
    }

    fn find_entities(&self, text: &str) -> Vec<EntitySpan> {
        // ASCII lowercasing keeps byte offsets aligned with `text`.
        let lowered = text.to_ascii_lowercase();
        let mut claimed: Vec<(usize, usize)> = Vec::new();

        for phrase in &self.gazetteer {
            for (start, _) in lowered.match_indices(phrase.as_str()) {
                let end = start + phrase.len();
                if !is_boundary(&lowered, start, end) {
                    continue;
                }
                if claimed.iter().any(|&(s, e)| start < e && s < end) {
                    continue;
                }
                claimed.push((start, end));
            }
        }

        claimed.sort_unstable();
        claimed
            .into_iter()
            .map(|(start, end)| EntitySpan {
                text: text[start..end].to_string(),
                label: ENTITY_LABEL.to_string(),
            })
            .collect()
    }
}

impl LanguagePipeline for RuleBasedPipeline {
    fn analyze(&self, text: &str) -> AnalyzedText {
        let mut tokens = Vec::new();
        let mut prev_end = 0;

        for (start, word) in split_words(text) {
            let gap = &text[prev_end..start];
            let sentence_start =
                tokens.is_empty() || gap.contains(|c: char| matches!(c, '.' | '!' | '?' | '\n'));
            prev_end = start + word.len();

            let lower = word.to_lowercase();
            let like_num = is_numeric_like(&lower);
            let is_stop = is_stop_word(&lower);
            let (lemma, verb_form) = if like_num {
                (lower.clone(), false)
            } else {
                lemmatize(&lower)
            };
            let pos = tag(word, &lower, verb_form, like_num, is_stop, sentence_start);

            tokens.push(Token {
                text: word.to_string(),
                lemma,
                pos,
                is_stop,
                like_num,
            });
        }

        AnalyzedText {
            tokens,
            entities: self.find_entities(text),
        }
    }
}

/// Digits with optional `.`/`,` separators and a trailing `%`, or a spelled-out number.
pub fn is_numeric_like(word: &str) -> bool {
    let trimmed = word.strip_suffix('%').unwrap_or(word);
    let has_digit = trimmed.chars().any(|c| c.is_ascii_digit());
    let digits_only = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == ',');
    (has_digit && digits_only) || is_number_word(trimmed)
}

fn split_words(text: &str) -> Vec<(usize, &str)> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut words = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (start, c) = chars[i];
        if !c.is_alphanumeric() {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() {
            let ch = chars[j].1;
            if ch.is_alphanumeric() {
                j += 1;
                continue;
            }
            let inside_number = (ch == '.' || ch == ',')
                && chars[j - 1].1.is_ascii_digit()
                && chars.get(j + 1).is_some_and(|(_, n)| n.is_ascii_digit());
            if inside_number {
                j += 2;
                continue;
            }
            break;
        }
        while j < chars.len() && matches!(chars[j].1, '+' | '#') {
            j += 1;
        }
        if j < chars.len() && chars[j].1 == '%' && chars[j - 1].1.is_ascii_digit() {
            j += 1;
        }

        let end = chars.get(j).map_or(text.len(), |(b, _)| *b);
        words.push((start, &text[start..end]));
        i = j;
    }

    words
}

/// Returns the lemma and whether the word is an inflected or bare verb form.
fn lemmatize(word: &str) -> (String, bool) {
    if let Some(lemma) = irregular_lemma(word) {
        return (lemma.to_string(), is_verb(lemma));
    }
    if is_verb(word) {
        return (word.to_string(), !is_noun_like_verb(word));
    }
    for candidate in verb_candidates(word) {
        if is_verb(&candidate) {
            return (candidate, true);
        }
    }
    (singularize(word), false)
}

fn verb_candidates(word: &str) -> Vec<String> {
    let mut candidates = Vec::new();
    for suffix in ["ing", "ed"] {
        let Some(stem) = word.strip_suffix(suffix) else {
            continue;
        };
        if stem.len() < 2 {
            continue;
        }
        candidates.push(stem.to_string());
        candidates.push(format!("{stem}e"));
        // shipped -> ship, running -> run
        let bytes = stem.as_bytes();
        if stem.is_ascii()
            && bytes.len() >= 3
            && bytes[bytes.len() - 1] == bytes[bytes.len() - 2]
        {
            candidates.push(stem[..stem.len() - 1].to_string());
        }
    }
    candidates
}

fn singularize(word: &str) -> String {
    if word.len() <= 3 || !word.is_ascii() {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() > 1 {
            return format!("{stem}y");
        }
    }
    if word.ends_with("sses") {
        return word[..word.len() - 2].to_string();
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}

fn tag(
    surface: &str,
    lower: &str,
    verb_form: bool,
    like_num: bool,
    is_stop: bool,
    sentence_start: bool,
) -> PartOfSpeech {
    if like_num {
        return PartOfSpeech::Numeral;
    }
    if is_stop {
        return PartOfSpeech::Other;
    }
    if verb_form {
        return PartOfSpeech::Verb;
    }
    if lower.len() > 4 && lower.ends_with("ly") {
        return PartOfSpeech::Adverb;
    }
    let adjective_suffix = ADJECTIVE_SUFFIXES
        .iter()
        .any(|s| lower.len() > s.len() + 2 && lower.ends_with(s));
    if ADJECTIVES.contains(&lower)
        || (adjective_suffix && !SUFFIX_EXCEPTIONS.contains(&singularize(lower).as_str()))
    {
        return PartOfSpeech::Adjective;
    }
    if !sentence_start && surface.chars().next().is_some_and(char::is_uppercase) {
        return PartOfSpeech::ProperNoun;
    }
    PartOfSpeech::Noun
}

fn is_boundary(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric() && c != '+' && c != '#');
    before_ok && after_ok
}
