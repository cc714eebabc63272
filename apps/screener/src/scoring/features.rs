//! Feature extraction — the three independent signals fused into the final score.
//!
//! Model failures never escape this module:
//! - quality falls back to `FALLBACK_QUALITY` when vectorization or prediction fails;
//! - match is 0.0 for empty text, zero vectors, or a vectorizer error.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::warn;

use crate::ml::{cosine_similarity, QualityModel, TextVectorizer};
use crate::nlp::{normalize, KeywordSet, LanguagePipeline, NormalizedText};
use crate::scoring::policy::{FALLBACK_QUALITY, TOP_SKILLS_LIMIT};
use crate::scoring::round2;

/// Structural quality of the resume as predicted by the pre-trained model, in [0, 1].
pub fn quality(
    vectorizer: &dyn TextVectorizer,
    model: &dyn QualityModel,
    resume: &NormalizedText,
) -> f64 {
    let prediction = vectorizer
        .vectorize(resume.as_str())
        .and_then(|features| model.predict(&features));

    match prediction {
        Ok(q) if q.is_finite() => q.clamp(0.0, 1.0),
        Ok(q) => {
            warn!("Quality model returned {q}; using fallback {FALLBACK_QUALITY}");
            FALLBACK_QUALITY
        }
        Err(e) => {
            warn!("Quality model failed ({e}); using fallback {FALLBACK_QUALITY}");
            FALLBACK_QUALITY
        }
    }
}

/// Cosine similarity between resume and job description vectors, in [0, 1].
pub fn match_score(
    vectorizer: &dyn TextVectorizer,
    resume: &NormalizedText,
    job_description: &NormalizedText,
) -> f64 {
    if resume.is_empty() || job_description.is_empty() {
        return 0.0;
    }

    let vectors = vectorizer
        .vectorize(resume.as_str())
        .and_then(|r| Ok((r, vectorizer.vectorize(job_description.as_str())?)));
    let (resume_vec, jd_vec) = match vectors {
        Ok(pair) => pair,
        Err(e) => {
            warn!("Match vectorization failed ({e}); treating match as 0.0");
            return 0.0;
        }
    };

    let similarity = cosine_similarity(&resume_vec, &jd_vec);
    if similarity.is_finite() {
        similarity.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Percentage of job-description keywords present in the resume, two decimals.
/// An empty job keyword set gives 0.
pub fn coverage(resume_keywords: &KeywordSet, jd_keywords: &KeywordSet) -> f64 {
    if jd_keywords.is_empty() {
        return 0.0;
    }
    let shared = jd_keywords.intersection(resume_keywords).count();
    round2(shared as f64 / jd_keywords.len() as f64 * 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillAffinity {
    pub name: String,
    pub score: f64,
}

/// Ranks the canonical skills by similarity to the resume under the quality vectorizer.
/// Returns at most `TOP_SKILLS_LIMIT`, highest first, ties by name.
pub fn top_skills(
    pipeline: &dyn LanguagePipeline,
    vectorizer: &dyn TextVectorizer,
    skills: &[String],
    resume: &NormalizedText,
) -> Vec<SkillAffinity> {
    let resume_vec = match vectorizer.vectorize(resume.as_str()) {
        Ok(v) => v,
        Err(e) => {
            warn!("Top-skill ranking skipped ({e})");
            return Vec::new();
        }
    };

    let mut ranked: Vec<SkillAffinity> = skills
        .iter()
        .map(|skill| {
            let score = vectorizer
                .vectorize(normalize(pipeline, skill).as_str())
                .map(|skill_vec| cosine_similarity(&resume_vec, &skill_vec))
                .unwrap_or(0.0);
            SkillAffinity {
                name: skill.clone(),
                score: if score.is_finite() { score.clamp(0.0, 1.0) } else { 0.0 },
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(TOP_SKILLS_LIMIT);
    ranked
}
