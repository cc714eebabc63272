//! Deterministic stand-ins for the trained capabilities, shared by unit tests.

use std::sync::Arc;
use std::time::Duration;

use crate::engine::ScreeningEngine;
use crate::ml::{
    Capabilities, ModelError, QualityModel, Readiness, SparseVector, TextVectorizer,
    TfidfVectorizer,
};
use crate::nlp::{normalize, LanguagePipeline, RuleBasedPipeline};

pub const SKILLS: &[&str] = &[
    "aws",
    "django",
    "docker",
    "flask",
    "javascript",
    "machine learning",
    "python",
    "react",
    "rest api",
    "sql",
];

pub const PYTHON_JD: &str = "Python Developer with Flask, Django, REST API design and SQL. \
    Experience with Docker and AWS deployment is a plus.";

pub const PYTHON_RESUME: &str = "Senior Python developer with 6 years of experience.\n\
    Built REST API services with Django and Flask, tuned SQL queries on PostgreSQL databases.\n\
    Deployed Python services with Docker on AWS, reducing latency by 40%.";

pub const FRONTEND_RESUME: &str = "Frontend engineer focused on JavaScript, React, HTML and CSS. \
    Designed responsive interfaces and accessible component libraries.";

pub const UNRELATED_RESUME: &str = "Pastry chef with a decade of bakery experience. \
    Managed kitchen staff, croissant production and seasonal dessert menus.";

const EXTRA_CORPUS: &[&str] = &[
    "Data scientist skilled in Python, Pandas, NumPy, machine learning and NLP.",
    "Backend developer with APIs, databases and authentication.",
];

pub struct FixedQualityModel(pub f64);

impl QualityModel for FixedQualityModel {
    fn predict(&self, _features: &SparseVector) -> Result<f64, ModelError> {
        Ok(self.0)
    }
}

pub struct FailingQualityModel;

impl QualityModel for FailingQualityModel {
    fn predict(&self, _features: &SparseVector) -> Result<f64, ModelError> {
        Err(ModelError::Predict("model file truncated".to_string()))
    }
}

pub struct FailingVectorizer;

impl TextVectorizer for FailingVectorizer {
    fn vectorize(&self, _text: &str) -> Result<SparseVector, ModelError> {
        Err(ModelError::Vectorize("vocabulary not loaded".to_string()))
    }
}

/// TF-IDF with unigrams and bigrams, fitted on the normalized sample texts.
pub fn fitted_vectorizer(pipeline: &dyn LanguagePipeline) -> TfidfVectorizer {
    let normalized: Vec<String> = [PYTHON_JD, PYTHON_RESUME, FRONTEND_RESUME, UNRELATED_RESUME]
        .iter()
        .chain(EXTRA_CORPUS)
        .map(|text| normalize(pipeline, text).to_string())
        .collect();
    let docs: Vec<&str> = normalized.iter().map(String::as_str).collect();
    TfidfVectorizer::fit(&docs, (1, 2), None).unwrap()
}

pub fn capabilities_with(model: Box<dyn QualityModel>) -> Capabilities {
    let pipeline = RuleBasedPipeline::new(SKILLS);
    let vectorizer = fitted_vectorizer(&pipeline);
    Capabilities {
        language: Box::new(pipeline),
        quality_vectorizer: Box::new(vectorizer.clone()),
        quality_model: model,
        match_vectorizer: Box::new(vectorizer),
        skills: SKILLS.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn ready_engine(quality: f64) -> ScreeningEngine {
    ScreeningEngine::new(
        Readiness::Ready(Arc::new(capabilities_with(Box::new(FixedQualityModel(quality))))),
        4,
        Duration::from_secs(30),
    )
}

pub fn unavailable_engine() -> ScreeningEngine {
    ScreeningEngine::new(
        Readiness::Unavailable {
            reason: "quality_model.json missing".to_string(),
        },
        4,
        Duration::from_secs(30),
    )
}
