//! Startup loading of model artifacts and the readiness value threaded into the engine.
//!
//! Loading happens once, before the listener binds. The outcome is a `Readiness` value,
//! not a global flag: every scoring entry point asks it for the capabilities and gets
//! `AppError::ModelsUnavailable` when loading failed.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::ml::{LinearQualityModel, QualityModel, TextVectorizer, TfidfVectorizer};
use crate::nlp::{LanguagePipeline, RuleBasedPipeline};

pub const QUALITY_VECTORIZER_FILE: &str = "quality_vectorizer.json";
pub const QUALITY_MODEL_FILE: &str = "quality_model.json";
pub const MATCH_VECTORIZER_FILE: &str = "match_vectorizer.json";
pub const SKILLS_FILE: &str = "skills.json";

/// Everything the scoring pipeline needs, loaded once and never mutated.
pub struct Capabilities {
    pub language: Box<dyn LanguagePipeline>,
    pub quality_vectorizer: Box<dyn TextVectorizer>,
    pub quality_model: Box<dyn QualityModel>,
    pub match_vectorizer: Box<dyn TextVectorizer>,
    /// Canonical skills list, in artifact order.
    pub skills: Vec<String>,
}

pub enum Readiness {
    Ready(Arc<Capabilities>),
    Unavailable { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessReport {
    pub models_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Readiness {
    /// Gate checked at the start of every scoring entry point.
    pub fn capabilities(&self) -> Result<&Arc<Capabilities>, AppError> {
        match self {
            Readiness::Ready(caps) => Ok(caps),
            Readiness::Unavailable { reason } => Err(AppError::ModelsUnavailable(reason.clone())),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready(_))
    }

    pub fn report(&self) -> ReadinessReport {
        match self {
            Readiness::Ready(_) => ReadinessReport {
                models_loaded: true,
                reason: None,
            },
            Readiness::Unavailable { reason } => ReadinessReport {
                models_loaded: false,
                reason: Some(reason.clone()),
            },
        }
    }
}

/// Loads all artifacts from `models_dir`. Never fails: a load error becomes
/// `Readiness::Unavailable` so the service still starts and answers health checks.
pub fn initialize(models_dir: &Path) -> Readiness {
    match load_capabilities(models_dir) {
        Ok(caps) => {
            info!(
                "Models loaded from {} ({} canonical skills)",
                models_dir.display(),
                caps.skills.len()
            );
            Readiness::Ready(Arc::new(caps))
        }
        Err(e) => {
            warn!("Models not loaded: {e:#}");
            Readiness::Unavailable {
                reason: format!("{e:#}"),
            }
        }
    }
}

pub fn load_capabilities(models_dir: &Path) -> Result<Capabilities> {
    let quality_vectorizer: TfidfVectorizer =
        read_json(&models_dir.join(QUALITY_VECTORIZER_FILE))?;
    quality_vectorizer
        .validate()
        .context("quality vectorizer failed validation")?;

    let quality_model: LinearQualityModel = read_json(&models_dir.join(QUALITY_MODEL_FILE))?;
    quality_model
        .validate(quality_vectorizer.dimension())
        .context("quality model failed validation")?;

    let match_vectorizer: TfidfVectorizer = read_json(&models_dir.join(MATCH_VECTORIZER_FILE))?;
    match_vectorizer
        .validate()
        .context("match vectorizer failed validation")?;

    let skills: Vec<String> = read_json(&models_dir.join(SKILLS_FILE))?;
    let skills: Vec<String> = skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if skills.is_empty() {
        warn!("Canonical skills list is empty; top-skill ranking will be empty");
    }

    Ok(Capabilities {
        language: Box::new(RuleBasedPipeline::new(&skills)),
        quality_vectorizer: Box::new(quality_vectorizer),
        quality_model: Box::new(quality_model),
        match_vectorizer: Box::new(match_vectorizer),
        skills,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read model artifact {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse model artifact {}", path.display()))
}
