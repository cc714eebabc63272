// Screening engine: the single-resume pipeline plus the batch and comparison wrappers.
//
// raw text + JD -> normalize -> features -> fuse -> decide (+ skill gap)
//
// Every entry point asks `Readiness` for the capabilities first, so a service whose models
// failed to load rejects scoring requests before doing any work.

pub mod batch;
pub mod compare;
pub mod handlers;
pub mod templates;

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::errors::AppError;
use crate::ml::{Capabilities, Readiness};
use crate::nlp::{extract_keywords, normalize, KeywordSet, LanguagePipeline, NormalizedText};
use crate::scoring::features::{self, SkillAffinity};
use crate::scoring::fusion::fuse;
use crate::scoring::policy::MATCHED_SKILLS_LIMIT;
use crate::scoring::skill_gap::skill_gap;
use crate::scoring::{as_percent, decide, Decision, ScoreResult, SkillGap};

pub use batch::BatchReport;
pub use compare::ComparisonResult;

const PREVIEW_CHARS: usize = 500;

/// One uploaded resume after text extraction.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub filename: String,
    pub text: String,
}

impl ResumeDocument {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Per-resume scores as percentages, the shape used for ranking and comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub filename: String,
    #[serde(rename = "final")]
    pub final_score: f64,
    pub quality: f64,
    #[serde(rename = "match")]
    pub match_score: f64,
    pub coverage: f64,
}

impl ScoreSummary {
    pub fn from_result(filename: impl Into<String>, result: &ScoreResult) -> Self {
        Self {
            filename: filename.into(),
            final_score: as_percent(result.final_score),
            quality: as_percent(result.quality),
            match_score: as_percent(result.match_score),
            coverage: result.coverage,
        }
    }
}

/// Full single-resume report.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub evaluation_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub filename: String,
    pub score: ScoreResult,
    pub decision: Decision,
    pub skill_gap: SkillGap,
    pub top_skills: Vec<SkillAffinity>,
    pub preview: String,
}

/// Job description features computed once and reused for every resume scored against it.
pub(crate) struct PreparedJob {
    normalized: NormalizedText,
    keywords: KeywordSet,
}

impl PreparedJob {
    pub(crate) fn new(pipeline: &dyn LanguagePipeline, job_description: &str) -> Self {
        Self {
            normalized: normalize(pipeline, job_description),
            keywords: extract_keywords(pipeline, job_description),
        }
    }
}

pub(crate) struct ScoredResume {
    pub result: ScoreResult,
    pub normalized: NormalizedText,
    pub keywords: KeywordSet,
}

/// The pure scoring pipeline for one resume. Cannot fail: model errors are recovered
/// inside the feature extractors.
pub(crate) fn score_prepared(caps: &Capabilities, job: &PreparedJob, resume: &str) -> ScoredResume {
    let language = caps.language.as_ref();
    let normalized = normalize(language, resume);
    let keywords = extract_keywords(language, resume);

    let quality = features::quality(
        caps.quality_vectorizer.as_ref(),
        caps.quality_model.as_ref(),
        &normalized,
    );
    let match_score =
        features::match_score(caps.match_vectorizer.as_ref(), &normalized, &job.normalized);
    let coverage = features::coverage(&keywords, &job.keywords);
    let final_score = fuse(quality, match_score, coverage);

    let matched_skills = job
        .keywords
        .intersection(&keywords)
        .take(MATCHED_SKILLS_LIMIT)
        .cloned()
        .collect();

    ScoredResume {
        result: ScoreResult {
            final_score,
            quality,
            match_score,
            coverage,
            matched_skills,
        },
        normalized,
        keywords,
    }
}

/// Runs CPU-bound scoring on the blocking pool once a slot in `pool` is free.
///
/// The permit moves into the blocking closure: a slot stays taken until the work itself
/// ends, even if the task awaiting it was aborted.
pub(crate) async fn run_pooled<T, F>(pool: Arc<Semaphore>, what: String, work: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let permit = pool
        .acquire_owned()
        .await
        .map_err(|e| anyhow!("scoring pool closed: {e}"))?;
    tokio::task::spawn_blocking(move || {
        let _permit = permit;
        work()
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("spawn_blocking failed for {what}: {e}")))
}

pub struct ScreeningEngine {
    readiness: Readiness,
    /// Process-wide bound on concurrent scoring, shared by every request.
    pool: Arc<Semaphore>,
    batch_timeout: Duration,
}

impl ScreeningEngine {
    pub fn new(readiness: Readiness, workers: usize, batch_timeout: Duration) -> Self {
        Self {
            readiness,
            pool: Arc::new(Semaphore::new(workers.max(1))),
            batch_timeout,
        }
    }

    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }

    pub fn ensure_ready(&self) -> Result<(), AppError> {
        self.readiness.capabilities().map(|_| ())
    }

    /// Scores a single resume against a job description.
    pub fn score(&self, resume: &str, job_description: &str) -> Result<ScoreResult, AppError> {
        let caps = self.readiness.capabilities()?;
        if resume.trim().is_empty() {
            return Err(AppError::EmptyExtractedText("resume".to_string()));
        }
        let job = PreparedJob::new(caps.language.as_ref(), job_description);
        Ok(score_prepared(caps, &job, resume).result)
    }

    pub fn decide(&self, result: &ScoreResult) -> Decision {
        decide(result)
    }

    pub fn skill_gap(&self, resume: &str, job_description: &str) -> Result<SkillGap, AppError> {
        let caps = self.readiness.capabilities()?;
        let language = caps.language.as_ref();
        Ok(skill_gap(
            &extract_keywords(language, resume),
            &extract_keywords(language, job_description),
        ))
    }

    /// Score, decision, skill gap and top skills for one resume.
    pub fn evaluate(&self, document: &ResumeDocument, job_description: &str) -> Result<Evaluation, AppError> {
        let caps = self.readiness.capabilities()?;
        if document.is_empty() {
            return Err(AppError::EmptyExtractedText(document.filename.clone()));
        }

        let job = PreparedJob::new(caps.language.as_ref(), job_description);
        let scored = score_prepared(caps, &job, &document.text);
        let decision = decide(&scored.result);
        let top_skills = features::top_skills(
            caps.language.as_ref(),
            caps.quality_vectorizer.as_ref(),
            &caps.skills,
            &scored.normalized,
        );

        tracing::info!(
            "Evaluated '{}': final {:.3}, status {:?}",
            document.filename,
            scored.result.final_score,
            decision.status
        );

        Ok(Evaluation {
            evaluation_id: Uuid::new_v4(),
            evaluated_at: Utc::now(),
            filename: document.filename.clone(),
            skill_gap: skill_gap(&scored.keywords, &job.keywords),
            score: scored.result,
            decision,
            top_skills,
            preview: preview(&document.text),
        })
    }

    /// `evaluate` on the blocking pool, counted against the worker limit.
    pub async fn evaluate_pooled(
        self: Arc<Self>,
        document: ResumeDocument,
        job_description: String,
    ) -> Result<Evaluation, AppError> {
        let pool = Arc::clone(&self.pool);
        let what = format!("evaluation of '{}'", document.filename);
        run_pooled(pool, what, move || self.evaluate(&document, &job_description)).await?
    }
}

fn preview(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= PREVIEW_CHARS {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(PREVIEW_CHARS).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::DecisionStatus;
    use crate::test_support::{
        ready_engine, unavailable_engine, FRONTEND_RESUME, PYTHON_JD, PYTHON_RESUME,
        UNRELATED_RESUME,
    };

    #[test]
    fn test_score_matching_resume_beats_unrelated() {
        let engine = ready_engine(0.7);
        let good = engine.score(PYTHON_RESUME, PYTHON_JD).unwrap();
        let bad = engine.score(UNRELATED_RESUME, PYTHON_JD).unwrap();
        assert!(good.final_score > bad.final_score);
        assert!(good.coverage > bad.coverage);
        assert!(good.matched_skills.contains(&"django".to_string()));
    }

    #[test]
    fn test_score_fields_bounded() {
        let engine = ready_engine(0.7);
        for resume in [PYTHON_RESUME, FRONTEND_RESUME, UNRELATED_RESUME, "x"] {
            let r = engine.score(resume, PYTHON_JD).unwrap();
            assert!((0.0..=1.0).contains(&r.final_score));
            assert!((0.0..=1.0).contains(&r.quality));
            assert!((0.0..=1.0).contains(&r.match_score));
            assert!((0.0..=100.0).contains(&r.coverage));
            assert!(r.matched_skills.len() <= MATCHED_SKILLS_LIMIT);
            assert!(r.matched_skills.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_self_comparison_match_is_maximal() {
        let engine = ready_engine(0.7);
        let r = engine.score(PYTHON_JD, PYTHON_JD).unwrap();
        assert!((r.match_score - 1.0).abs() < 1e-9);
        assert_eq!(r.coverage, 100.0);
    }

    #[test]
    fn test_keywordless_jd_gives_zero_coverage() {
        let engine = ready_engine(0.7);
        let r = engine.score(PYTHON_RESUME, "and the of with").unwrap();
        assert_eq!(r.coverage, 0.0);
        assert_eq!(r.match_score, 0.0);
    }

    #[test]
    fn test_score_rejects_empty_resume() {
        let engine = ready_engine(0.7);
        assert!(matches!(
            engine.score("  \n ", PYTHON_JD),
            Err(AppError::EmptyExtractedText(_))
        ));
    }

    #[test]
    fn test_unavailable_models_fail_fast() {
        let engine = unavailable_engine();
        assert!(matches!(
            engine.score(PYTHON_RESUME, PYTHON_JD),
            Err(AppError::ModelsUnavailable(_))
        ));
        assert!(matches!(
            engine.skill_gap(PYTHON_RESUME, PYTHON_JD),
            Err(AppError::ModelsUnavailable(_))
        ));
        assert!(engine.ensure_ready().is_err());
    }

    #[test]
    fn test_decide_twice_is_identical() {
        let engine = ready_engine(0.7);
        let r = engine.score(PYTHON_RESUME, PYTHON_JD).unwrap();
        assert_eq!(engine.decide(&r), engine.decide(&r));
    }

    #[test]
    fn test_skill_gap_lists_missing_jd_keywords() {
        let engine = ready_engine(0.7);
        let gap = engine.skill_gap(FRONTEND_RESUME, PYTHON_JD).unwrap();
        assert!(gap.missing.contains(&"django".to_string()));
        assert!(!gap.recommendations.is_empty());
        assert!(gap.missing.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_evaluate_full_report() {
        let engine = ready_engine(0.8);
        let doc = ResumeDocument::new("jane.pdf", PYTHON_RESUME);
        let evaluation = engine.evaluate(&doc, PYTHON_JD).unwrap();
        assert_eq!(evaluation.filename, "jane.pdf");
        assert_eq!(evaluation.score.quality, 0.8);
        assert_eq!(evaluation.decision, decide(&evaluation.score));
        assert!(!evaluation.top_skills.is_empty());
        assert!(evaluation.preview.starts_with("Senior Python developer"));
    }

    #[test]
    fn test_evaluate_unrelated_resume_fails() {
        let engine = ready_engine(0.5);
        let doc = ResumeDocument::new("chef.pdf", UNRELATED_RESUME);
        let evaluation = engine.evaluate(&doc, PYTHON_JD).unwrap();
        assert_eq!(evaluation.decision.status, DecisionStatus::Fail);
        assert!(!evaluation.decision.failure_reasons.is_empty());
    }

    #[test]
    fn test_evaluate_empty_names_file() {
        let engine = ready_engine(0.8);
        let doc = ResumeDocument::new("scan.pdf", "");
        match engine.evaluate(&doc, PYTHON_JD) {
            Err(AppError::EmptyExtractedText(name)) => assert_eq!(name, "scan.pdf"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_preview_truncates() {
        let long = "a".repeat(600);
        let p = preview(&long);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
        assert!(p.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }

    #[tokio::test]
    async fn test_evaluate_pooled_matches_direct_evaluation() {
        let engine = Arc::new(ready_engine(0.7));
        let doc = ResumeDocument::new("python.pdf", PYTHON_RESUME);
        let direct = engine.evaluate(&doc, PYTHON_JD).unwrap();
        let pooled = Arc::clone(&engine)
            .evaluate_pooled(doc, PYTHON_JD.to_string())
            .await
            .unwrap();
        assert_eq!(pooled.score.final_score, direct.score.final_score);
        assert_eq!(pooled.decision.status, direct.decision.status);
    }

    #[tokio::test]
    async fn test_evaluate_pooled_reports_unavailable_models() {
        let engine = Arc::new(unavailable_engine());
        let doc = ResumeDocument::new("python.pdf", PYTHON_RESUME);
        assert!(matches!(
            engine.evaluate_pooled(doc, PYTHON_JD.to_string()).await,
            Err(AppError::ModelsUnavailable(_))
        ));
    }
}
