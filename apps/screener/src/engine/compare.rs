use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::info;

use crate::engine::{run_pooled, score_prepared, PreparedJob, ResumeDocument, ScoreSummary, ScreeningEngine};
use crate::errors::AppError;
use crate::ml::Capabilities;
use crate::scoring::ScoreResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    ResumeA,
    ResumeB,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub resume_a: ScoreSummary,
    pub resume_b: ScoreSummary,
    pub winner: Winner,
    pub winner_filename: String,
}

/// A wins only with a strictly greater final score; ties go to B.
pub fn pick_winner(a_final: f64, b_final: f64) -> Winner {
    if a_final > b_final {
        Winner::ResumeA
    } else {
        Winner::ResumeB
    }
}

impl ScreeningEngine {
    /// Head-to-head scoring of exactly two resumes against one job description.
    pub async fn compare(
        &self,
        documents: Vec<ResumeDocument>,
        job_description: &str,
    ) -> Result<ComparisonResult, AppError> {
        let caps = Arc::clone(self.readiness.capabilities()?);

        let [a, b]: [ResumeDocument; 2] =
            documents
                .try_into()
                .map_err(|docs: Vec<ResumeDocument>| AppError::WrongDocumentCount {
                    expected: 2,
                    actual: docs.len(),
                })?;
        for document in [&a, &b] {
            if document.is_empty() {
                return Err(AppError::EmptyExtractedText(document.filename.clone()));
            }
        }

        let job = Arc::new(PreparedJob::new(caps.language.as_ref(), job_description));
        let (a_result, b_result) = tokio::try_join!(
            score_pooled(Arc::clone(&self.pool), Arc::clone(&caps), Arc::clone(&job), a.text),
            score_pooled(Arc::clone(&self.pool), caps, job, b.text),
        )?;

        let winner = pick_winner(a_result.final_score, b_result.final_score);
        let winner_filename = match winner {
            Winner::ResumeA => a.filename.clone(),
            Winner::ResumeB => b.filename.clone(),
        };
        info!(
            "Compared '{}' ({:.3}) vs '{}' ({:.3}): {winner:?}",
            a.filename, a_result.final_score, b.filename, b_result.final_score
        );

        Ok(ComparisonResult {
            resume_a: ScoreSummary::from_result(a.filename, &a_result),
            resume_b: ScoreSummary::from_result(b.filename, &b_result),
            winner,
            winner_filename,
        })
    }
}

async fn score_pooled(
    pool: Arc<Semaphore>,
    caps: Arc<Capabilities>,
    job: Arc<PreparedJob>,
    text: String,
) -> Result<ScoreResult, AppError> {
    run_pooled(pool, "comparison".to_string(), move || {
        score_prepared(&caps, &job, &text).result
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        ready_engine, unavailable_engine, FRONTEND_RESUME, PYTHON_JD, PYTHON_RESUME,
    };

    #[test]
    fn test_tie_goes_to_b() {
        assert_eq!(pick_winner(0.70, 0.70), Winner::ResumeB);
        assert_eq!(pick_winner(0.71, 0.70), Winner::ResumeA);
        assert_eq!(pick_winner(0.69, 0.70), Winner::ResumeB);
    }

    #[test]
    fn test_winner_serializes_as_side() {
        assert_eq!(serde_json::to_value(Winner::ResumeA).unwrap(), "resume_a");
        assert_eq!(serde_json::to_value(Winner::ResumeB).unwrap(), "resume_b");
    }

    #[tokio::test]
    async fn test_compare_picks_better_match() {
        let engine = ready_engine(0.7);
        let docs = vec![
            ResumeDocument::new("frontend.pdf", FRONTEND_RESUME),
            ResumeDocument::new("python.pdf", PYTHON_RESUME),
        ];
        let result = engine.compare(docs, PYTHON_JD).await.unwrap();
        assert_eq!(result.winner, Winner::ResumeB);
        assert_eq!(result.winner_filename, "python.pdf");
        assert!(result.resume_b.final_score > result.resume_a.final_score);
    }

    #[tokio::test]
    async fn test_identical_resumes_tie_to_b() {
        let engine = ready_engine(0.7);
        let docs = vec![
            ResumeDocument::new("a.pdf", PYTHON_RESUME),
            ResumeDocument::new("b.pdf", PYTHON_RESUME),
        ];
        let result = engine.compare(docs, PYTHON_JD).await.unwrap();
        assert_eq!(result.resume_a.final_score, result.resume_b.final_score);
        assert_eq!(result.winner, Winner::ResumeB);
    }

    #[tokio::test]
    async fn test_compare_requires_two_documents() {
        let engine = ready_engine(0.7);
        let docs = vec![ResumeDocument::new("a.pdf", PYTHON_RESUME)];
        match engine.compare(docs, PYTHON_JD).await {
            Err(AppError::WrongDocumentCount { expected, actual }) => {
                assert_eq!((expected, actual), (2, 1));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_compare_rejects_empty_side() {
        let engine = ready_engine(0.7);
        let docs = vec![
            ResumeDocument::new("a.pdf", PYTHON_RESUME),
            ResumeDocument::new("scan.pdf", ""),
        ];
        match engine.compare(docs, PYTHON_JD).await {
            Err(AppError::EmptyExtractedText(name)) => assert_eq!(name, "scan.pdf"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_compare_checks_readiness_first() {
        let engine = unavailable_engine();
        let docs = vec![ResumeDocument::new("a.pdf", PYTHON_RESUME)];
        assert!(matches!(
            engine.compare(docs, PYTHON_JD).await,
            Err(AppError::ModelsUnavailable(_))
        ));
    }
}
