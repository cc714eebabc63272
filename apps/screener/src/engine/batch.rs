use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::engine::{run_pooled, score_prepared, PreparedJob, ResumeDocument, ScoreSummary, ScreeningEngine};
use crate::errors::AppError;
use crate::scoring::policy::PAGE_SIZE;

/// One page of a ranked batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub results: Vec<ScoreSummary>,
    pub page: i64,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    /// Set when the batch deadline elapsed; `results` then holds only what finished in time.
    pub timed_out: bool,
    pub elapsed_ms: u128,
}

impl ScreeningEngine {
    /// Scores every resume against one job description, ranks by final score and returns
    /// the requested page.
    ///
    /// Resumes with no extractable text are skipped, as are resumes whose scoring task
    /// fails. Scoring runs on the blocking pool and shares the engine-wide worker limit.
    pub async fn score_batch(
        &self,
        documents: Vec<ResumeDocument>,
        job_description: &str,
        page: i64,
    ) -> Result<BatchReport, AppError> {
        let caps = Arc::clone(self.readiness.capabilities()?);
        let started = Instant::now();
        let submitted = documents.len();

        let job = Arc::new(PreparedJob::new(caps.language.as_ref(), job_description));
        let mut tasks = JoinSet::new();

        for (index, document) in documents.into_iter().enumerate() {
            if document.is_empty() {
                info!("Skipping '{}': no extractable text", document.filename);
                continue;
            }
            let ResumeDocument { filename, text } = document;
            let caps = Arc::clone(&caps);
            let job = Arc::clone(&job);
            let pool = Arc::clone(&self.pool);

            tasks.spawn(async move {
                let what = format!("'{filename}'");
                let result = run_pooled(pool, what, move || score_prepared(&caps, &job, &text).result).await;
                (index, filename, result)
            });
        }

        let deadline = tokio::time::Instant::now() + self.batch_timeout;
        let mut scored = Vec::with_capacity(tasks.len());
        let mut timed_out = false;

        loop {
            match tokio::time::timeout_at(deadline, tasks.join_next()).await {
                Ok(Some(Ok((index, filename, Ok(result))))) => {
                    scored.push((index, ScoreSummary::from_result(filename, &result)));
                }
                Ok(Some(Ok((_, filename, Err(e))))) => {
                    error!("Scoring '{filename}' failed, skipping it: {e}");
                }
                Ok(Some(Err(e))) => {
                    error!("Batch task failed, skipping its resume: {e}");
                }
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        "Batch deadline of {:?} elapsed with {} resume(s) still scoring",
                        self.batch_timeout,
                        tasks.len()
                    );
                    // Only the awaiting tasks are cancelled. Blocking closures already
                    // running finish in the background and hold their pool slot until then.
                    tasks.abort_all();
                    timed_out = true;
                    break;
                }
            }
        }

        if scored.is_empty() && !timed_out {
            return Err(AppError::NoValidResumes);
        }

        // Restore upload order so equal scores keep it after the stable sort.
        scored.sort_by_key(|(index, _)| *index);
        let ranked = rank(scored.into_iter().map(|(_, summary)| summary).collect());
        let total_count = ranked.len();

        info!(
            "Batch scored {}/{} resume(s) in {:?}",
            total_count,
            submitted,
            started.elapsed()
        );

        Ok(BatchReport {
            batch_id: Uuid::new_v4(),
            results: paginate(&ranked, page, PAGE_SIZE),
            page,
            per_page: PAGE_SIZE,
            total_pages: total_pages(total_count, PAGE_SIZE),
            total_count,
            timed_out,
            elapsed_ms: started.elapsed().as_millis(),
        })
    }
}

/// Stable descending sort on the final score.
pub fn rank(mut summaries: Vec<ScoreSummary>) -> Vec<ScoreSummary> {
    summaries.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(Ordering::Equal)
    });
    summaries
}

pub fn total_pages(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// 1-based page slice. Pages before the first or past the last are empty.
pub fn paginate<T: Clone>(items: &[T], page: i64, per_page: usize) -> Vec<T> {
    if page < 1 {
        return Vec::new();
    }
    let start = usize::try_from(page - 1)
        .unwrap_or(usize::MAX)
        .saturating_mul(per_page);
    if start >= items.len() {
        return Vec::new();
    }
    let end = start.saturating_add(per_page).min(items.len());
    items[start..end].to_vec()
}
