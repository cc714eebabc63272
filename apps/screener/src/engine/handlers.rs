use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::warn;

use crate::engine::templates::{resolve_job_description, JobTemplate, JOB_TEMPLATES};
use crate::engine::{BatchReport, ComparisonResult, Evaluation, ResumeDocument};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Multipart form
// ────────────────────────────────────────────────────────────────────────────

const JOB_DESC_FIELD: &str = "job_desc";
const JOB_ROLE_FIELD: &str = "job_role";

#[derive(Default)]
struct ScreeningForm {
    files: Vec<(String, Bytes)>,
    job_desc: Option<String>,
    job_role: Option<String>,
}

impl ScreeningForm {
    fn job_description(&self) -> Result<String, AppError> {
        resolve_job_description(self.job_role.as_deref(), self.job_desc.as_deref())
    }
}

/// Collects every part named `file_field` as an upload; unknown parts are ignored.
async fn read_form(mut multipart: Multipart, file_field: &str) -> Result<ScreeningForm, AppError> {
    let malformed = |e: axum::extract::multipart::MultipartError| {
        AppError::Validation(format!("Malformed multipart body: {e}"))
    };

    let mut form = ScreeningForm::default();
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == file_field {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let bytes = field.bytes().await.map_err(malformed)?;
            form.files.push((filename, bytes));
        } else if name == JOB_DESC_FIELD {
            form.job_desc = Some(field.text().await.map_err(malformed)?);
        } else if name == JOB_ROLE_FIELD {
            form.job_role = Some(field.text().await.map_err(malformed)?);
        }
    }
    Ok(form)
}

async fn extract_documents(
    state: &AppState,
    files: Vec<(String, Bytes)>,
) -> Result<Vec<ResumeDocument>, AppError> {
    let mut documents = Vec::with_capacity(files.len());
    for (filename, bytes) in files {
        let text = state.extractor.extract(&filename, bytes).await?;
        documents.push(ResumeDocument::new(filename, text));
    }
    Ok(documents)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_templates() -> Json<&'static [JobTemplate]> {
    Json(JOB_TEMPLATES)
}

/// POST /api/v1/screen
pub async fn handle_screen(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Evaluation>, AppError> {
    state.engine.ensure_ready()?;

    let form = read_form(multipart, "resume").await?;
    let job_description = form.job_description()?;
    let [(filename, bytes)]: [(String, Bytes); 1] =
        form.files.try_into().map_err(|files: Vec<(String, Bytes)>| {
            AppError::Validation(format!(
                "Expected exactly one 'resume' file, got {}",
                files.len()
            ))
        })?;
    let text = state.extractor.extract(&filename, bytes).await?;
    let document = ResumeDocument::new(filename, text);

    let evaluation = Arc::clone(&state.engine)
        .evaluate_pooled(document, job_description)
        .await?;

    Ok(Json(evaluation))
}

#[derive(Debug, Deserialize)]
pub struct BatchQuery {
    pub page: Option<i64>,
}

/// POST /api/v1/batch?page=N
///
/// Uploads that cannot be read are skipped like empty ones.
pub async fn handle_batch(
    State(state): State<AppState>,
    Query(query): Query<BatchQuery>,
    multipart: Multipart,
) -> Result<Json<BatchReport>, AppError> {
    state.engine.ensure_ready()?;

    let form = read_form(multipart, "resumes").await?;
    let job_description = form.job_description()?;

    let mut documents = Vec::with_capacity(form.files.len());
    for (filename, bytes) in form.files {
        match state.extractor.extract(&filename, bytes).await {
            Ok(text) => documents.push(ResumeDocument::new(filename, text)),
            Err(e) => warn!("Skipping '{filename}' in batch: {e}"),
        }
    }

    let report = state
        .engine
        .score_batch(documents, &job_description, query.page.unwrap_or(1))
        .await?;
    Ok(Json(report))
}

/// POST /api/v1/compare
pub async fn handle_compare(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ComparisonResult>, AppError> {
    state.engine.ensure_ready()?;

    let form = read_form(multipart, "resumes").await?;
    let job_description = form.job_description()?;
    if form.files.len() != 2 {
        return Err(AppError::WrongDocumentCount {
            expected: 2,
            actual: form.files.len(),
        });
    }

    let documents = extract_documents(&state, form.files).await?;
    let result = state.engine.compare(documents, &job_description).await?;
    Ok(Json(result))
}
