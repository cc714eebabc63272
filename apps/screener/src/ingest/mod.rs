//! Document ingestion: turns an uploaded file into plain text for the engine.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>`; the engine itself only ever sees text.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to add document formats without touching the handlers.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Plain text of the upload. An unreadable document yields an empty string so the
    /// caller can apply its own empty-text policy; only unsupported formats are errors.
    async fn extract(&self, filename: &str, bytes: Bytes) -> Result<String, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Pdf,
    PlainText,
}

fn document_kind(filename: &str) -> Option<DocumentKind> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())?
        .to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some(DocumentKind::Pdf),
        "txt" | "md" => Some(DocumentKind::PlainText),
        _ => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// UploadTextExtractor — default implementation
// ────────────────────────────────────────────────────────────────────────────

/// PDF via `pdf-extract` on the blocking pool; `.txt` / `.md` as lossy UTF-8.
pub struct UploadTextExtractor;

#[async_trait]
impl TextExtractor for UploadTextExtractor {
    async fn extract(&self, filename: &str, bytes: Bytes) -> Result<String, AppError> {
        let kind = document_kind(filename).ok_or_else(|| {
            AppError::Extraction(format!("unsupported file type for '{filename}'"))
        })?;

        let text = match kind {
            DocumentKind::PlainText => String::from_utf8_lossy(&bytes).into_owned(),
            DocumentKind::Pdf => extract_pdf(filename, bytes).await,
        };
        debug!("Extracted {} chars from '{filename}'", text.len());
        Ok(text)
    }
}

async fn extract_pdf(filename: &str, bytes: Bytes) -> String {
    // pdf-extract can panic on malformed input; the JoinError absorbs it.
    let joined = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await;
    match joined {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF extraction failed for '{filename}': {e}");
            String::new()
        }
        Err(e) => {
            warn!("PDF extraction aborted for '{filename}': {e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_by_extension() {
        assert_eq!(document_kind("cv.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(document_kind("notes.md"), Some(DocumentKind::PlainText));
        assert_eq!(document_kind("resume.txt"), Some(DocumentKind::PlainText));
        assert_eq!(document_kind("resume.docx"), None);
        assert_eq!(document_kind("no_extension"), None);
    }

    #[tokio::test]
    async fn test_plain_text_is_lossy_utf8() {
        let text = UploadTextExtractor
            .extract("resume.txt", Bytes::from_static(b"Python \xffdeveloper"))
            .await
            .unwrap();
        assert!(text.starts_with("Python "));
        assert!(text.ends_with("developer"));
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_rejected() {
        let result = UploadTextExtractor
            .extract("resume.docx", Bytes::from_static(b"PK"))
            .await;
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_yields_empty_text() {
        let text = UploadTextExtractor
            .extract("scan.pdf", Bytes::from_static(b"not really a pdf"))
            .await
            .unwrap();
        assert!(text.trim().is_empty());
    }
}
