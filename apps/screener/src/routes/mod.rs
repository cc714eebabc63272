pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::engine::handlers;
use crate::state::AppState;

/// Batch uploads carry many PDFs; axum's 2 MB default is too small.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(handlers::handle_templates))
        .route("/api/v1/screen", post(handlers::handle_screen))
        .route("/api/v1/batch", post(handlers::handle_batch))
        .route("/api/v1/compare", post(handlers::handle_compare))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::engine::ScreeningEngine;
    use crate::ingest::UploadTextExtractor;
    use crate::test_support::{ready_engine, unavailable_engine, FRONTEND_RESUME, PYTHON_RESUME};

    const BOUNDARY: &str = "screener-test-boundary";

    fn state_with(engine: ScreeningEngine) -> AppState {
        AppState {
            engine: Arc::new(engine),
            extractor: Arc::new(UploadTextExtractor),
            config: Config {
                models_dir: PathBuf::from("models"),
                workers: 4,
                batch_timeout: Duration::from_secs(30),
                port: 8080,
                rust_log: "info".to_string(),
            },
        }
    }

    /// (field name, optional filename, content)
    fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> Body {
        let mut body = String::new();
        for (name, filename, content) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match filename {
                Some(f) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\nContent-Type: text/plain\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        Body::from(body)
    }

    fn multipart_request(uri: &str, parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(multipart_body(parts))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_unavailable_models() {
        let app = build_router(state_with(unavailable_engine()));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["models"]["models_loaded"], false);
    }

    #[tokio::test]
    async fn test_templates_listed() {
        let app = build_router(state_with(ready_engine(0.7)));
        let response = app
            .oneshot(Request::get("/api/v1/templates").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn test_screen_with_unavailable_models_is_503() {
        let app = build_router(state_with(unavailable_engine()));
        let request = multipart_request(
            "/api/v1/screen",
            &[("resume", Some("cv.txt"), PYTHON_RESUME), ("job_role", None, "python_dev")],
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "MODELS_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_screen_returns_evaluation() {
        let app = build_router(state_with(ready_engine(0.7)));
        let request = multipart_request(
            "/api/v1/screen",
            &[("resume", Some("cv.txt"), PYTHON_RESUME), ("job_role", None, "python_dev")],
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["filename"], "cv.txt");
        assert!(body["score"]["final"].is_number());
        assert!(body["decision"]["status"].is_string());
    }

    #[tokio::test]
    async fn test_screen_without_job_description_is_400() {
        let app = build_router(state_with(ready_engine(0.7)));
        let request = multipart_request("/api/v1/screen", &[("resume", Some("cv.txt"), PYTHON_RESUME)]);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_batch_pages_results() {
        let app = build_router(state_with(ready_engine(0.7)));
        let request = multipart_request(
            "/api/v1/batch?page=1",
            &[
                ("resumes", Some("a.txt"), PYTHON_RESUME),
                ("resumes", Some("b.txt"), FRONTEND_RESUME),
                ("resumes", Some("c.docx"), "ignored"),
                ("job_role", None, "python_dev"),
            ],
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["total_count"], 2);
        assert_eq!(body["results"][0]["filename"], "a.txt");
    }

    #[tokio::test]
    async fn test_compare_wrong_count_is_400() {
        let app = build_router(state_with(ready_engine(0.7)));
        let request = multipart_request(
            "/api/v1/compare",
            &[("resumes", Some("a.txt"), PYTHON_RESUME), ("job_role", None, "python_dev")],
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "WRONG_DOCUMENT_COUNT");
    }
}
