use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Liveness plus model readiness. Answers even when the models failed to load.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let readiness = state.engine.readiness();
    Json(json!({
        "status": if readiness.is_ready() { "ok" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "service": "screener",
        "models": readiness.report(),
        "workers": state.config.workers,
        "batch_timeout_secs": state.config.batch_timeout.as_secs(),
    }))
}
