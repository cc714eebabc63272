mod config;
mod engine;
mod errors;
mod ingest;
mod ml;
mod nlp;
mod routes;
mod scoring;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::engine::ScreeningEngine;
use crate::ingest::UploadTextExtractor;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    // Load model artifacts before serving; failure leaves the service up but not ready
    let models_dir = config.models_dir.clone();
    let readiness = tokio::task::spawn_blocking(move || ml::initialize(&models_dir)).await?;

    let engine = ScreeningEngine::new(readiness, config.workers, config.batch_timeout);
    info!(
        "Screening engine configured: {} worker(s), batch timeout {:?}",
        config.workers, config.batch_timeout
    );

    let state = AppState {
        engine: Arc::new(engine),
        extractor: Arc::new(UploadTextExtractor),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
