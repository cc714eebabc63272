use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

const DEFAULT_MODELS_DIR: &str = "models";
const DEFAULT_BATCH_TIMEOUT_SECS: u64 = 60;

/// Application configuration loaded from environment variables.
/// Every variable has a default, so the service starts with an empty environment.
/// Scoring thresholds are not configurable here; they live in `scoring::policy`.
#[derive(Debug, Clone)]
pub struct Config {
    pub models_dir: PathBuf,
    /// Upper bound on resumes scored concurrently within one batch.
    pub workers: usize,
    pub batch_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            models_dir: std::env::var("SCREENER_MODELS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODELS_DIR)),
            workers: parse_workers(std::env::var("SCREENER_WORKERS").ok())?,
            batch_timeout: Duration::from_secs(
                std::env::var("SCREENER_BATCH_TIMEOUT_SECS")
                    .unwrap_or_else(|_| DEFAULT_BATCH_TIMEOUT_SECS.to_string())
                    .parse::<u64>()
                    .context("SCREENER_BATCH_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_workers(raw: Option<String>) -> Result<usize> {
    let workers = match raw {
        Some(value) => value
            .parse::<usize>()
            .with_context(|| format!("SCREENER_WORKERS must be a positive integer, got '{value}'"))?,
        None => std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4),
    };
    if workers == 0 {
        bail!("SCREENER_WORKERS must be at least 1");
    }
    Ok(workers)
}
