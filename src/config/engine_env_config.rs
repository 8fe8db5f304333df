use anyhow::{Context, Result};
use std::env;

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Batch-engine settings loaded from the environment.
#[derive(Debug, Clone)]
pub struct EngineEnvConfig {
    pub watchlist_path: String,
    pub concurrency: usize,
    pub history_days: u32,
    pub min_history: usize,
}

impl EngineEnvConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            watchlist_path: env_or("WATCHLIST_PATH", "watchlist.toml"),
            concurrency: env_or("CONCURRENCY", "4")
                .parse()
                .context("Invalid CONCURRENCY")?,
            history_days: env_or("HISTORY_DAYS", "400")
                .parse()
                .context("Invalid HISTORY_DAYS")?,
            min_history: env_or("MIN_HISTORY", "2")
                .parse()
                .context("Invalid MIN_HISTORY")?,
        })
    }
}
