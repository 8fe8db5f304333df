use anyhow::{Context, Result};
use std::env;

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Outbound feed endpoints and pacing, loaded from the environment.
#[derive(Debug, Clone)]
pub struct FeedsEnvConfig {
    pub market_data_base_url: String,
    pub news_base_url: String,
    /// Pause between consecutive news queries for one instrument.
    pub query_pacing_ms: u64,
    pub max_items_per_query: usize,
}

impl FeedsEnvConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            market_data_base_url: env_or("MARKET_DATA_BASE_URL", "https://stooq.com/q/d/l/"),
            news_base_url: env_or("NEWS_BASE_URL", "https://news.google.com/rss/search"),
            query_pacing_ms: env_or("NEWS_QUERY_PACING_MS", "1000")
                .parse()
                .context("Invalid NEWS_QUERY_PACING_MS")?,
            max_items_per_query: env_or("NEWS_MAX_ITEMS_PER_QUERY", "5")
                .parse()
                .context("Invalid NEWS_MAX_ITEMS_PER_QUERY")?,
        })
    }
}
