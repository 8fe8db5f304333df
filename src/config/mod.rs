//! Configuration for marketpulse.
//!
//! Structured loading from environment variables, organized by concern:
//! Engine (batch settings), Feeds (endpoints and pacing) and Email
//! (alert delivery). The scoring-policy objects themselves
//! (keyword table, signal thresholds) keep their fixed defaults and are
//! composed here for injection.

mod email_config;
mod engine_env_config;
mod feeds_config;

pub use email_config::EmailConfig;
pub use engine_env_config::EngineEnvConfig;
pub use feeds_config::FeedsEnvConfig;

use crate::application::analyzer::EngineConfig;
use crate::application::sentiment::SentimentConfig;
use crate::application::signal::SignalConfig;
use anyhow::Result;
use std::time::Duration;

/// Main application configuration, composed from the sub-configs.
#[derive(Debug, Clone)]
pub struct Config {
    pub watchlist_path: String,
    pub concurrency: usize,
    pub history_days: u32,
    pub min_history: usize,
    pub market_data_base_url: String,
    pub news_base_url: String,
    pub query_pacing_ms: u64,
    pub max_items_per_query: usize,
    pub email: Option<EmailConfig>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let engine = EngineEnvConfig::from_env()?;
        let feeds = FeedsEnvConfig::from_env()?;
        let email = EmailConfig::from_env()?;

        Ok(Self {
            watchlist_path: engine.watchlist_path,
            concurrency: engine.concurrency,
            history_days: engine.history_days,
            min_history: engine.min_history,
            market_data_base_url: feeds.market_data_base_url,
            news_base_url: feeds.news_base_url,
            query_pacing_ms: feeds.query_pacing_ms,
            max_items_per_query: feeds.max_items_per_query,
            email,
        })
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            history_days: self.history_days,
            min_history: self.min_history,
        }
    }

    pub fn sentiment_config(&self) -> SentimentConfig {
        SentimentConfig {
            max_items_per_query: self.max_items_per_query,
            query_pacing: Duration::from_millis(self.query_pacing_ms),
            ..SentimentConfig::default()
        }
    }

    pub fn signal_config(&self) -> SignalConfig {
        SignalConfig::default()
    }
}
