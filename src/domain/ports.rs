use crate::domain::types::{Candle, Instrument, NewsItem};
use anyhow::Result;
use async_trait::async_trait;

// Need async_trait for async functions in traits
#[async_trait]
pub trait MarketDataFeed: Send + Sync {
    /// Fetch chronological daily OHLCV bars for a ticker, covering roughly
    /// the trailing `window_days` calendar days. May return empty or short
    /// data; callers decide whether that is enough to analyze.
    async fn fetch_daily(&self, ticker: &str, window_days: u32) -> Result<Vec<Candle>>;
}

#[async_trait]
pub trait NewsFeed: Send + Sync {
    /// Search recent headlines for a query, capped at `max_items` results.
    async fn search(&self, query: &str, max_items: usize) -> Result<Vec<NewsItem>>;
}

/// Raw polarity of a piece of text in [-1, 1]. Pure and synchronous so the
/// scoring stages stay side-effect-free.
pub trait SentimentModel: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Load the watchlist: every tracked instrument with its news queries
    /// and, where one exists, the open position.
    async fn load(&self) -> Result<Vec<Instrument>>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver an out-of-band alert (email, webhook, log line...).
    async fn notify(&self, subject: &str, body: &str) -> Result<()>;
}
