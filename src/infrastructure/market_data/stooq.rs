//! Daily OHLCV history from the Stooq CSV endpoint.
//!
//! One GET per instrument, e.g.
//! `https://stooq.com/q/d/l/?s=aapl.us&d1=20250101&d2=20250601&i=d`,
//! returning `Date,Open,High,Low,Close,Volume` rows in chronological
//! order. Malformed rows are skipped with a warning rather than failing
//! the whole series.

use crate::domain::ports::MarketDataFeed;
use crate::domain::types::Candle;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use reqwest_middleware::ClientWithMiddleware;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Deserialize)]
struct StooqRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Open")]
    open: Decimal,
    #[serde(rename = "High")]
    high: Decimal,
    #[serde(rename = "Low")]
    low: Decimal,
    #[serde(rename = "Close")]
    close: Decimal,
    // Index series come without a volume column
    #[serde(rename = "Volume", default)]
    volume: Option<Decimal>,
}

pub struct StooqMarketDataFeed {
    base_url: String,
    client: ClientWithMiddleware,
}

impl StooqMarketDataFeed {
    pub fn new(base_url: &str, client: ClientWithMiddleware) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
        }
    }

    fn request_url(&self, ticker: &str, window_days: u32) -> Result<Url> {
        let end = Utc::now().date_naive();
        let start = end - Duration::days(i64::from(window_days));
        Url::parse_with_params(
            &self.base_url,
            &[
                ("s", ticker.to_lowercase().as_str()),
                ("d1", start.format("%Y%m%d").to_string().as_str()),
                ("d2", end.format("%Y%m%d").to_string().as_str()),
                ("i", "d"),
            ],
        )
        .with_context(|| format!("Invalid market data URL for {}", ticker))
    }

    fn parse_csv(ticker: &str, body: &[u8]) -> Vec<Candle> {
        let mut reader = csv::Reader::from_reader(body);
        let mut candles = Vec::new();

        for row in reader.deserialize::<StooqRow>() {
            match row {
                Ok(row) => candles.push(Candle {
                    date: row.date,
                    open: row.open,
                    high: row.high,
                    low: row.low,
                    close: row.close,
                    volume: row.volume.unwrap_or(Decimal::ZERO),
                }),
                Err(e) => {
                    warn!("StooqMarketDataFeed: skipping malformed row for {}: {}", ticker, e);
                }
            }
        }

        candles
    }
}

#[async_trait]
impl MarketDataFeed for StooqMarketDataFeed {
    async fn fetch_daily(&self, ticker: &str, window_days: u32) -> Result<Vec<Candle>> {
        let url = self.request_url(ticker, window_days)?;

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .with_context(|| format!("Market data request failed for {}", ticker))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Market data request for {} returned HTTP {}", ticker, status);
        }

        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read market data body for {}", ticker))?;

        let candles = Self::parse_csv(ticker, &body);
        debug!(
            "StooqMarketDataFeed: {} returned {} candles",
            ticker,
            candles.len()
        );
        Ok(candles)
    }
}
