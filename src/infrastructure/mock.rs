//! In-memory mock collaborators for unit and integration tests.

use crate::domain::ports::{MarketDataFeed, NewsFeed, Notifier, PositionSource, SentimentModel};
use crate::domain::types::{Candle, Instrument, NewsItem};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Build a chronological daily candle series from closes with a constant
/// volume. Open/high/low are synthesized around the close.
pub fn daily_candles(closes: &[f64], volume: f64) -> Vec<Candle> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let close = Decimal::from_f64(close).unwrap_or(Decimal::ZERO);
            Candle {
                date: start + Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: Decimal::from_f64(volume).unwrap_or(Decimal::ZERO),
            }
        })
        .collect()
}

/// Same as [`daily_candles`] but with per-day volumes.
pub fn daily_candles_with_volumes(closes: &[f64], volumes: &[f64]) -> Vec<Candle> {
    let mut candles = daily_candles(closes, 0.0);
    for (candle, &volume) in candles.iter_mut().zip(volumes) {
        candle.volume = Decimal::from_f64(volume).unwrap_or(Decimal::ZERO);
    }
    candles
}

#[derive(Default)]
pub struct MockMarketDataFeed {
    series: HashMap<String, Vec<Candle>>,
}

impl MockMarketDataFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, ticker: &str, candles: Vec<Candle>) -> Self {
        self.series.insert(ticker.to_string(), candles);
        self
    }
}

#[async_trait]
impl MarketDataFeed for MockMarketDataFeed {
    async fn fetch_daily(&self, ticker: &str, _window_days: u32) -> Result<Vec<Candle>> {
        Ok(self.series.get(ticker).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct MockNewsFeed {
    headlines: HashMap<String, Vec<String>>,
    failures: HashSet<String>,
}

impl MockNewsFeed {
    pub fn with_headlines(mut self, query: &str, titles: Vec<&str>) -> Self {
        self.headlines
            .insert(query.to_string(), titles.into_iter().map(String::from).collect());
        self
    }

    pub fn with_failure(mut self, query: &str) -> Self {
        self.failures.insert(query.to_string());
        self
    }
}

#[async_trait]
impl NewsFeed for MockNewsFeed {
    async fn search(&self, query: &str, max_items: usize) -> Result<Vec<NewsItem>> {
        if self.failures.contains(query) {
            anyhow::bail!("simulated news outage for '{}'", query);
        }
        Ok(self
            .headlines
            .get(query)
            .map(|titles| {
                titles
                    .iter()
                    .take(max_items)
                    .map(|title| NewsItem {
                        title: title.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Sentiment model returning a fixed polarity, with optional per-title
/// overrides.
pub struct FixedSentimentModel {
    default_polarity: f64,
    overrides: HashMap<String, f64>,
}

impl FixedSentimentModel {
    pub fn constant(polarity: f64) -> Self {
        Self {
            default_polarity: polarity,
            overrides: HashMap::new(),
        }
    }

    pub fn with_override(mut self, title: &str, polarity: f64) -> Self {
        self.overrides.insert(title.to_string(), polarity);
        self
    }
}

impl SentimentModel for FixedSentimentModel {
    fn polarity(&self, text: &str) -> f64 {
        self.overrides
            .get(text)
            .copied()
            .unwrap_or(self.default_polarity)
    }
}

pub struct StaticPositionSource {
    instruments: Vec<Instrument>,
}

impl StaticPositionSource {
    pub fn new(instruments: Vec<Instrument>) -> Self {
        Self { instruments }
    }
}

#[async_trait]
impl PositionSource for StaticPositionSource {
    async fn load(&self) -> Result<Vec<Instrument>> {
        Ok(self.instruments.clone())
    }
}

/// Records every notification instead of delivering it.
#[derive(Default)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().expect("notifier mutex").clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, subject: &str, body: &str) -> Result<()> {
        self.sent
            .lock()
            .expect("notifier mutex")
            .push((subject.to_string(), body.to_string()));
        Ok(())
    }
}
