//! Per-instrument analysis pipeline: fetch the price history, run the
//! sentiment aggregation concurrently with the price-series analytics,
//! then compose, classify and (for held positions) advise.

use crate::application::advisor::evaluate_position;
use crate::application::composer::compose_impact;
use crate::application::sensitivity::estimate_sensitivity;
use crate::application::sentiment::SentimentAggregator;
use crate::application::signal::SignalClassifier;
use crate::application::vectors::analyze_vectors;
use crate::domain::errors::AnalysisError;
use crate::domain::ports::MarketDataFeed;
use crate::domain::types::{AnalysisResult, Instrument};
use rust_decimal::prelude::ToPrimitive;
use std::sync::Arc;
use tracing::debug;

/// Runtime knobs for the pipeline.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Calendar days of history requested from the market feed. 400 covers
    /// the 252-trading-day drawdown window with margin.
    pub history_days: u32,
    /// Minimum candle count below which an instrument is skipped.
    pub min_history: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_days: 400,
            min_history: 2,
        }
    }
}

pub struct InstrumentAnalyzer {
    market: Arc<dyn MarketDataFeed>,
    sentiment: SentimentAggregator,
    classifier: SignalClassifier,
    config: EngineConfig,
}

impl InstrumentAnalyzer {
    pub fn new(
        market: Arc<dyn MarketDataFeed>,
        sentiment: SentimentAggregator,
        classifier: SignalClassifier,
        config: EngineConfig,
    ) -> Self {
        Self {
            market,
            sentiment,
            classifier,
            config,
        }
    }

    /// Run the full pipeline for one instrument.
    ///
    /// Fails with `DataUnavailable` (skip, no partial result) when the
    /// feed returns too little history, and with `FeedFailure` when the
    /// fetch itself errors. Neither aborts the surrounding batch.
    pub async fn analyze(&self, instrument: &Instrument) -> Result<AnalysisResult, AnalysisError> {
        let candles = self
            .market
            .fetch_daily(&instrument.ticker, self.config.history_days)
            .await
            .map_err(|source| AnalysisError::FeedFailure {
                ticker: instrument.ticker.clone(),
                source,
            })?;

        if candles.len() < self.config.min_history {
            return Err(AnalysisError::DataUnavailable {
                ticker: instrument.ticker.clone(),
                got: candles.len(),
                need: self.config.min_history,
            });
        }

        let closes: Vec<f64> = candles
            .iter()
            .map(|c| c.close.to_f64().unwrap_or(0.0))
            .collect();
        let volumes: Vec<f64> = candles
            .iter()
            .map(|c| c.volume.to_f64().unwrap_or(0.0))
            .collect();

        // The news fetch overlaps the price-series analytics; the numeric
        // stages themselves stay synchronous and side-effect-free.
        let ((sentiment, article_count), (sensitivity, vectors)) = tokio::join!(
            self.sentiment.aggregate(&instrument.ticker, &instrument.queries),
            async { (estimate_sensitivity(&closes), analyze_vectors(&closes, &volumes)) }
        );

        let impact = compose_impact(sentiment, article_count, sensitivity, &vectors);
        let signal = self.classifier.classify(impact.expected_move_pct);

        let last_close = candles[candles.len() - 1].close;
        let position = instrument
            .position
            .as_ref()
            .and_then(|p| evaluate_position(p, last_close, signal, vectors.rsi));

        debug!(
            "InstrumentAnalyzer: {} move {:.2}% signal {} ({} articles)",
            instrument.ticker, impact.expected_move_pct, signal, article_count
        );

        Ok(AnalysisResult {
            ticker: instrument.ticker.clone(),
            name: instrument.name.clone(),
            currency: instrument.currency.clone(),
            group: instrument.group,
            last_close,
            sensitivity,
            vectors,
            impact,
            signal,
            position,
        })
    }
}
