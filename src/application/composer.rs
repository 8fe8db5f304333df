//! Impact composition: fuses sentiment, shock sensitivity and the market
//! vectors into the bounded expected-move percentage.
//!
//! Sentiment acts as energy that is only as impactful as the instrument's
//! available volatility room, amplified by how historically reactive the
//! instrument is and further boosted when volume corroborates the news.
//! Trend and chart extremes enter as small additive corrections.

use crate::domain::types::{ImpactScore, MarketVectors};

const IMPACT_GAIN: f64 = 4.0;
const VOLUME_BOOST_THRESHOLD: f64 = 1.5;
const VOLUME_BOOST: f64 = 1.5;
const RSI_OVERBOUGHT: f64 = 75.0;
const RSI_OVERSOLD: f64 = 30.0;
const RSI_PRESSURE: f64 = 0.5;
const DEEP_DRAWDOWN: f64 = -0.30;
const SHALLOW_DRAWDOWN: f64 = -0.05;
const DEEP_DRAWDOWN_FACTOR: f64 = 0.3;
const SHALLOW_DRAWDOWN_FACTOR: f64 = 0.1;
const TREND_WEIGHT: f64 = 0.2;
const CORRECTION_WEIGHT: f64 = 0.01;
/// Saturation bound on the raw move, i.e. +/-15% after scaling.
const MOVE_LIMIT: f64 = 0.15;

/// Combine one instrument's aggregated sentiment, sensitivity coefficient
/// and market vectors into the final bounded impact score.
pub fn compose_impact(
    sentiment: f64,
    article_count: usize,
    sensitivity: f64,
    vectors: &MarketVectors,
) -> ImpactScore {
    let volume_boost = if vectors.volume_shock_ratio > VOLUME_BOOST_THRESHOLD {
        VOLUME_BOOST
    } else {
        1.0
    };

    let impact_power = sentiment * vectors.volatility * sensitivity * volume_boost * IMPACT_GAIN;

    let rsi_pressure = if vectors.rsi > RSI_OVERBOUGHT {
        -RSI_PRESSURE
    } else if vectors.rsi < RSI_OVERSOLD {
        RSI_PRESSURE
    } else {
        0.0
    };

    // A series sitting exactly at its high carries no drawdown correction;
    // the shallow bounce term applies only strictly below the peak.
    let drawdown_factor = if vectors.drawdown_pct < DEEP_DRAWDOWN {
        DEEP_DRAWDOWN_FACTOR
    } else if vectors.drawdown_pct > SHALLOW_DRAWDOWN && vectors.drawdown_pct < 0.0 {
        SHALLOW_DRAWDOWN_FACTOR
    } else {
        0.0
    };

    let raw_move = vectors.trend * TREND_WEIGHT
        + impact_power
        + rsi_pressure * CORRECTION_WEIGHT
        + drawdown_factor * CORRECTION_WEIGHT;

    ImpactScore {
        sentiment,
        article_count,
        expected_move_pct: raw_move.clamp(-MOVE_LIMIT, MOVE_LIMIT) * 100.0,
    }
}
