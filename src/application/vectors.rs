//! Market vector analysis: volatility, volume anomaly, RSI, drawdown and
//! short-term trend, all computed as pure functions over the close/volume
//! history. Indeterminate values (short history, zero denominators) resolve
//! to the documented defaults instead of propagating NaN.

use crate::domain::types::MarketVectors;
use statrs::statistics::Statistics;

/// Trailing window (in returns) for realized volatility.
const RETURN_WINDOW: usize = 20;
/// Trailing window (in days) for the mean volume baseline.
const VOLUME_WINDOW: usize = 20;
const RSI_PERIOD: usize = 14;
/// Trailing window for the drawdown reference high, one trading year.
const DRAWDOWN_WINDOW: usize = 252;
const SMA_FAST: usize = 5;
const SMA_SLOW: usize = 20;

const DEFAULT_VOLATILITY: f64 = 0.015;
const DEFAULT_VOLUME_SHOCK_RATIO: f64 = 1.0;
const NEUTRAL_RSI: f64 = 50.0;

/// Compute the full vector bundle for one instrument.
pub fn analyze_vectors(closes: &[f64], volumes: &[f64]) -> MarketVectors {
    MarketVectors {
        volatility: rolling_volatility(closes).unwrap_or(DEFAULT_VOLATILITY),
        volume_shock_ratio: volume_shock_ratio(volumes).unwrap_or(DEFAULT_VOLUME_SHOCK_RATIO),
        rsi: rsi(closes).unwrap_or(NEUTRAL_RSI),
        drawdown_pct: drawdown_pct(closes),
        trend: sma_trend(closes).unwrap_or(0.0),
    }
}

/// Standard deviation of daily returns over the trailing window.
///
/// `None` when the history is too short to fill the window.
pub fn rolling_volatility(closes: &[f64]) -> Option<f64> {
    if closes.len() < RETURN_WINDOW + 1 {
        return None;
    }
    let window = &closes[closes.len() - (RETURN_WINDOW + 1)..];
    let mut returns = Vec::with_capacity(RETURN_WINDOW);
    for i in 1..window.len() {
        if window[i - 1] <= 0.0 {
            return None;
        }
        returns.push(window[i] / window[i - 1] - 1.0);
    }
    Some(returns.iter().std_dev())
}

/// Last volume divided by its trailing mean. `None` when the window cannot
/// be filled or the mean is zero.
pub fn volume_shock_ratio(volumes: &[f64]) -> Option<f64> {
    if volumes.len() < VOLUME_WINDOW {
        return None;
    }
    let window = &volumes[volumes.len() - VOLUME_WINDOW..];
    let mean = window.iter().mean();
    if mean <= 0.0 {
        return None;
    }
    Some(window[window.len() - 1] / mean)
}

/// RSI over a simple-average gain/loss window.
///
/// When the average loss is zero the textbook ratio is undefined; an
/// all-gain window saturates at `100.0` and a flat window reads neutral
/// `50.0`. `None` when the history cannot fill the window.
pub fn rsi(closes: &[f64]) -> Option<f64> {
    if closes.len() < RSI_PERIOD + 1 {
        return None;
    }
    let window = &closes[closes.len() - (RSI_PERIOD + 1)..];

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for i in 1..window.len() {
        let delta = window[i] - window[i - 1];
        if delta > 0.0 {
            gain_sum += delta;
        } else {
            loss_sum += -delta;
        }
    }

    let avg_gain = gain_sum / RSI_PERIOD as f64;
    let avg_loss = loss_sum / RSI_PERIOD as f64;

    if avg_loss == 0.0 {
        return Some(if avg_gain > 0.0 { 100.0 } else { NEUTRAL_RSI });
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Relative distance of the last close below the trailing high. Always <= 0.
pub fn drawdown_pct(closes: &[f64]) -> f64 {
    if closes.is_empty() {
        return 0.0;
    }
    let window = &closes[closes.len().saturating_sub(DRAWDOWN_WINDOW)..];
    let peak = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if peak <= 0.0 {
        return 0.0;
    }
    (window[window.len() - 1] - peak) / peak
}

/// (SMA5 - SMA20) / SMA20. `None` when the slow window cannot be filled.
pub fn sma_trend(closes: &[f64]) -> Option<f64> {
    if closes.len() < SMA_SLOW {
        return None;
    }
    let fast = closes[closes.len() - SMA_FAST..].iter().mean();
    let slow = closes[closes.len() - SMA_SLOW..].iter().mean();
    if slow <= 0.0 {
        return None;
    }
    Some((fast - slow) / slow)
}
