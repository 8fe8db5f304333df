//! Historical shock sensitivity estimation.
//!
//! Learns, from the full price history, how an instrument has tended to
//! behave after abrupt single-day moves: a positive correlation between
//! shock-day returns and the following week's drift means shocks extend,
//! a negative one means they revert. The coefficient scales the impact
//! power in the composer. Recomputed from scratch every run.

/// Absolute daily return above which a day counts as a shock.
const SHOCK_THRESHOLD: f64 = 0.03;
/// Number of days of forward drift measured after each shock.
const FORWARD_WINDOW: usize = 5;
/// Minimum number of (shock, forward) pairs required before the
/// correlation is trusted at all.
const MIN_SHOCK_PAIRS: usize = 5;
/// How strongly the correlation shifts the coefficient away from neutral.
const CORRELATION_GAIN: f64 = 0.8;

const SENSITIVITY_MIN: f64 = 0.5;
const SENSITIVITY_MAX: f64 = 2.5;
pub const NEUTRAL_SENSITIVITY: f64 = 1.0;

/// Estimate the shock sensitivity coefficient in [0.5, 2.5] from a
/// chronological close series.
///
/// Returns exactly `1.0` when the history holds fewer than five usable
/// shock events.
pub fn estimate_sensitivity(closes: &[f64]) -> f64 {
    let mut shock_returns = Vec::new();
    let mut forward_returns = Vec::new();

    for t in 1..closes.len() {
        if closes[t - 1] <= 0.0 {
            continue;
        }
        let daily_return = closes[t] / closes[t - 1] - 1.0;
        if daily_return.abs() <= SHOCK_THRESHOLD {
            continue;
        }
        // Cumulative drift over the five sessions after the shock. Shocks
        // too close to the end of the series yield no pair.
        let end = t + FORWARD_WINDOW;
        if end >= closes.len() || closes[t] <= 0.0 {
            continue;
        }
        shock_returns.push(daily_return);
        forward_returns.push(closes[end] / closes[t] - 1.0);
    }

    if shock_returns.len() < MIN_SHOCK_PAIRS {
        return NEUTRAL_SENSITIVITY;
    }

    let correlation = pearson_correlation(&shock_returns, &forward_returns);
    (NEUTRAL_SENSITIVITY + correlation * CORRELATION_GAIN).clamp(SENSITIVITY_MIN, SENSITIVITY_MAX)
}

/// Pearson correlation of two equal-length samples. Zero variance on
/// either side yields `0.0` rather than NaN.
fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let len = x.len().min(y.len());
    if len < 2 {
        return 0.0;
    }

    let x = &x[..len];
    let y = &y[..len];

    let mean_x = x.iter().sum::<f64>() / len as f64;
    let mean_y = y.iter().sum::<f64>() / len as f64;

    let mut numer = 0.0;
    let mut denom_x = 0.0;
    let mut denom_y = 0.0;

    for i in 0..len {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        numer += dx * dy;
        denom_x += dx * dx;
        denom_y += dy * dy;
    }

    if denom_x == 0.0 || denom_y == 0.0 {
        return 0.0;
    }

    numer / (denom_x.sqrt() * denom_y.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a close series that produces exactly the given
    /// (shock return, forward return) pairs and no other shock days.
    fn series_with_shocks(pairs: &[(f64, f64)]) -> Vec<f64> {
        let mut closes = vec![100.0, 100.0];
        for &(shock, forward) in pairs {
            let last = *closes.last().unwrap();
            closes.push(last * (1.0 + shock));
            // Spread the forward drift evenly so no single day re-triggers
            // the shock threshold.
            let daily = (1.0 + forward).powf(1.0 / FORWARD_WINDOW as f64);
            let shock_close = *closes.last().unwrap();
            for d in 1..=FORWARD_WINDOW {
                closes.push(shock_close * daily.powi(d as i32));
            }
        }
        closes
    }

    #[test]
    fn test_too_few_shocks_is_neutral() {
        let closes = series_with_shocks(&[(0.05, 0.02), (0.04, 0.01), (-0.05, -0.02), (0.06, 0.03)]);
        assert_eq!(estimate_sensitivity(&closes), 1.0);
    }

    #[test]
    fn test_flat_series_is_neutral() {
        let closes = vec![50.0; 300];
        assert_eq!(estimate_sensitivity(&closes), 1.0);
    }

    #[test]
    fn test_perfect_extension_raises_sensitivity() {
        // Forward drift proportional to the shock: correlation 1.0
        let pairs: Vec<(f64, f64)> = vec![
            (0.040, 0.020),
            (0.045, 0.0225),
            (0.050, 0.025),
            (0.055, 0.0275),
            (0.060, 0.030),
        ];
        let sensitivity = estimate_sensitivity(&series_with_shocks(&pairs));
        assert!(
            (sensitivity - 1.8).abs() < 1e-6,
            "expected 1.8 for correlation 1.0, got {}",
            sensitivity
        );
    }

    #[test]
    fn test_half_correlation_yields_1_4() {
        // Shock deviations [-2,-1,0,1,2] against forward deviations
        // [-1,1,-2,0,2] correlate at exactly 0.5, so the coefficient is
        // 1.0 + 0.5 * 0.8 = 1.4.
        let pairs: Vec<(f64, f64)> = vec![
            (0.040, -0.02),
            (0.045, 0.02),
            (0.050, -0.04),
            (0.055, 0.00),
            (0.060, 0.04),
        ];
        let sensitivity = estimate_sensitivity(&series_with_shocks(&pairs));
        assert!(
            (sensitivity - 1.4).abs() < 1e-6,
            "expected 1.4 for correlation 0.5, got {}",
            sensitivity
        );
    }

    #[test]
    fn test_mean_reversion_lowers_sensitivity() {
        // Forward drift opposes the shock: correlation -1.0
        let pairs: Vec<(f64, f64)> = vec![
            (0.040, -0.020),
            (0.045, -0.0225),
            (0.050, -0.025),
            (0.055, -0.0275),
            (0.060, -0.030),
        ];
        // 1.0 - 1.0 * 0.8 = 0.2 saturates at the lower bound
        let sensitivity = estimate_sensitivity(&series_with_shocks(&pairs));
        assert!(
            (sensitivity - 0.5).abs() < 1e-6,
            "expected clamp at 0.5, got {}",
            sensitivity
        );
    }

    #[test]
    fn test_zero_variance_forward_is_neutral() {
        // Identical forward drift after every shock: undefined correlation
        // is treated as zero.
        let pairs: Vec<(f64, f64)> = vec![
            (0.040, 0.02),
            (0.045, 0.02),
            (0.050, 0.02),
            (0.055, 0.02),
            (0.060, 0.02),
        ];
        let sensitivity = estimate_sensitivity(&series_with_shocks(&pairs));
        assert!(
            (sensitivity - 1.0).abs() < 1e-9,
            "expected neutral for zero variance, got {}",
            sensitivity
        );
    }

    #[test]
    fn test_output_stays_in_bounds() {
        let pairs: Vec<(f64, f64)> = vec![
            (0.08, 0.10),
            (0.09, 0.11),
            (0.10, 0.12),
            (-0.08, -0.10),
            (-0.09, -0.11),
            (0.07, 0.09),
        ];
        let sensitivity = estimate_sensitivity(&series_with_shocks(&pairs));
        assert!((0.5..=2.5).contains(&sensitivity));
    }

    #[test]
    fn test_pearson_zero_variance() {
        assert_eq!(pearson_correlation(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
    }
}
