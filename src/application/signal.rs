//! Signal classification: maps the expected-move percentage onto the five
//! discrete signals through an ordered set of non-overlapping half-open
//! intervals, so threshold edits can never silently change precedence.

use crate::domain::types::Signal;

/// Classification thresholds, injected at construction.
#[derive(Debug, Clone)]
pub struct SignalConfig {
    /// Boundary between Buy/Sell and their strong variants, in percent.
    pub strong_threshold: f64,
    /// Boundary between Wait and Buy/Sell, in percent.
    pub weak_threshold: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            strong_threshold: 3.0,
            weak_threshold: 1.0,
        }
    }
}

/// Stateless classifier over the intervals
/// `(-inf,-3] | (-3,-1] | (-1,1) | [1,3) | [3,inf)`.
pub struct SignalClassifier {
    config: SignalConfig,
}

impl SignalClassifier {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    pub fn classify(&self, expected_move_pct: f64) -> Signal {
        let strong = self.config.strong_threshold;
        let weak = self.config.weak_threshold;

        // Evaluated bottom-up; each arm owns exactly one interval.
        if expected_move_pct <= -strong {
            Signal::StrongSell
        } else if expected_move_pct <= -weak {
            Signal::Sell
        } else if expected_move_pct < weak {
            Signal::Wait
        } else if expected_move_pct < strong {
            Signal::Buy
        } else {
            Signal::StrongBuy
        }
    }
}

impl Default for SignalClassifier {
    fn default() -> Self {
        Self::new(SignalConfig::default())
    }
}
