//! Headline polarity via the VADER algorithm.
//!
//! VADER is tuned for short social-media and news text, which makes its
//! compound score a reasonable raw polarity for single headlines. The
//! keyword re-weighting on top of it lives in the sentiment aggregator,
//! not here.

use crate::domain::ports::SentimentModel;
use vader_sentiment::SentimentIntensityAnalyzer;

pub struct VaderSentimentModel {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderSentimentModel {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderSentimentModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentModel for VaderSentimentModel {
    fn polarity(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let scores = self.analyzer.polarity_scores(text);
        scores["compound"].clamp(-1.0, 1.0)
    }
}
