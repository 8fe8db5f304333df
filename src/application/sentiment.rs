//! News sentiment aggregation.
//!
//! Turns an instrument's search queries into one bounded sentiment score
//! and a contributing-article count. Headlines are deduplicated by exact
//! title across all queries; each unique title is scored by the sentiment
//! model and re-weighted through a fixed financial keyword table before
//! averaging.

use crate::domain::ports::{NewsFeed, SentimentModel};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Financial keyword boosts applied on top of the raw polarity. Scanned in
/// declaration order; the first case-insensitive substring match wins.
/// A negative weight flips the headline's contribution.
const KEYWORD_WEIGHTS: &[(&str, f64)] = &[
    ("bankruptcy", -2.5),
    ("fraud", -2.2),
    ("crash", -2.0),
    ("guidance cut", -1.8),
    ("short seller", -1.8),
    ("plunge", -1.7),
    ("investigation", -1.6),
    ("recall", -1.5),
    ("downgrade", -1.4),
    ("lawsuit", -1.4),
    ("layoff", -1.2),
    ("miss", -1.0),
    ("probe", -1.0),
    ("breakthrough", 1.8),
    ("guidance raise", 1.7),
    ("upgrade", 1.6),
    ("soar", 1.6),
    ("beats", 1.5),
    ("surge", 1.5),
    ("record high", 1.4),
    ("acquisition", 1.2),
    ("buyback", 1.2),
    ("partnership", 1.0),
    ("dividend", 0.8),
];

/// Weight for titles that match nothing in the table.
const DEFAULT_KEYWORD_WEIGHT: f64 = 1.0;

/// Immutable aggregator settings, injected at construction.
#[derive(Debug, Clone)]
pub struct SentimentConfig {
    /// Ordered keyword table; lowercase keys.
    pub keyword_weights: Vec<(String, f64)>,
    /// Gain applied to the mean contribution before the final clamp.
    pub gain: f64,
    /// Cap on headlines taken from one query.
    pub max_items_per_query: usize,
    /// Pause between consecutive query fetches for one instrument, to
    /// stay polite with the upstream feed.
    pub query_pacing: Duration,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            keyword_weights: KEYWORD_WEIGHTS
                .iter()
                .map(|(keyword, weight)| (keyword.to_string(), *weight))
                .collect(),
            gain: 2.5,
            max_items_per_query: 5,
            query_pacing: Duration::from_secs(1),
        }
    }
}

pub struct SentimentAggregator {
    news: Arc<dyn NewsFeed>,
    model: Arc<dyn SentimentModel>,
    config: SentimentConfig,
}

impl SentimentAggregator {
    pub fn new(
        news: Arc<dyn NewsFeed>,
        model: Arc<dyn SentimentModel>,
        config: SentimentConfig,
    ) -> Self {
        Self {
            news,
            model,
            config,
        }
    }

    /// Fetch and score all queries for one instrument.
    ///
    /// Returns `(sentiment in [-1, 1], unique article count)`. A failed
    /// query is logged and skipped; when nothing could be fetched at all
    /// the result is `(0.0, 0)`.
    pub async fn aggregate(&self, ticker: &str, queries: &[String]) -> (f64, usize) {
        let mut seen = HashSet::new();
        let mut titles = Vec::new();

        for (idx, query) in queries.iter().enumerate() {
            if idx > 0 && !self.config.query_pacing.is_zero() {
                tokio::time::sleep(self.config.query_pacing).await;
            }

            match self.news.search(query, self.config.max_items_per_query).await {
                Ok(items) => {
                    for item in items {
                        if seen.insert(item.title.clone()) {
                            titles.push(item.title);
                        }
                    }
                }
                Err(e) => {
                    warn!(
                        "SentimentAggregator: query '{}' failed for {}: {:#}",
                        query, ticker, e
                    );
                }
            }
        }

        let (sentiment, count) = self.score_titles(&titles);
        debug!(
            "SentimentAggregator: {} scored {:.3} from {} unique headlines",
            ticker, sentiment, count
        );
        (sentiment, count)
    }

    /// Score a deduplicated set of titles. Pure; exposed separately so the
    /// weighting logic is testable without a feed.
    pub fn score_titles(&self, titles: &[String]) -> (f64, usize) {
        let mut sum = 0.0;
        let mut count = 0usize;

        for title in titles {
            let polarity = self.model.polarity(title);
            let weight = self.keyword_weight(title);
            sum += polarity * weight;
            count += 1;
        }

        if count == 0 {
            return (0.0, 0);
        }

        let sentiment = (sum / count as f64 * self.config.gain).clamp(-1.0, 1.0);
        (sentiment, count)
    }

    fn keyword_weight(&self, title: &str) -> f64 {
        let lowered = title.to_lowercase();
        for (keyword, weight) in &self.config.keyword_weights {
            if lowered.contains(keyword.as_str()) {
                return *weight;
            }
        }
        DEFAULT_KEYWORD_WEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mock::{FixedSentimentModel, MockNewsFeed};

    fn aggregator(model: FixedSentimentModel) -> SentimentAggregator {
        let config = SentimentConfig {
            query_pacing: Duration::ZERO,
            ..SentimentConfig::default()
        };
        SentimentAggregator::new(Arc::new(MockNewsFeed::default()), Arc::new(model), config)
    }

    #[test]
    fn test_empty_input_scores_zero() {
        let agg = aggregator(FixedSentimentModel::constant(0.9));
        assert_eq!(agg.score_titles(&[]), (0.0, 0));
    }

    #[test]
    fn test_plain_headline_uses_default_weight() {
        let agg = aggregator(FixedSentimentModel::constant(0.2));
        let (sentiment, count) = agg.score_titles(&["Quarterly report published".to_string()]);
        // 0.2 * 1.0 * 2.5
        assert!((sentiment - 0.5).abs() < 1e-9);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_negative_keyword_flips_contribution() {
        let agg = aggregator(FixedSentimentModel::constant(0.4));
        // "fraud" carries weight -2.2, so a positively-worded headline
        // about fraud still drags the aggregate down.
        let (sentiment, _) = agg.score_titles(&["Analysts upbeat despite fraud claims".to_string()]);
        assert!(sentiment < 0.0, "got {}", sentiment);
    }

    #[test]
    fn test_first_match_in_declaration_order_wins() {
        let agg = aggregator(FixedSentimentModel::constant(1.0));
        // Contains both "crash" (-2.0, earlier) and "upgrade" (1.6, later)
        let (sentiment, _) =
            agg.score_titles(&["Shares crash after broker upgrade reversal".to_string()]);
        // 1.0 * -2.0 * 2.5 clamps at -1
        assert_eq!(sentiment, -1.0);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let agg = aggregator(FixedSentimentModel::constant(0.4));
        let (upper, _) = agg.score_titles(&["MASSIVE BUYBACK ANNOUNCED".to_string()]);
        let (lower, _) = agg.score_titles(&["massive buyback announced".to_string()]);
        assert_eq!(upper, lower);
        assert!(upper > 0.0);
    }

    #[test]
    fn test_output_is_clamped() {
        let agg = aggregator(FixedSentimentModel::constant(1.0));
        let titles = vec!["Breakthrough product soars".to_string()];
        let (sentiment, _) = agg.score_titles(&titles);
        assert!(sentiment <= 1.0);

        let agg = aggregator(FixedSentimentModel::constant(-1.0));
        let (sentiment, _) = agg.score_titles(&titles);
        assert!(sentiment >= -1.0);
    }

    #[tokio::test]
    async fn test_duplicate_titles_count_once() {
        let feed = MockNewsFeed::default()
            .with_headlines("acme stock", vec!["Acme beats estimates", "Acme beats estimates"])
            .with_headlines("acme news", vec!["Acme beats estimates", "Acme expands"]);
        let config = SentimentConfig {
            query_pacing: Duration::ZERO,
            ..SentimentConfig::default()
        };
        let agg = SentimentAggregator::new(
            Arc::new(feed),
            Arc::new(FixedSentimentModel::constant(0.1)),
            config,
        );
        let (_, count) = agg
            .aggregate(
                "ACME.US",
                &["acme stock".to_string(), "acme news".to_string()],
            )
            .await;
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_failed_query_does_not_abort_the_rest() {
        let feed = MockNewsFeed::default()
            .with_failure("acme stock")
            .with_headlines("acme news", vec!["Acme expands"]);
        let config = SentimentConfig {
            query_pacing: Duration::ZERO,
            ..SentimentConfig::default()
        };
        let agg = SentimentAggregator::new(
            Arc::new(feed),
            Arc::new(FixedSentimentModel::constant(0.2)),
            config,
        );
        let (sentiment, count) = agg
            .aggregate(
                "ACME.US",
                &["acme stock".to_string(), "acme news".to_string()],
            )
            .await;
        assert_eq!(count, 1);
        assert!((sentiment - 0.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_total_fetch_failure_scores_zero() {
        let feed = MockNewsFeed::default().with_failure("acme stock");
        let config = SentimentConfig {
            query_pacing: Duration::ZERO,
            ..SentimentConfig::default()
        };
        let agg = SentimentAggregator::new(
            Arc::new(feed),
            Arc::new(FixedSentimentModel::constant(0.9)),
            config,
        );
        let result = agg.aggregate("ACME.US", &["acme stock".to_string()]).await;
        assert_eq!(result, (0.0, 0));
    }
}
