//! Batch orchestration: runs every instrument's pipeline through a bounded
//! worker pool, then buckets and orders the results for reporting. One
//! instrument failing never aborts the batch.

use crate::application::analyzer::InstrumentAnalyzer;
use crate::domain::types::{AnalysisResult, Group, Instrument};
use futures::stream::{self, StreamExt};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

/// Results of one batch pass for a single report bucket, ordered by
/// descending expected move.
#[derive(Debug, Clone)]
pub struct GroupedResults {
    pub group: Group,
    pub results: Vec<AnalysisResult>,
}

pub struct BatchRunner {
    analyzer: Arc<InstrumentAnalyzer>,
    concurrency: usize,
}

impl BatchRunner {
    pub fn new(analyzer: Arc<InstrumentAnalyzer>, concurrency: usize) -> Self {
        Self {
            analyzer,
            concurrency: concurrency.max(1),
        }
    }

    /// Analyze all instruments with bounded concurrency and return the
    /// grouped, sorted results.
    pub async fn run(&self, instruments: &[Instrument]) -> Vec<GroupedResults> {
        info!(
            "BatchRunner: analyzing {} instruments ({} workers)",
            instruments.len(),
            self.concurrency
        );

        // `buffered` keeps completion in input order, which the stable
        // sort below relies on for equal scores.
        let results: Vec<Option<AnalysisResult>> = stream::iter(instruments)
            .map(|instrument| {
                let analyzer = Arc::clone(&self.analyzer);
                async move {
                    match analyzer.analyze(instrument).await {
                        Ok(result) => Some(result),
                        Err(e) => {
                            warn!("BatchRunner: skipping {}: {}", instrument.ticker, e);
                            None
                        }
                    }
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        Self::group(results.into_iter().flatten().collect())
    }

    fn group(results: Vec<AnalysisResult>) -> Vec<GroupedResults> {
        const BUCKET_ORDER: [Group; 3] = [Group::Holdings, Group::Watchlist, Group::Market];

        BUCKET_ORDER
            .iter()
            .map(|&group| {
                let mut bucket: Vec<AnalysisResult> = results
                    .iter()
                    .filter(|result| result.group == group)
                    .cloned()
                    .collect();
                // sort_by is stable, so equal scores preserve input order
                bucket.sort_by(|a, b| {
                    b.impact
                        .expected_move_pct
                        .partial_cmp(&a.impact.expected_move_pct)
                        .unwrap_or(Ordering::Equal)
                });
                GroupedResults {
                    group,
                    results: bucket,
                }
            })
            .collect()
    }
}

/// All results in the batch that should trigger a notification.
pub fn alerts(groups: &[GroupedResults]) -> Vec<&AnalysisResult> {
    groups
        .iter()
        .flat_map(|group| group.results.iter())
        .filter(|result| result.requires_alert())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ImpactScore, MarketVectors, Signal};
    use rust_decimal_macros::dec;

    fn result(ticker: &str, group: Group, expected_move_pct: f64) -> AnalysisResult {
        AnalysisResult {
            ticker: ticker.to_string(),
            name: ticker.to_string(),
            currency: "USD".to_string(),
            group,
            last_close: dec!(10),
            sensitivity: 1.0,
            vectors: MarketVectors {
                volatility: 0.01,
                volume_shock_ratio: 1.0,
                rsi: 50.0,
                drawdown_pct: -0.1,
                trend: 0.0,
            },
            impact: ImpactScore {
                sentiment: 0.0,
                article_count: 0,
                expected_move_pct,
            },
            signal: Signal::Wait,
            position: None,
        }
    }

    #[test]
    fn test_grouping_orders_by_descending_move() {
        let grouped = BatchRunner::group(vec![
            result("A", Group::Watchlist, 1.0),
            result("B", Group::Watchlist, 3.0),
            result("C", Group::Holdings, -2.0),
            result("D", Group::Watchlist, 2.0),
        ]);

        assert_eq!(grouped[0].group, Group::Holdings);
        assert_eq!(grouped[0].results[0].ticker, "C");

        let watchlist: Vec<&str> = grouped[1]
            .results
            .iter()
            .map(|r| r.ticker.as_str())
            .collect();
        assert_eq!(watchlist, vec!["B", "D", "A"]);
    }

    #[test]
    fn test_equal_scores_preserve_input_order() {
        let grouped = BatchRunner::group(vec![
            result("FIRST", Group::Market, 1.5),
            result("SECOND", Group::Market, 1.5),
            result("THIRD", Group::Market, 1.5),
        ]);
        let market: Vec<&str> = grouped[2]
            .results
            .iter()
            .map(|r| r.ticker.as_str())
            .collect();
        assert_eq!(market, vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn test_empty_groups_are_kept() {
        let grouped = BatchRunner::group(vec![result("A", Group::Market, 0.0)]);
        assert_eq!(grouped.len(), 3);
        assert!(grouped[0].results.is_empty());
        assert!(grouped[1].results.is_empty());
        assert_eq!(grouped[2].results.len(), 1);
    }
}
