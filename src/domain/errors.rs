use thiserror::Error;

/// Errors raised by one instrument's analysis pipeline.
///
/// None of these abort the batch: the batch runner logs the failure and
/// continues with the remaining instruments. Numeric indeterminates
/// (zero-variance correlation, zero-denominator RSI, undefined rolling
/// means) never surface here; the analyzers substitute documented defaults
/// at the point of computation.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Insufficient history for {ticker}: {got} candles, need at least {need}")]
    DataUnavailable {
        ticker: String,
        got: usize,
        need: usize,
    },

    #[error("Market data fetch failed for {ticker}: {source}")]
    FeedFailure {
        ticker: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_unavailable_formatting() {
        let err = AnalysisError::DataUnavailable {
            ticker: "AAPL.US".to_string(),
            got: 1,
            need: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("AAPL.US"));
        assert!(msg.contains("1 candles"));
    }
}
