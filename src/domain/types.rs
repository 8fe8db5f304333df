use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One daily OHLCV bar. A price series is a chronological `Vec<Candle>`,
/// immutable once fetched for a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

/// A single news headline. Deduplicated by exact title text within one
/// instrument's analysis; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
}

/// Which report bucket an instrument belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Holdings,
    Watchlist,
    Market,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Holdings => write!(f, "HOLDINGS"),
            Group::Watchlist => write!(f, "WATCHLIST"),
            Group::Market => write!(f, "MARKET"),
        }
    }
}

/// An open position attached to a watchlist entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioPosition {
    pub buy_price: Decimal,
    pub quantity: Decimal,
    pub currency: String,
}

/// One tracked instrument as loaded from the position source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instrument {
    pub ticker: String,
    pub name: String,
    pub currency: String,
    pub group: Group,
    pub queries: Vec<String>,
    pub position: Option<PortfolioPosition>,
}

/// Anomaly vectors derived from the price series.
///
/// `trend` is the relative distance of SMA5 above SMA20 and feeds the
/// impact composer together with the other vectors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MarketVectors {
    /// Standard deviation of daily returns over the trailing window. >= 0.
    pub volatility: f64,
    /// Last volume divided by its trailing mean. >= 0.
    pub volume_shock_ratio: f64,
    /// Relative strength index, 0..=100.
    pub rsi: f64,
    /// Distance below the trailing close high. Always <= 0.
    pub drawdown_pct: f64,
    /// (SMA5 - SMA20) / SMA20.
    pub trend: f64,
}

/// Fused sentiment and expected-move output of the impact composer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ImpactScore {
    /// Aggregated news sentiment, clamped to [-1, 1].
    pub sentiment: f64,
    /// Number of unique headlines that contributed.
    pub article_count: usize,
    /// Bounded one-period move forecast in percent, clamped to [-15, 15].
    pub expected_move_pct: f64,
}

/// Discrete trading signal derived from the expected move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    StrongSell,
    Sell,
    Wait,
    Buy,
    StrongBuy,
}

impl Signal {
    pub fn is_buy_class(&self) -> bool {
        matches!(self, Signal::Buy | Signal::StrongBuy)
    }

    pub fn is_sell_class(&self) -> bool {
        matches!(self, Signal::Sell | Signal::StrongSell)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::StrongSell => write!(f, "STRONG_SELL"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Wait => write!(f, "WAIT"),
            Signal::Buy => write!(f, "BUY"),
            Signal::StrongBuy => write!(f, "STRONG_BUY"),
        }
    }
}

/// Advice category for an instrument with an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advice {
    ExtendGains,
    HoldBuyDip,
    TakeProfit,
    StopLoss,
    OverheatedCaution,
    Oversold,
    Watch,
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advice::ExtendGains => write!(f, "extend gains"),
            Advice::HoldBuyDip => write!(f, "hold / buy the dip"),
            Advice::TakeProfit => write!(f, "take profit"),
            Advice::StopLoss => write!(f, "stop loss"),
            Advice::OverheatedCaution => write!(f, "overheated caution"),
            Advice::Oversold => write!(f, "oversold"),
            Advice::Watch => write!(f, "watch"),
        }
    }
}

/// Profit/loss evaluation of an open position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PositionResult {
    pub pl: Decimal,
    pub pl_pct: f64,
    pub advice: Advice,
}

/// The per-instrument output of one batch pass. Produced fresh each run and
/// handed to the report renderer and notifier; never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ticker: String,
    pub name: String,
    pub currency: String,
    pub group: Group,
    pub last_close: Decimal,
    pub sensitivity: f64,
    pub vectors: MarketVectors,
    pub impact: ImpactScore,
    pub signal: Signal,
    pub position: Option<PositionResult>,
}

impl AnalysisResult {
    /// Whether this result should trigger an out-of-band alert: a strong
    /// signal, a stop-loss/take-profit advice, or a volume shock.
    pub fn requires_alert(&self) -> bool {
        if matches!(self.signal, Signal::StrongBuy | Signal::StrongSell) {
            return true;
        }
        if let Some(position) = &self.position {
            if matches!(position.advice, Advice::StopLoss | Advice::TakeProfit) {
                return true;
            }
        }
        self.vectors.volume_shock_ratio > 1.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn result_with(
        signal: Signal,
        advice: Option<Advice>,
        volume_shock_ratio: f64,
    ) -> AnalysisResult {
        AnalysisResult {
            ticker: "TEST.US".to_string(),
            name: "Test Corp".to_string(),
            currency: "USD".to_string(),
            group: Group::Watchlist,
            last_close: dec!(100.0),
            sensitivity: 1.0,
            vectors: MarketVectors {
                volatility: 0.01,
                volume_shock_ratio,
                rsi: 50.0,
                drawdown_pct: -0.1,
                trend: 0.0,
            },
            impact: ImpactScore {
                sentiment: 0.0,
                article_count: 0,
                expected_move_pct: 0.0,
            },
            signal,
            position: advice.map(|advice| PositionResult {
                pl: dec!(0.0),
                pl_pct: 0.0,
                advice,
            }),
        }
    }

    #[test]
    fn test_alert_on_strong_signal() {
        assert!(result_with(Signal::StrongBuy, None, 1.0).requires_alert());
        assert!(result_with(Signal::StrongSell, None, 1.0).requires_alert());
        assert!(!result_with(Signal::Wait, None, 1.0).requires_alert());
    }

    #[test]
    fn test_alert_on_exit_advice() {
        assert!(result_with(Signal::Sell, Some(Advice::StopLoss), 1.0).requires_alert());
        assert!(result_with(Signal::Sell, Some(Advice::TakeProfit), 1.0).requires_alert());
        assert!(!result_with(Signal::Wait, Some(Advice::Watch), 1.0).requires_alert());
    }

    #[test]
    fn test_alert_on_volume_shock() {
        assert!(result_with(Signal::Wait, None, 1.6).requires_alert());
        // Exactly at the threshold is not a shock
        assert!(!result_with(Signal::Wait, None, 1.5).requires_alert());
    }

    #[test]
    fn test_signal_classes() {
        assert!(Signal::Buy.is_buy_class());
        assert!(Signal::StrongBuy.is_buy_class());
        assert!(Signal::Sell.is_sell_class());
        assert!(Signal::StrongSell.is_sell_class());
        assert!(!Signal::Wait.is_buy_class());
        assert!(!Signal::Wait.is_sell_class());
    }

    #[test]
    fn test_advice_labels() {
        assert_eq!(Advice::HoldBuyDip.to_string(), "hold / buy the dip");
        assert_eq!(Advice::StopLoss.to_string(), "stop loss");
    }
}
