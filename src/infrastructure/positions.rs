//! Watchlist and position loading from a TOML file.
//!
//! ```toml
//! [[instrument]]
//! ticker = "AAPL.US"
//! name = "Apple"
//! currency = "USD"
//! group = "holdings"
//! queries = ["Apple stock", "AAPL earnings"]
//! buy_price = 182.50
//! quantity = 12
//! ```

use crate::domain::ports::PositionSource;
use crate::domain::types::{Group, Instrument, PortfolioPosition};
use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
struct WatchlistFile {
    #[serde(default)]
    instrument: Vec<InstrumentEntry>,
}

#[derive(Debug, Deserialize)]
struct InstrumentEntry {
    ticker: String,
    name: String,
    #[serde(default = "default_currency")]
    currency: String,
    group: Option<Group>,
    #[serde(default)]
    queries: Vec<String>,
    buy_price: Option<Decimal>,
    quantity: Option<Decimal>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl InstrumentEntry {
    fn into_instrument(self) -> Instrument {
        let position = match (self.buy_price, self.quantity) {
            (Some(buy_price), Some(quantity)) if buy_price > Decimal::ZERO => {
                Some(PortfolioPosition {
                    buy_price,
                    quantity,
                    currency: self.currency.clone(),
                })
            }
            _ => None,
        };

        // Explicit group wins; otherwise held instruments land in
        // Holdings and the rest in Watchlist.
        let group = self.group.unwrap_or(if position.is_some() {
            Group::Holdings
        } else {
            Group::Watchlist
        });

        let queries = if self.queries.is_empty() {
            vec![format!("{} stock", self.name)]
        } else {
            self.queries
        };

        Instrument {
            ticker: self.ticker,
            name: self.name,
            currency: self.currency,
            group,
            queries,
            position,
        }
    }
}

pub struct TomlPositionSource {
    path: String,
}

impl TomlPositionSource {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }

    fn parse(content: &str) -> Result<Vec<Instrument>> {
        let file: WatchlistFile = toml::from_str(content).context("Invalid watchlist TOML")?;
        Ok(file
            .instrument
            .into_iter()
            .map(InstrumentEntry::into_instrument)
            .collect())
    }
}

#[async_trait]
impl PositionSource for TomlPositionSource {
    async fn load(&self) -> Result<Vec<Instrument>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read watchlist '{}'", self.path))?;
        let instruments = Self::parse(&content)?;
        info!(
            "TomlPositionSource: loaded {} instruments from {}",
            instruments.len(),
            self.path
        );
        Ok(instruments)
    }
}
