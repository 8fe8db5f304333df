//! marketpulse - one deterministic scoring pass over a watchlist.
//!
//! Fetches daily price history and recent headlines for every tracked
//! instrument, fuses them into an expected-move score and trading signal,
//! prints the grouped report and dispatches alerts for anything that
//! crossed a strong-signal, exit-advice or volume-shock condition.

use anyhow::Result;
use clap::Parser;
use marketpulse::application::analyzer::InstrumentAnalyzer;
use marketpulse::application::batch::{self, BatchRunner};
use marketpulse::application::sentiment::SentimentAggregator;
use marketpulse::application::signal::SignalClassifier;
use marketpulse::config::Config;
use marketpulse::domain::ports::{Notifier, PositionSource};
use marketpulse::infrastructure::HttpClientFactory;
use marketpulse::infrastructure::market_data::StooqMarketDataFeed;
use marketpulse::infrastructure::news::{GoogleNewsFeed, VaderSentimentModel};
use marketpulse::infrastructure::notify::{LogNotifier, SmtpNotifier};
use marketpulse::infrastructure::positions::TomlPositionSource;
use marketpulse::interfaces::report;
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "marketpulse", version, about = "Composite market-impact scoring over a watchlist")]
struct Args {
    /// Path to the watchlist TOML file (overrides WATCHLIST_PATH)
    #[arg(long)]
    watchlist: Option<String>,

    /// Maximum concurrent instrument pipelines (overrides CONCURRENCY)
    #[arg(long)]
    concurrency: Option<usize>,

    /// Calendar days of price history to request (overrides HISTORY_DAYS)
    #[arg(long)]
    history_days: Option<u32>,

    /// Print the report but skip alert delivery
    #[arg(long)]
    no_alerts: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(watchlist) = args.watchlist {
        config.watchlist_path = watchlist;
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(history_days) = args.history_days {
        config.history_days = history_days;
    }

    info!(
        "marketpulse {} starting (watchlist: {}, {} workers)",
        env!("CARGO_PKG_VERSION"),
        config.watchlist_path,
        config.concurrency
    );

    // Collaborators
    let client = HttpClientFactory::create_client();
    let market = Arc::new(StooqMarketDataFeed::new(
        &config.market_data_base_url,
        client.clone(),
    ));
    let news = Arc::new(GoogleNewsFeed::new(&config.news_base_url, client));
    let model = Arc::new(VaderSentimentModel::new());
    let positions = TomlPositionSource::new(&config.watchlist_path);
    let notifier: Arc<dyn Notifier> = match &config.email {
        Some(email) => Arc::new(SmtpNotifier::new(email.clone())),
        None => Arc::new(LogNotifier),
    };

    // Engine
    let sentiment = SentimentAggregator::new(news, model, config.sentiment_config());
    let classifier = SignalClassifier::new(config.signal_config());
    let analyzer = Arc::new(InstrumentAnalyzer::new(
        market,
        sentiment,
        classifier,
        config.engine_config(),
    ));
    let runner = BatchRunner::new(analyzer, config.concurrency);

    // One batch pass
    let instruments = positions.load().await?;
    if instruments.is_empty() {
        warn!("Watchlist is empty, nothing to analyze.");
        return Ok(());
    }

    let groups = runner.run(&instruments).await;
    println!("{}", report::render(&groups));

    let alerts = batch::alerts(&groups);
    if alerts.is_empty() {
        info!("No alert conditions in this batch.");
    } else if args.no_alerts {
        info!("{} alert(s) found, delivery suppressed by --no-alerts.", alerts.len());
    } else {
        let subject = format!("marketpulse: {} alert(s)", alerts.len());
        let body = report::render_alert_body(&alerts);
        if let Err(e) = notifier.notify(&subject, &body).await {
            warn!("Alert delivery failed: {:#}", e);
        }
    }

    Ok(())
}
