//! Loading the watchlist TOML through the async PositionSource port.

use marketpulse::domain::ports::PositionSource;
use marketpulse::domain::types::Group;
use marketpulse::infrastructure::positions::TomlPositionSource;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_load_watchlist_file() {
    let path = std::env::temp_dir().join(format!(
        "marketpulse_watchlist_{}.toml",
        std::process::id()
    ));
    tokio::fs::write(
        &path,
        r#"
        [[instrument]]
        ticker = "AAPL.US"
        name = "Apple"
        queries = ["Apple stock", "AAPL earnings"]
        buy_price = 182.50
        quantity = 12

        [[instrument]]
        ticker = "SPX.US"
        name = "S&P 500"
        group = "market"
        "#,
    )
    .await
    .expect("write fixture");

    let source = TomlPositionSource::new(path.to_str().expect("utf8 path"));
    let instruments = source.load().await.expect("load watchlist");

    assert_eq!(instruments.len(), 2);
    assert_eq!(instruments[0].group, Group::Holdings);
    assert_eq!(
        instruments[0].position.as_ref().expect("position").buy_price,
        dec!(182.50)
    );
    assert_eq!(instruments[1].group, Group::Market);
    assert!(instruments[1].position.is_none());

    tokio::fs::remove_file(&path).await.ok();
}

#[tokio::test]
async fn test_missing_watchlist_errors() {
    let source = TomlPositionSource::new("/nonexistent/watchlist.toml");
    assert!(source.load().await.is_err());
}
