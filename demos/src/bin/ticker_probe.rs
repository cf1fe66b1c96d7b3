//! Demo 1: Market Ticker Probe
//!
//! Showcases: public tier, latest prices for every market
//!
//! Run: cargo run --bin ticker_probe

use colored::*;
use coinspot_rest::CoinspotClient;

const HIGHLIGHTS: [&str; 4] = ["btc", "eth", "sol", "xrp"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("coinspot_rest=debug").init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  COINSPOT MARKET TICKER".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = CoinspotClient::new();
    let ticker = client.public().ticker24hr().await?;

    println!("Received {} markets (status: {})\n", ticker.prices.len(), ticker.status);

    println!(
        "  {:<8} {:>14} {:>14} {:>14}",
        "COIN".white().bold(),
        "BID".white().bold(),
        "ASK".white().bold(),
        "LAST".white().bold()
    );
    println!("  {}", "─".repeat(52));

    for coin in HIGHLIGHTS {
        if let Some(point) = ticker.prices.get(coin) {
            let fmt = |price: Option<rust_decimal::Decimal>| {
                price.map_or("-".to_string(), |p| p.to_string())
            };
            println!(
                "  {:<8} {:>14} {:>14} {:>14}",
                coin.to_uppercase().cyan(),
                fmt(point.bid).green(),
                fmt(point.ask).red(),
                fmt(point.last)
            );
        }
    }

    Ok(())
}
