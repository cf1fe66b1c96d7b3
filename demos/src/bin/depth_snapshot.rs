//! Demo 2: Order Book Snapshot
//!
//! Showcases: public depth, Binance-compatible reshaping
//!
//! Run: cargo run --bin depth_snapshot [COIN]

use std::time::{SystemTime, UNIX_EPOCH};

use colored::*;
use coinspot_binance::to_depth;
use coinspot_rest::CoinspotClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let coin = std::env::args().nth(1).unwrap_or_else(|| "BTC".to_string());

    println!("{}", format!("  {} / AUD ORDER BOOK", coin.to_uppercase()).cyan().bold());
    println!();

    let client = CoinspotClient::new();
    let native = client.public().depth(&coin).await?;

    println!(
        "  {:>14} {:>12}   {:>14} {:>12}",
        "BID".green().bold(),
        "AMOUNT".white(),
        "ASK".red().bold(),
        "AMOUNT".white()
    );
    for i in 0..5 {
        let bid = native.buyorders.get(i);
        let ask = native.sellorders.get(i);
        println!(
            "  {:>14} {:>12}   {:>14} {:>12}",
            bid.map_or("-".to_string(), |o| o.rate.to_string()).green(),
            bid.map_or("-".to_string(), |o| o.amount.to_string()),
            ask.map_or("-".to_string(), |o| o.rate.to_string()).red(),
            ask.map_or("-".to_string(), |o| o.amount.to_string()),
        );
    }

    // The same book, reshaped for Binance-format consumers.
    let now_ms = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
    let binance = to_depth(&native, now_ms);
    println!();
    println!("  Binance shape: {} bids / {} asks", binance.bids.len(), binance.asks.len());

    Ok(())
}
