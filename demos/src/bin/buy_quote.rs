//! Demo 4: Instant Buy Quote
//!
//! Showcases: full-access tier, quote endpoints (no order is placed)
//!
//! Requires COINSPOT_API_KEY and COINSPOT_API_SECRET in the environment
//! (full-access key).
//!
//! Run: cargo run --bin buy_quote [COIN] [AMOUNT]

use colored::*;
use coinspot_rest::{AmountType, CoinspotClient, Credential};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let coin = std::env::args().nth(1).unwrap_or_else(|| "BTC".to_string());
    let amount: Decimal =
        std::env::args().nth(2).map(|a| a.parse()).transpose()?.unwrap_or(dec!(0.01));

    let key = std::env::var("COINSPOT_API_KEY")?;
    let secret = std::env::var("COINSPOT_API_SECRET")?;
    let client = CoinspotClient::with_full_access(Credential::new(key, secret));

    println!("Quoting instant buy of {} {}...\n", amount, coin.to_uppercase());

    let quote = client.trading()?.quote_buy(&coin, amount, AmountType::Coin).await?;

    println!("  status: {}", quote.status.green());
    println!("  rate:   {} AUD", quote.rate.to_string().cyan().bold());
    println!("  cost:   {} AUD", (quote.rate * amount).to_string().cyan());

    Ok(())
}
