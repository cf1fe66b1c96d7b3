//! Demo 3: Account Balances
//!
//! Showcases: read-only tier, signed requests, Binance balance view
//!
//! Requires COINSPOT_API_KEY and COINSPOT_API_SECRET in the environment
//! (a read-only key is enough).
//!
//! Run: cargo run --bin account_balances

use colored::*;
use coinspot_binance::to_balances;
use coinspot_rest::{ClientConfig, CoinspotClient, Credential};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let key = std::env::var("COINSPOT_API_KEY")?;
    let secret = std::env::var("COINSPOT_API_SECRET")?;

    let client = CoinspotClient::with_config(
        ClientConfig::new().with_read_only(Credential::new(key, secret)),
    );

    println!("{}", "  ACCOUNT BALANCES".cyan().bold());
    println!();

    let balances = client.account()?.balances().await?;

    println!(
        "  {:<8} {:>16} {:>16} {:>14}",
        "ASSET".white().bold(),
        "BALANCE".white().bold(),
        "AVAILABLE".white().bold(),
        "AUD VALUE".white().bold()
    );
    println!("  {}", "─".repeat(56));

    for record in &balances.balances {
        for (asset, entry) in record {
            println!(
                "  {:<8} {:>16} {:>16} {:>14}",
                asset.cyan(),
                entry.balance.to_string(),
                entry.available.map_or("-".to_string(), |a| a.to_string()),
                entry.audbalance.to_string().green(),
            );
        }
    }

    // Binance-format view, as a generic portfolio tool would consume it.
    let lines = to_balances(&balances);
    println!();
    println!("  {} Binance-format balance lines", lines.len());

    Ok(())
}
