//! CoinSpot → Binance response reshaping
//!
//! The mapping is lossy: CoinSpot lacks maker flags, update ids, and
//! stable trade ids, so trade ids are sequence positions (buys first,
//! then sells) and flag fields get fixed values.

use chrono::DateTime;
use coinspot_rest::types::{AccountBalances, CompletedOrder, Trades};
use rust_decimal::Decimal;

use crate::types::{AggTrade, Balance, Depth, Trade};

/// Settlement time in epoch milliseconds, falling back to `now_ms` when
/// the order carries no date or an unparseable one
fn trade_time(order: &CompletedOrder, now_ms: i64) -> i64 {
    order
        .solddate
        .as_deref()
        .and_then(|date| DateTime::parse_from_rfc3339(date).ok())
        .map(|date| date.timestamp_millis())
        .unwrap_or(now_ms)
}

/// Map a CoinSpot order book to Binance depth
///
/// CoinSpot has no book sequence number; callers supply a synthetic
/// `last_update_id` (the original wrapper used the current time).
pub fn to_depth(native: &coinspot_rest::Depth, last_update_id: u64) -> Depth {
    let side = |orders: &[coinspot_rest::OrderbookEntry]| {
        orders
            .iter()
            .map(|order| [order.rate.to_string(), order.amount.to_string()])
            .collect()
    };

    Depth {
        last_update_id,
        bids: side(&native.buyorders),
        asks: side(&native.sellorders),
    }
}

/// Map CoinSpot completed orders to Binance recent trades
///
/// Buy-side orders come first with `is_buyer_maker = false`, then
/// sell-side with `is_buyer_maker = true`; ids are sequence positions.
pub fn to_trades(native: &Trades, now_ms: i64) -> Vec<Trade> {
    let map_side = |orders: &[CompletedOrder], is_buyer_maker: bool, offset: usize| {
        orders
            .iter()
            .enumerate()
            .map(|(index, order)| Trade {
                id: (offset + index) as u64,
                price: order.rate.to_string(),
                qty: order.amount.to_string(),
                quote_qty: (order.rate * order.amount).to_string(),
                time: trade_time(order, now_ms),
                is_buyer_maker,
                is_best_match: true,
            })
            .collect::<Vec<_>>()
    };

    let mut trades = map_side(&native.buyorders, false, 0);
    trades.extend(map_side(&native.sellorders, true, trades.len()));
    trades
}

/// Map CoinSpot completed orders to Binance compressed trades
///
/// Every aggregate covers a single fill, so `f == l == a`.
pub fn to_agg_trades(native: &Trades, now_ms: i64) -> Vec<AggTrade> {
    let map_side = |orders: &[CompletedOrder], is_buyer_maker: bool, offset: usize| {
        orders
            .iter()
            .enumerate()
            .map(|(index, order)| {
                let id = (offset + index) as u64;
                AggTrade {
                    agg_id: id,
                    price: order.rate.to_string(),
                    qty: order.amount.to_string(),
                    first_id: id,
                    last_id: id,
                    time: trade_time(order, now_ms),
                    is_buyer_maker,
                    is_best_match: true,
                }
            })
            .collect::<Vec<_>>()
    };

    let mut trades = map_side(&native.buyorders, false, 0);
    trades.extend(map_side(&native.sellorders, true, trades.len()));
    trades
}

/// Map CoinSpot account balances to Binance balance lines
///
/// `free` prefers the tradeable amount when CoinSpot reports one;
/// `locked` is whatever of the total remains.
pub fn to_balances(native: &AccountBalances) -> Vec<Balance> {
    native
        .balances
        .iter()
        .flat_map(|record| {
            record.iter().map(|(asset, entry)| {
                let free = entry.available.unwrap_or(entry.balance);
                let locked = (entry.balance - free).max(Decimal::ZERO);
                Balance {
                    asset: asset.clone(),
                    free: free.to_string(),
                    locked: locked.to_string(),
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinspot_rest::types::{BalanceEntry, OrderbookEntry};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn entry(rate: Decimal, amount: Decimal) -> OrderbookEntry {
        OrderbookEntry {
            amount,
            rate,
            total: rate * amount,
            coin: "BTC".to_string(),
            market: None,
        }
    }

    fn completed(rate: Decimal, amount: Decimal, solddate: Option<&str>) -> CompletedOrder {
        CompletedOrder {
            amount,
            rate,
            total: rate * amount,
            coin: "BTC".to_string(),
            market: None,
            solddate: solddate.map(String::from),
        }
    }

    #[test]
    fn test_depth_maps_sides_to_string_pairs() {
        let native = coinspot_rest::Depth {
            status: "ok".to_string(),
            message: None,
            buyorders: vec![entry(dec!(60000.5), dec!(0.25))],
            sellorders: vec![entry(dec!(60100), dec!(0.1)), entry(dec!(60200), dec!(1))],
        };

        let depth = to_depth(&native, 42);
        assert_eq!(depth.last_update_id, 42);
        assert_eq!(depth.bids, vec![["60000.5".to_string(), "0.25".to_string()]]);
        assert_eq!(depth.asks.len(), 2);

        let json = serde_json::to_value(&depth).unwrap();
        assert_eq!(json["lastUpdateId"], 42);
        assert_eq!(json["bids"][0][0], "60000.5");
    }

    #[test]
    fn test_trades_order_and_maker_flags() {
        let native = Trades {
            status: "ok".to_string(),
            message: None,
            buyorders: vec![completed(dec!(100), dec!(2), Some("2021-02-17T03:46:16.000Z"))],
            sellorders: vec![completed(dec!(101), dec!(1), None)],
        };

        let trades = to_trades(&native, 1_700_000_000_000);
        assert_eq!(trades.len(), 2);

        // Buys first, ids are sequence positions.
        assert_eq!(trades[0].id, 0);
        assert!(!trades[0].is_buyer_maker);
        assert_eq!(trades[0].quote_qty, "200");
        assert_eq!(trades[0].time, 1_613_533_576_000);

        assert_eq!(trades[1].id, 1);
        assert!(trades[1].is_buyer_maker);
        // Missing solddate falls back to the supplied clock.
        assert_eq!(trades[1].time, 1_700_000_000_000);
    }

    #[test]
    fn test_agg_trades_are_single_fill_aggregates() {
        let native = Trades {
            status: "ok".to_string(),
            message: None,
            buyorders: vec![completed(dec!(50), dec!(3), None)],
            sellorders: vec![completed(dec!(51), dec!(4), None)],
        };

        let aggregates = to_agg_trades(&native, 0);
        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[1].agg_id, 1);
        assert_eq!(aggregates[1].first_id, 1);
        assert_eq!(aggregates[1].last_id, 1);

        let json = serde_json::to_value(&aggregates[0]).unwrap();
        assert_eq!(json["a"], 0);
        assert_eq!(json["p"], "50");
        assert_eq!(json["q"], "3");
        assert_eq!(json["m"], false);
        assert_eq!(json["M"], true);
    }

    #[test]
    fn test_balances_split_free_and_locked() {
        let mut btc = HashMap::new();
        btc.insert(
            "BTC".to_string(),
            BalanceEntry {
                balance: dec!(1.5),
                available: Some(dec!(1.0)),
                audbalance: dec!(90000),
                rate: dec!(60000),
            },
        );
        let mut aud = HashMap::new();
        aud.insert(
            "AUD".to_string(),
            BalanceEntry {
                balance: dec!(250),
                available: None,
                audbalance: dec!(250),
                rate: dec!(1),
            },
        );

        let native = AccountBalances {
            status: "ok".to_string(),
            message: None,
            balances: vec![btc, aud],
        };

        let balances = to_balances(&native);
        assert_eq!(balances.len(), 2);

        let btc = balances.iter().find(|b| b.asset == "BTC").unwrap();
        assert_eq!(btc.free, "1.0");
        assert_eq!(btc.locked, "0.5");

        // No available figure: everything counts as free.
        let aud = balances.iter().find(|b| b.asset == "AUD").unwrap();
        assert_eq!(aud.free, "250");
        assert_eq!(aud.locked, "0");
    }
}
