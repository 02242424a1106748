//! Market data snapshot for one pair.
//!
//! Run with: cargo run --example public_data [PAIR]

use std::time::Duration;

use kraken_rest_client::context::RequestContext;
use kraken_rest_client::rest::KrakenRestClient;
use kraken_rest_client::rest::public::{DepthRequest, OhlcRequest, SinceRequest};
use kraken_rest_client::types::OhlcInterval;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pair = std::env::args().nth(1).unwrap_or_else(|| "XBTUSD".to_string());

    // Every call below must finish within ten seconds in total.
    let ctx = RequestContext::background().timeout(Duration::from_secs(10));
    let client = KrakenRestClient::new().with_context(ctx);

    let status = client.get_system_status().await?;
    println!("Exchange is {} at {}", status.status, status.timestamp);

    let ticker = client.get_ticker(&pair).await?;
    for (name, info) in &ticker {
        println!(
            "{name}: bid {:?} ask {:?} last {:?}",
            info.bid(),
            info.ask(),
            info.last()
        );
    }

    let candles = client
        .get_ohlc(&OhlcRequest::new(&pair).interval(OhlcInterval::Hour4))
        .await?;
    for (name, series) in &candles.series {
        if let Some(candle) = series.last() {
            println!(
                "{name} 4h: O {} H {} L {} C {} ({} trades)",
                candle.open, candle.high, candle.low, candle.close, candle.count
            );
        }
    }

    let books = client.get_order_book(&DepthRequest::new(&pair).count(3)).await?;
    for (name, book) in &books {
        println!("{name} book:");
        for level in book.asks.iter().rev() {
            println!("  ask {} x {}", level.price, level.volume);
        }
        for level in &book.bids {
            println!("  bid {} x {}", level.price, level.volume);
        }
    }

    let trades = client
        .get_recent_trades(&SinceRequest::new(&pair).count(5))
        .await?;
    for (name, entries) in &trades.series {
        for trade in entries {
            println!("{name} {} {} @ {}", trade.side, trade.volume, trade.price);
        }
    }
    println!("Next trades cursor: {}", trades.last);

    Ok(())
}
