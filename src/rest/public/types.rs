//! Types for public market data endpoints.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

use crate::types::OhlcInterval;

/// Server time.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerTime {
    /// Unix timestamp.
    pub unixtime: i64,
    /// RFC 1123 formatted time.
    pub rfc1123: String,
}

/// Exchange status.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemStatus {
    /// `online`, `maintenance`, `cancel_only` or `post_only`.
    pub status: String,
    /// Time of the status report.
    pub timestamp: String,
}

/// Filter for asset and asset pair queries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetFilter {
    /// Comma-separated assets or pairs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    /// Asset class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aclass: Option<String>,
}

impl AssetFilter {
    /// Restrict the query to `assets` (comma-separated).
    pub fn assets(assets: impl Into<String>) -> Self {
        Self {
            asset: Some(assets.into()),
            aclass: None,
        }
    }
}

/// Asset information.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetInfo {
    /// Asset class.
    pub aclass: String,
    /// Alternate name.
    pub altname: String,
    /// Scaling decimal places for record keeping.
    pub decimals: u8,
    /// Scaling decimal places for output display.
    pub display_decimals: u8,
    /// Trading status.
    #[serde(default)]
    pub status: Option<String>,
}

/// Request for tradable asset pairs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetPairsRequest {
    /// Comma-separated pairs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
    /// `info`, `leverage`, `fees` or `margin`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

/// Tradable asset pair.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetPair {
    /// Alternate pair name.
    pub altname: String,
    /// WebSocket pair name.
    #[serde(default)]
    pub wsname: Option<String>,
    /// Base asset.
    pub base: String,
    /// Quote asset.
    pub quote: String,
    /// Price precision.
    pub pair_decimals: u8,
    /// Volume precision.
    pub lot_decimals: u8,
    /// Minimum order volume.
    #[serde(default)]
    pub ordermin: Option<Decimal>,
    /// Minimum price increment.
    #[serde(default)]
    pub tick_size: Option<Decimal>,
    /// Trading status.
    #[serde(default)]
    pub status: Option<String>,
}

/// Ticker snapshot for one pair.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerInfo {
    /// Ask `[price, whole lot volume, lot volume]`.
    pub a: Vec<Decimal>,
    /// Bid `[price, whole lot volume, lot volume]`.
    pub b: Vec<Decimal>,
    /// Last trade `[price, lot volume]`.
    pub c: Vec<Decimal>,
    /// Volume `[today, last 24 hours]`.
    pub v: Vec<Decimal>,
    /// Volume weighted average price `[today, last 24 hours]`.
    pub p: Vec<Decimal>,
    /// Trade count `[today, last 24 hours]`.
    pub t: Vec<u64>,
    /// Low `[today, last 24 hours]`.
    pub l: Vec<Decimal>,
    /// High `[today, last 24 hours]`.
    pub h: Vec<Decimal>,
    /// Today's opening price.
    pub o: Decimal,
}

impl TickerInfo {
    /// Best ask.
    pub fn ask(&self) -> Option<Decimal> {
        self.a.first().copied()
    }

    /// Best bid.
    pub fn bid(&self) -> Option<Decimal> {
        self.b.first().copied()
    }

    /// Last trade price.
    pub fn last(&self) -> Option<Decimal> {
        self.c.first().copied()
    }
}

/// Request for OHLC candles.
#[derive(Debug, Clone, Serialize)]
pub struct OhlcRequest {
    /// Asset pair.
    pub pair: String,
    /// Candle width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<OhlcInterval>,
    /// Return candles after this timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<i64>,
}

impl OhlcRequest {
    /// Candles for `pair` at the default interval.
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            interval: None,
            since: None,
        }
    }

    /// Set the interval.
    pub fn interval(mut self, interval: OhlcInterval) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Only return candles after `since`.
    pub fn since(mut self, since: i64) -> Self {
        self.since = Some(since);
        self
    }
}

/// Request for the order book.
#[derive(Debug, Clone, Serialize)]
pub struct DepthRequest {
    /// Asset pair.
    pub pair: String,
    /// Levels per side, at most 500.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u16>,
}

impl DepthRequest {
    /// Book for `pair`.
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            count: None,
        }
    }

    /// Limit the number of levels per side.
    pub fn count(mut self, count: u16) -> Self {
        self.count = Some(count.min(500));
        self
    }
}

/// Request for recent trades or spreads.
#[derive(Debug, Clone, Serialize)]
pub struct SinceRequest {
    /// Asset pair.
    pub pair: String,
    /// Pagination cursor from a previous response's `last`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    /// Maximum entries (trades only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u16>,
}

impl SinceRequest {
    /// Entries for `pair`.
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            since: None,
            count: None,
        }
    }

    /// Continue after `since`.
    pub fn since(mut self, since: impl ToString) -> Self {
        self.since = Some(since.to_string());
        self
    }

    /// Limit the number of entries.
    pub fn count(mut self, count: u16) -> Self {
        self.count = Some(count);
        self
    }
}

/// Per-pair series plus the `last` pagination cursor.
///
/// Kraken returns these as one object where every key except `last` is a
/// pair name.
#[derive(Debug, Clone)]
pub struct PairSeries<T, L> {
    /// Entries keyed by pair.
    pub series: HashMap<String, Vec<T>>,
    /// Cursor for the next page.
    pub last: L,
}

impl<T, L> PairSeries<T, L> {
    /// Entries for `pair`, empty if absent.
    pub fn get(&self, pair: &str) -> &[T] {
        self.series.get(pair).map(Vec::as_slice).unwrap_or_default()
    }
}

impl<'de, T, L> Deserialize<'de> for PairSeries<T, L>
where
    T: DeserializeOwned,
    L: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = HashMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let last = map
            .remove("last")
            .ok_or_else(|| de::Error::missing_field("last"))?;
        let last = serde_json::from_value(last).map_err(de::Error::custom)?;

        let series = map
            .into_iter()
            .map(|(pair, value)| {
                serde_json::from_value(value)
                    .map(|entries| (pair, entries))
                    .map_err(de::Error::custom)
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { series, last })
    }
}

/// OHLC candles; `last` is the timestamp to pass as `since`.
pub type OhlcResponse = PairSeries<OhlcEntry, i64>;
/// Recent trades; `last` is the trade cursor to pass as `since`.
pub type RecentTrades = PairSeries<TradeEntry, String>;
/// Recent spreads; `last` is the timestamp to pass as `since`.
pub type RecentSpreads = PairSeries<SpreadEntry, i64>;

/// One candle: `[time, open, high, low, close, vwap, volume, count]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "(i64, Decimal, Decimal, Decimal, Decimal, Decimal, Decimal, u64)")]
pub struct OhlcEntry {
    /// Candle start.
    pub time: i64,
    /// Open price.
    pub open: Decimal,
    /// High price.
    pub high: Decimal,
    /// Low price.
    pub low: Decimal,
    /// Close price.
    pub close: Decimal,
    /// Volume weighted average price.
    pub vwap: Decimal,
    /// Volume.
    pub volume: Decimal,
    /// Number of trades.
    pub count: u64,
}

impl From<(i64, Decimal, Decimal, Decimal, Decimal, Decimal, Decimal, u64)> for OhlcEntry {
    fn from(
        (time, open, high, low, close, vwap, volume, count): (
            i64,
            Decimal,
            Decimal,
            Decimal,
            Decimal,
            Decimal,
            Decimal,
            u64,
        ),
    ) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            vwap,
            volume,
            count,
        }
    }
}

/// Order book for one pair.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBook {
    /// Asks, best first.
    pub asks: Vec<BookLevel>,
    /// Bids, best first.
    pub bids: Vec<BookLevel>,
}

/// One book level: `[price, volume, timestamp]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "(Decimal, Decimal, i64)")]
pub struct BookLevel {
    /// Price.
    pub price: Decimal,
    /// Volume at this price.
    pub volume: Decimal,
    /// Last update.
    pub timestamp: i64,
}

impl From<(Decimal, Decimal, i64)> for BookLevel {
    fn from((price, volume, timestamp): (Decimal, Decimal, i64)) -> Self {
        Self {
            price,
            volume,
            timestamp,
        }
    }
}

/// One trade: `[price, volume, time, side, type, misc, trade_id]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "(Decimal, Decimal, f64, String, String, String, i64)")]
pub struct TradeEntry {
    /// Price.
    pub price: Decimal,
    /// Volume.
    pub volume: Decimal,
    /// Fractional unix time.
    pub time: f64,
    /// `b` or `s`.
    pub side: String,
    /// `m` (market) or `l` (limit).
    pub order_type: String,
    /// Miscellaneous flags.
    pub misc: String,
    /// Trade ID.
    pub trade_id: i64,
}

impl From<(Decimal, Decimal, f64, String, String, String, i64)> for TradeEntry {
    fn from(
        (price, volume, time, side, order_type, misc, trade_id): (
            Decimal,
            Decimal,
            f64,
            String,
            String,
            String,
            i64,
        ),
    ) -> Self {
        Self {
            price,
            volume,
            time,
            side,
            order_type,
            misc,
            trade_id,
        }
    }
}

/// One spread sample: `[time, bid, ask]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "(i64, Decimal, Decimal)")]
pub struct SpreadEntry {
    /// Timestamp.
    pub time: i64,
    /// Best bid.
    pub bid: Decimal,
    /// Best ask.
    pub ask: Decimal,
}

impl From<(i64, Decimal, Decimal)> for SpreadEntry {
    fn from((time, bid, ask): (i64, Decimal, Decimal)) -> Self {
        Self { time, bid, ask }
    }
}
