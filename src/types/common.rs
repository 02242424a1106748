//! Common domain types for Kraken API.

use serde::{Deserialize, Serialize};

/// Buy or sell side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuySell {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

/// Order type for trading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    /// Execute immediately at the best available price
    Market,
    /// Execute at the limit price or better
    Limit,
    /// Limit order that may never take liquidity
    Iceberg,
    /// Market order triggered at the stop price
    StopLoss,
    /// Market order triggered at the profit target
    TakeProfit,
    /// Limit order triggered at the stop price
    StopLossLimit,
    /// Limit order triggered at the profit target
    TakeProfitLimit,
    /// Trailing stop order
    TrailingStop,
    /// Trailing stop limit order
    TrailingStopLimit,
    /// Settle position order
    SettlePosition,
}

/// Status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Accepted but not yet processed
    Pending,
    /// Open and resting on the book
    Open,
    /// Completely filled
    Closed,
    /// Canceled by the user or the exchange
    Canceled,
    /// Expired
    Expired,
}

/// Time in force for orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good till canceled
    #[default]
    GTC,
    /// Immediate or cancel
    IOC,
    /// Good till date
    GTD,
}

/// Which timestamp a closed-orders query filters on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloseTime {
    /// Open time
    Open,
    /// Close time
    Close,
    /// Either
    #[default]
    Both,
}

/// OHLC interval in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum OhlcInterval {
    /// 1 minute
    Min1,
    /// 5 minutes
    Min5,
    /// 15 minutes
    Min15,
    /// 30 minutes
    Min30,
    /// 1 hour
    Hour1,
    /// 4 hours
    Hour4,
    /// 1 day
    Day1,
    /// 1 week
    Week1,
    /// 15 days
    Day15,
}

impl OhlcInterval {
    const MINUTES: [(OhlcInterval, u32); 9] = [
        (Self::Min1, 1),
        (Self::Min5, 5),
        (Self::Min15, 15),
        (Self::Min30, 30),
        (Self::Hour1, 60),
        (Self::Hour4, 240),
        (Self::Day1, 1440),
        (Self::Week1, 10080),
        (Self::Day15, 21600),
    ];

    /// Interval length in minutes.
    pub fn minutes(self) -> u32 {
        Self::MINUTES
            .iter()
            .find(|(interval, _)| *interval == self)
            .map(|(_, minutes)| *minutes)
            .unwrap_or_default()
    }
}

impl From<OhlcInterval> for u32 {
    fn from(interval: OhlcInterval) -> u32 {
        interval.minutes()
    }
}

impl TryFrom<u32> for OhlcInterval {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::MINUTES
            .iter()
            .find(|(_, minutes)| *minutes == value)
            .map(|(interval, _)| *interval)
            .ok_or_else(|| format!("Invalid OHLC interval: {value}"))
    }
}

/// Kind of data an export report contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportReport {
    /// Trade history
    Trades,
    /// Ledger entries
    Ledgers,
}

/// File format of an export report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExportFormat {
    /// Comma separated values
    #[default]
    Csv,
    /// Tab separated values
    Tsv,
}

/// How to dispose of an export report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportRemoval {
    /// Delete a processed report
    Delete,
    /// Cancel a queued or processing report
    Cancel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_type_serde() {
        assert_eq!(
            serde_json::to_string(&OrderType::StopLossLimit).unwrap(),
            r#""stop-loss-limit""#
        );
        assert_eq!(
            serde_json::from_str::<BuySell>(r#""sell""#).unwrap(),
            BuySell::Sell
        );
    }

    #[test]
    fn test_form_encoding_of_enums() {
        #[derive(Serialize)]
        struct Form {
            report: ExportReport,
            format: ExportFormat,
            interval: OhlcInterval,
            timeinforce: TimeInForce,
        }

        let encoded = serde_urlencoded::to_string(Form {
            report: ExportReport::Ledgers,
            format: ExportFormat::Tsv,
            interval: OhlcInterval::Hour4,
            timeinforce: TimeInForce::IOC,
        })
        .unwrap();
        assert_eq!(encoded, "report=ledgers&format=TSV&interval=240&timeinforce=IOC");
    }

    #[test]
    fn test_ohlc_interval_conversion() {
        assert_eq!(u32::from(OhlcInterval::Hour1), 60);
        assert_eq!(OhlcInterval::try_from(1440).unwrap(), OhlcInterval::Day1);
        assert!(OhlcInterval::try_from(999).is_err());
    }
}
