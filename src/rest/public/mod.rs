//! Public REST API endpoints (no authentication required).

mod types;

pub use types::*;

use std::collections::HashMap;

use serde::Serialize;

use crate::error::KrakenError;
use crate::rest::KrakenRestClient;
use crate::rest::endpoints::public;

impl KrakenRestClient {
    /// Get the server time.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kraken_rest_client::rest::KrakenRestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = KrakenRestClient::new();
    ///     let time = client.get_server_time().await?;
    ///     println!("Server time: {} ({})", time.unixtime, time.rfc1123);
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_server_time(&self) -> Result<ServerTime, KrakenError> {
        self.public_get(public::TIME).await
    }

    /// Get the exchange status.
    pub async fn get_system_status(&self) -> Result<SystemStatus, KrakenError> {
        self.public_get(public::SYSTEM_STATUS).await
    }

    /// Get asset information, optionally filtered.
    pub async fn get_assets(
        &self,
        filter: Option<&AssetFilter>,
    ) -> Result<HashMap<String, AssetInfo>, KrakenError> {
        self.public_get_with_params(public::ASSETS, &filter).await
    }

    /// Get tradable asset pairs, optionally filtered.
    pub async fn get_asset_pairs(
        &self,
        request: Option<&AssetPairsRequest>,
    ) -> Result<HashMap<String, AssetPair>, KrakenError> {
        self.public_get_with_params(public::ASSET_PAIRS, &request).await
    }

    /// Get ticker information.
    ///
    /// # Arguments
    ///
    /// * `pairs` - Comma-separated pairs (e.g., "XBTUSD,ETHUSD").
    pub async fn get_ticker(&self, pairs: &str) -> Result<HashMap<String, TickerInfo>, KrakenError> {
        #[derive(Serialize)]
        struct Params<'a> {
            pair: &'a str,
        }
        self.public_get_with_params(public::TICKER, &Params { pair: pairs })
            .await
    }

    /// Get OHLC candles, up to 720 per call.
    pub async fn get_ohlc(&self, request: &OhlcRequest) -> Result<OhlcResponse, KrakenError> {
        self.public_get_with_params(public::OHLC, request).await
    }

    /// Get the order book.
    pub async fn get_order_book(
        &self,
        request: &DepthRequest,
    ) -> Result<HashMap<String, OrderBook>, KrakenError> {
        self.public_get_with_params(public::DEPTH, request).await
    }

    /// Get recent trades.
    pub async fn get_recent_trades(&self, request: &SinceRequest) -> Result<RecentTrades, KrakenError> {
        self.public_get_with_params(public::TRADES, request).await
    }

    /// Get recent spreads. `count` is ignored by this endpoint.
    pub async fn get_recent_spreads(
        &self,
        request: &SinceRequest,
    ) -> Result<RecentSpreads, KrakenError> {
        self.public_get_with_params(public::SPREAD, request).await
    }
}
