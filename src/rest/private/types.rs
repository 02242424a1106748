//! Types for private REST API endpoints.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::serde_helpers::{empty_string_as_none, maybe_decimal, string_or_false};
use crate::types::{
    BuySell, CloseTime, ExportFormat, ExportRemoval, ExportReport, OrderStatus, OrderType,
    TimeInForce,
};

// Account data

/// Balance of one asset including amounts on hold.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtendedBalance {
    /// Total balance.
    pub balance: Decimal,
    /// Amount held by open orders.
    #[serde(default)]
    pub hold_trade: Option<Decimal>,
    /// Credit line.
    #[serde(default)]
    pub credit: Option<Decimal>,
    /// Credit in use.
    #[serde(default)]
    pub credit_used: Option<Decimal>,
}

impl ExtendedBalance {
    /// Balance not held by open orders.
    pub fn available(&self) -> Decimal {
        self.balance - self.hold_trade.unwrap_or_default()
    }
}

/// Request for trade balance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradeBalanceRequest {
    /// Base asset for the valuation (default `ZUSD`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
}

/// Margin account summary.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeBalance {
    /// Equivalent balance.
    #[serde(rename = "eb")]
    pub equivalent_balance: Decimal,
    /// Trade balance.
    #[serde(rename = "tb")]
    pub trade_balance: Decimal,
    /// Margin of open positions.
    #[serde(rename = "m", default)]
    pub margin: Decimal,
    /// Unrealized net P&L of open positions.
    #[serde(rename = "n", default)]
    pub unrealized_pnl: Decimal,
    /// Equity.
    #[serde(rename = "e")]
    pub equity: Decimal,
    /// Free margin.
    #[serde(rename = "mf")]
    pub free_margin: Decimal,
    /// Margin level, absent without open positions.
    #[serde(rename = "ml", default)]
    pub margin_level: Option<Decimal>,
}

/// Request for open orders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OpenOrdersRequest {
    /// Include related trades.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<bool>,
    /// Restrict to a user reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userref: Option<i64>,
}

/// Open orders keyed by transaction ID.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenOrders {
    /// Orders.
    pub open: HashMap<String, Order>,
}

/// Request for closed orders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClosedOrdersRequest {
    /// Include related trades.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<bool>,
    /// Restrict to a user reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userref: Option<i64>,
    /// Starting timestamp or order ID, exclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// Ending timestamp or order ID, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    /// Result offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ofs: Option<u32>,
    /// Which timestamp `start` and `end` filter on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closetime: Option<CloseTime>,
}

/// A page of closed orders.
#[derive(Debug, Clone, Deserialize)]
pub struct ClosedOrders {
    /// Orders keyed by transaction ID.
    pub closed: HashMap<String, Order>,
    /// Total matching orders.
    pub count: u32,
}

/// Request for orders or trades by ID.
#[derive(Debug, Clone, Serialize)]
pub struct QueryByIdRequest {
    /// Comma-separated IDs, at most 50.
    pub txid: String,
    /// Include related trades.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<bool>,
}

impl QueryByIdRequest {
    /// Query the given comma-separated IDs.
    pub fn new(txids: impl Into<String>) -> Self {
        Self {
            txid: txids.into(),
            trades: None,
        }
    }

    /// Include related trades.
    pub fn with_trades(mut self) -> Self {
        self.trades = Some(true);
        self
    }
}

/// An order.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    /// User reference.
    #[serde(default)]
    pub userref: Option<i64>,
    /// Status.
    pub status: OrderStatus,
    /// Open time.
    pub opentm: f64,
    /// Close time.
    #[serde(default)]
    pub closetm: Option<f64>,
    /// Description.
    pub descr: OrderDescription,
    /// Volume.
    pub vol: Decimal,
    /// Executed volume.
    pub vol_exec: Decimal,
    /// Total cost.
    pub cost: Decimal,
    /// Total fee.
    pub fee: Decimal,
    /// Average fill price.
    pub price: Decimal,
    /// Comma-separated flags.
    #[serde(default)]
    pub oflags: String,
    /// Related trade IDs.
    #[serde(default)]
    pub trades: Vec<String>,
    /// Why the order closed.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Order description as echoed by Kraken.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDescription {
    /// Pair.
    pub pair: String,
    /// Side.
    #[serde(rename = "type")]
    pub side: BuySell,
    /// Order type.
    pub ordertype: OrderType,
    /// Primary price.
    pub price: Decimal,
    /// Secondary price.
    pub price2: Decimal,
    /// Leverage.
    pub leverage: String,
    /// Human readable summary.
    pub order: String,
}

/// Request for trades history.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradesHistoryRequest {
    /// `all`, `any position`, `closed position`, `closing position` or `no position`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub trade_type: Option<String>,
    /// Starting timestamp or trade ID, exclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// Ending timestamp or trade ID, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    /// Result offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ofs: Option<u32>,
}

/// A page of trades.
#[derive(Debug, Clone, Deserialize)]
pub struct TradesHistory {
    /// Trades keyed by trade ID.
    pub trades: HashMap<String, Trade>,
    /// Total matching trades.
    pub count: u32,
}

/// A fill.
#[derive(Debug, Clone, Deserialize)]
pub struct Trade {
    /// Order that produced the fill.
    pub ordertxid: String,
    /// Pair.
    pub pair: String,
    /// Time.
    pub time: f64,
    /// Side.
    #[serde(rename = "type")]
    pub side: BuySell,
    /// Order type.
    pub ordertype: OrderType,
    /// Price.
    pub price: Decimal,
    /// Cost.
    pub cost: Decimal,
    /// Fee.
    pub fee: Decimal,
    /// Volume.
    pub vol: Decimal,
    /// Initial margin.
    #[serde(default)]
    pub margin: Option<Decimal>,
}

/// Request for open positions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OpenPositionsRequest {
    /// Comma-separated position IDs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    /// Include P&L calculations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docalcs: Option<bool>,
}

/// An open margin position.
#[derive(Debug, Clone, Deserialize)]
pub struct Position {
    /// Opening order.
    pub ordertxid: String,
    /// Position status.
    pub posstatus: String,
    /// Pair.
    pub pair: String,
    /// Open time.
    pub time: f64,
    /// Side.
    #[serde(rename = "type")]
    pub side: BuySell,
    /// Opening cost.
    pub cost: Decimal,
    /// Opening fee.
    pub fee: Decimal,
    /// Volume.
    pub vol: Decimal,
    /// Closed volume.
    pub vol_closed: Decimal,
    /// Initial margin.
    pub margin: Decimal,
    /// Unrealized P&L, present with `docalcs`.
    #[serde(default)]
    pub net: Option<Decimal>,
}

/// Request for ledger entries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LedgersRequest {
    /// Comma-separated assets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    /// Asset class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aclass: Option<String>,
    /// Entry type, e.g. `trade`, `deposit`, `withdrawal`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ledger_type: Option<String>,
    /// Starting timestamp or ledger ID, exclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// Ending timestamp or ledger ID, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    /// Result offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ofs: Option<u32>,
}

/// A page of ledger entries.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgersInfo {
    /// Entries keyed by ledger ID.
    pub ledger: HashMap<String, LedgerEntry>,
    /// Total matching entries.
    #[serde(default)]
    pub count: Option<u32>,
}

/// Request for ledger entries by ID.
#[derive(Debug, Clone, Serialize)]
pub struct QueryLedgersRequest {
    /// Comma-separated ledger IDs, at most 20.
    pub id: String,
    /// Include related trades.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<bool>,
}

impl QueryLedgersRequest {
    /// Query the given comma-separated IDs.
    pub fn new(ids: impl Into<String>) -> Self {
        Self {
            id: ids.into(),
            trades: None,
        }
    }
}

/// A ledger entry.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerEntry {
    /// Reference ID.
    pub refid: String,
    /// Time.
    pub time: f64,
    /// Entry type.
    #[serde(rename = "type")]
    pub ledger_type: String,
    /// Entry subtype.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub subtype: Option<String>,
    /// Asset class.
    pub aclass: String,
    /// Asset.
    pub asset: String,
    /// Amount.
    pub amount: Decimal,
    /// Fee.
    pub fee: Decimal,
    /// Resulting balance.
    pub balance: Decimal,
}

/// Request for trade volume.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradeVolumeRequest {
    /// Comma-separated pairs to include fee tiers for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
}

/// 30 day volume and fee tiers.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeVolume {
    /// Volume currency.
    pub currency: String,
    /// 30 day volume.
    pub volume: Decimal,
    /// Taker fees by pair.
    #[serde(default)]
    pub fees: HashMap<String, FeeTier>,
    /// Maker fees by pair.
    #[serde(default)]
    pub fees_maker: HashMap<String, FeeTier>,
}

/// Fee tier for a pair.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeTier {
    /// Current fee in percent.
    pub fee: Decimal,
    /// Volume needed for the next tier.
    #[serde(default)]
    pub nextvolume: Option<Decimal>,
    /// Fee at the next tier.
    #[serde(default)]
    pub nextfee: Option<Decimal>,
}

// Export reports

/// Request to queue an export report.
#[derive(Debug, Clone, Serialize)]
pub struct AddExportRequest {
    /// Report contents.
    pub report: ExportReport,
    /// File format.
    pub format: ExportFormat,
    /// Label for the report.
    pub description: String,
    /// Comma-separated fields, default all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    /// Earliest timestamp to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starttm: Option<i64>,
    /// Latest timestamp to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endtm: Option<i64>,
}

impl AddExportRequest {
    /// A CSV report of `report` labelled `description`.
    pub fn new(report: ExportReport, description: impl Into<String>) -> Self {
        Self {
            report,
            format: ExportFormat::default(),
            description: description.into(),
            fields: None,
            starttm: None,
            endtm: None,
        }
    }

    /// Set the file format.
    pub fn format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// Restrict the report to `[start, end]`.
    pub fn range(mut self, start: i64, end: i64) -> Self {
        self.starttm = Some(start);
        self.endtm = Some(end);
        self
    }
}

/// ID of a queued export.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportId {
    /// Report ID.
    pub id: String,
}

/// Status of one export report.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportStatus {
    /// Report ID.
    pub id: String,
    /// Label.
    pub descr: String,
    /// File format.
    pub format: String,
    /// Report contents.
    pub report: String,
    /// `Queued`, `Processing` or `Processed`.
    pub status: String,
    /// Creation time.
    pub createdtm: String,
    /// Completion time.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub completedtm: Option<String>,
}

impl ExportStatus {
    /// Whether the report can be retrieved.
    pub fn is_processed(&self) -> bool {
        self.status == "Processed"
    }
}

/// Request to delete or cancel an export.
#[derive(Debug, Clone, Serialize)]
pub struct RemoveExportRequest {
    /// Report ID.
    pub id: String,
    /// Delete a processed report or cancel a pending one.
    #[serde(rename = "type")]
    pub removal: ExportRemoval,
}

/// Outcome of removing an export.
#[derive(Debug, Clone, Deserialize)]
pub struct RemovedExport {
    /// Set when the report was deleted.
    #[serde(default)]
    pub delete: Option<bool>,
    /// Set when the report was cancelled.
    #[serde(default)]
    pub cancel: Option<bool>,
}

// Trading

/// Request to add an order.
#[derive(Debug, Clone, Serialize)]
pub struct AddOrderRequest {
    /// Order type.
    pub ordertype: OrderType,
    /// Side.
    #[serde(rename = "type")]
    pub side: BuySell,
    /// Volume in base currency.
    pub volume: Decimal,
    /// Pair.
    pub pair: String,
    /// Limit or trigger price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Secondary price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price2: Option<Decimal>,
    /// Leverage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leverage: Option<String>,
    /// Comma-separated flags, e.g. `post`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oflags: Option<String>,
    /// Time in force.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeinforce: Option<TimeInForce>,
    /// User reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userref: Option<i64>,
    /// Validate without submitting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate: Option<bool>,
}

impl AddOrderRequest {
    /// A `side` order of `volume` on `pair`.
    pub fn new(pair: impl Into<String>, side: BuySell, ordertype: OrderType, volume: Decimal) -> Self {
        Self {
            ordertype,
            side,
            volume,
            pair: pair.into(),
            price: None,
            price2: None,
            leverage: None,
            oflags: None,
            timeinforce: None,
            userref: None,
            validate: None,
        }
    }

    /// Set the price.
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the secondary price.
    pub fn price2(mut self, price2: Decimal) -> Self {
        self.price2 = Some(price2);
        self
    }

    /// Only add liquidity.
    pub fn post_only(mut self) -> Self {
        self.oflags = Some("post".to_string());
        self
    }

    /// Set the time in force.
    pub fn time_in_force(mut self, tif: TimeInForce) -> Self {
        self.timeinforce = Some(tif);
        self
    }

    /// Set the user reference.
    pub fn userref(mut self, userref: i64) -> Self {
        self.userref = Some(userref);
        self
    }

    /// Validate only; nothing is placed.
    pub fn validate(mut self) -> Self {
        self.validate = Some(true);
        self
    }
}

/// Summary of an accepted order.
#[derive(Debug, Clone, Deserialize)]
pub struct AddOrderResponse {
    /// Descriptions.
    pub descr: OrderSummary,
    /// Transaction IDs, empty when validating.
    #[serde(default)]
    pub txid: Vec<String>,
}

/// Human readable order summary.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderSummary {
    /// Order.
    pub order: String,
    /// Conditional close.
    #[serde(default)]
    pub close: Option<String>,
}

/// Request to edit an open order.
#[derive(Debug, Clone, Serialize)]
pub struct EditOrderRequest {
    /// Order to edit.
    pub txid: String,
    /// Pair.
    pub pair: String,
    /// New volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,
    /// New price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// New secondary price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price2: Option<Decimal>,
    /// New user reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userref: Option<i64>,
    /// Validate without submitting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate: Option<bool>,
}

impl EditOrderRequest {
    /// Edit `txid` on `pair`.
    pub fn new(txid: impl Into<String>, pair: impl Into<String>) -> Self {
        Self {
            txid: txid.into(),
            pair: pair.into(),
            volume: None,
            price: None,
            price2: None,
            userref: None,
            validate: None,
        }
    }

    /// Change the volume.
    pub fn volume(mut self, volume: Decimal) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Change the price.
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }
}

/// Outcome of an edit.
#[derive(Debug, Clone, Deserialize)]
pub struct EditOrderResponse {
    /// Descriptions.
    pub descr: OrderSummary,
    /// ID of the replacement order.
    #[serde(default)]
    pub txid: Option<String>,
    /// ID of the replaced order.
    #[serde(default)]
    pub originaltxid: Option<String>,
    /// `ok` or `err`.
    pub status: String,
    /// Error text when `status` is `err`.
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Request to cancel one order.
#[derive(Debug, Clone, Serialize)]
pub struct CancelOrderRequest {
    /// Transaction ID or user reference.
    pub txid: String,
}

impl CancelOrderRequest {
    /// Cancel `txid`.
    pub fn new(txid: impl Into<String>) -> Self {
        Self { txid: txid.into() }
    }
}

/// Outcome of a cancellation.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelOrderResponse {
    /// Orders cancelled.
    pub count: u32,
    /// Whether cancellation is still pending.
    #[serde(default)]
    pub pending: Option<bool>,
}

/// Dead man's switch state.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAllAfter {
    /// Server time of the request.
    pub current_time: String,
    /// When all orders will be cancelled; `0` timestamp when disabled.
    pub trigger_time: String,
}

// Funding

/// Request for deposit methods.
#[derive(Debug, Clone, Serialize)]
pub struct DepositMethodsRequest {
    /// Asset.
    pub asset: String,
    /// Asset class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aclass: Option<String>,
}

impl DepositMethodsRequest {
    /// Methods for `asset`.
    pub fn new(asset: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            aclass: None,
        }
    }
}

/// A deposit method.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DepositMethod {
    /// Method name.
    pub method: String,
    /// Limit, `None` when unlimited.
    #[serde(deserialize_with = "maybe_decimal", default)]
    pub limit: Option<Decimal>,
    /// Fee.
    #[serde(deserialize_with = "maybe_decimal", default)]
    pub fee: Option<Decimal>,
    /// Whether addresses can be generated.
    #[serde(default)]
    pub gen_address: Option<bool>,
    /// Minimum deposit.
    #[serde(deserialize_with = "maybe_decimal", default)]
    pub minimum: Option<Decimal>,
}

/// Request for deposit addresses.
#[derive(Debug, Clone, Serialize)]
pub struct DepositAddressesRequest {
    /// Asset.
    pub asset: String,
    /// Deposit method.
    pub method: String,
    /// Generate a new address.
    #[serde(rename = "new", skip_serializing_if = "Option::is_none")]
    pub new_address: Option<bool>,
}

impl DepositAddressesRequest {
    /// Addresses for `asset` via `method`.
    pub fn new(asset: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            method: method.into(),
            new_address: None,
        }
    }

    /// Generate a fresh address.
    pub fn generate(mut self) -> Self {
        self.new_address = Some(true);
        self
    }
}

/// A deposit address.
#[derive(Debug, Clone, Deserialize)]
pub struct DepositAddress {
    /// Address.
    pub address: String,
    /// Expiry, `0` if none.
    pub expiretm: String,
    /// Whether the address was just generated.
    #[serde(default)]
    pub new: Option<bool>,
    /// Memo, if the network uses one.
    #[serde(deserialize_with = "empty_string_as_none", default)]
    pub memo: Option<String>,
    /// Tag, if the network uses one.
    #[serde(deserialize_with = "empty_string_as_none", default)]
    pub tag: Option<String>,
}

/// Filter for recent deposits or withdrawals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransferStatusRequest {
    /// Asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    /// Asset class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aclass: Option<String>,
    /// Method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Start timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// End timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) cursor: Option<Cursor>,
}

impl TransferStatusRequest {
    /// Restrict to `asset`.
    pub fn asset(asset: impl Into<String>) -> Self {
        Self {
            asset: Some(asset.into()),
            ..Self::default()
        }
    }
}

/// Wire form of the `cursor` field.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub(crate) enum Cursor {
    /// `true` starts cursor pagination, `false` disables it.
    Enabled(bool),
    /// Continue from a previous page.
    Next(String),
}

/// State of a deposit or withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum TransferStatus {
    /// Accepted, not yet processed.
    Initial,
    /// Being processed.
    Pending,
    /// Settled on the network.
    Settled,
    /// Completed.
    Success,
    /// Partially completed.
    Partial,
    /// Failed.
    Failure,
    /// A state this client does not know.
    #[serde(other)]
    Unknown,
}

/// One deposit or withdrawal.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferRecord {
    /// Method.
    pub method: String,
    /// Asset class.
    pub aclass: String,
    /// Asset.
    pub asset: String,
    /// Reference ID.
    pub refid: String,
    /// Network transaction ID.
    #[serde(default)]
    pub txid: String,
    /// Address or account info.
    #[serde(default)]
    pub info: String,
    /// Amount.
    pub amount: Decimal,
    /// Fee.
    #[serde(deserialize_with = "maybe_decimal", default)]
    pub fee: Option<Decimal>,
    /// Request time.
    pub time: i64,
    /// Status.
    pub status: TransferStatus,
    /// Extra status detail, e.g. `cancel-pending` or `onhold`.
    #[serde(rename = "status-prop", default)]
    pub status_prop: Option<String>,
}

/// One page of deposits.
#[derive(Debug, Clone, Deserialize)]
pub struct DepositStatusPage {
    /// Deposits.
    pub deposit: Vec<TransferRecord>,
    /// Cursor for the next page, `None` on the last one.
    #[serde(deserialize_with = "string_or_false", default)]
    pub next_cursor: Option<String>,
}

/// Request for withdrawal methods.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WithdrawMethodsRequest {
    /// Asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    /// Network.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

/// A withdrawal method.
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawMethod {
    /// Asset.
    pub asset: String,
    /// Method.
    pub method: String,
    /// Network.
    #[serde(default)]
    pub network: Option<String>,
    /// Minimum amount.
    #[serde(deserialize_with = "maybe_decimal", default)]
    pub minimum: Option<Decimal>,
}

/// Request for saved withdrawal addresses.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WithdrawAddressesRequest {
    /// Asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    /// Method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Address key name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Only verified addresses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

/// A saved withdrawal address.
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawalAddress {
    /// Address.
    pub address: String,
    /// Asset.
    pub asset: String,
    /// Method.
    pub method: String,
    /// Key name used in withdrawals.
    pub key: String,
    /// Memo, if any.
    #[serde(deserialize_with = "empty_string_as_none", default)]
    pub memo: Option<String>,
    /// Whether the address is verified.
    pub verified: bool,
}

/// A withdrawal of `amount` of `asset` to the address saved as `key`.
///
/// Used both for quotes ([`get_withdraw_info`]) and for the withdrawal itself.
///
/// [`get_withdraw_info`]: crate::rest::KrakenRestClient::get_withdraw_info
#[derive(Debug, Clone, Serialize)]
pub struct WithdrawRequest {
    /// Asset.
    pub asset: String,
    /// Saved address key.
    pub key: String,
    /// Amount.
    pub amount: Decimal,
    /// Address override, must match the saved key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Reject the withdrawal if the fee exceeds this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fee: Option<Decimal>,
}

impl WithdrawRequest {
    /// Withdraw `amount` of `asset` to `key`.
    pub fn new(asset: impl Into<String>, key: impl Into<String>, amount: Decimal) -> Self {
        Self {
            asset: asset.into(),
            key: key.into(),
            amount,
            address: None,
            max_fee: None,
        }
    }

    /// Cap the fee.
    pub fn max_fee(mut self, max_fee: Decimal) -> Self {
        self.max_fee = Some(max_fee);
        self
    }
}

/// Withdrawal quote.
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawInfo {
    /// Method.
    pub method: String,
    /// Remaining limit, `None` when unlimited.
    #[serde(deserialize_with = "maybe_decimal", default)]
    pub limit: Option<Decimal>,
    /// Net amount.
    pub amount: Decimal,
    /// Fee.
    pub fee: Decimal,
}

/// Request to cancel a withdrawal.
#[derive(Debug, Clone, Serialize)]
pub struct WithdrawCancelRequest {
    /// Asset.
    pub asset: String,
    /// Withdrawal reference ID.
    pub refid: String,
}

impl WithdrawCancelRequest {
    /// Cancel withdrawal `refid` of `asset`.
    pub fn new(asset: impl Into<String>, refid: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            refid: refid.into(),
        }
    }
}

/// Request to move funds between wallets.
#[derive(Debug, Clone, Serialize)]
pub struct WalletTransferRequest {
    /// Asset.
    pub asset: String,
    /// Source wallet.
    pub from: String,
    /// Destination wallet.
    pub to: String,
    /// Amount.
    pub amount: Decimal,
}

/// Reference ID confirming a funding request.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmationRefId {
    /// Reference ID.
    pub refid: String,
}

/// WebSocket authentication token.
#[derive(Debug, Clone, Deserialize)]
pub struct WebSocketToken {
    /// Token.
    pub token: String,
    /// Lifetime in seconds.
    pub expires: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_order_form() {
        let request = AddOrderRequest::new("XBTUSD", BuySell::Buy, OrderType::Limit, "1.25".parse().unwrap())
            .price("37500".parse().unwrap())
            .time_in_force(TimeInForce::GTC)
            .validate();
        assert_eq!(
            serde_urlencoded::to_string(&request).unwrap(),
            "ordertype=limit&type=buy&volume=1.25&pair=XBTUSD&price=37500&timeinforce=GTC&validate=true"
        );
    }

    #[test]
    fn test_transfer_cursor_encoding() {
        let mut request = TransferStatusRequest::asset("XBT");
        request.cursor = Some(Cursor::Enabled(true));
        assert_eq!(serde_urlencoded::to_string(&request).unwrap(), "asset=XBT&cursor=true");

        request.cursor = Some(Cursor::Next("MToxNzAw".into()));
        assert_eq!(serde_urlencoded::to_string(&request).unwrap(), "asset=XBT&cursor=MToxNzAw");
    }

    #[test]
    fn test_transfer_record_unknown_status() {
        let record: TransferRecord = serde_json::from_str(
            r#"{"method":"Bitcoin","aclass":"currency","asset":"XXBT","refid":"FTQcuak-V6Za8qrWnhzTx67yYHz8Tg",
                "txid":"","info":"bc1q","amount":"0.1","fee":null,"time":1700000000,"status":"Reviewing"}"#,
        )
        .unwrap();
        assert_eq!(record.status, TransferStatus::Unknown);
        assert!(record.fee.is_none());
    }

    #[test]
    fn test_export_removal_form() {
        let request = RemoveExportRequest {
            id: "TCJA".into(),
            removal: ExportRemoval::Cancel,
        };
        assert_eq!(serde_urlencoded::to_string(&request).unwrap(), "id=TCJA&type=cancel");
    }
}
