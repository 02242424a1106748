//! Kraken REST API endpoint paths.

/// Base URL for the Kraken REST API.
pub const KRAKEN_BASE_URL: &str = "https://api.kraken.com";

/// Public endpoints, sent as `GET` with a query string.
pub mod public {
    /// Server time.
    pub const TIME: &str = "/0/public/Time";
    /// System status.
    pub const SYSTEM_STATUS: &str = "/0/public/SystemStatus";
    /// Asset info.
    pub const ASSETS: &str = "/0/public/Assets";
    /// Tradable asset pairs.
    pub const ASSET_PAIRS: &str = "/0/public/AssetPairs";
    /// Ticker information.
    pub const TICKER: &str = "/0/public/Ticker";
    /// OHLC candles.
    pub const OHLC: &str = "/0/public/OHLC";
    /// Order book.
    pub const DEPTH: &str = "/0/public/Depth";
    /// Recent trades.
    pub const TRADES: &str = "/0/public/Trades";
    /// Recent spreads.
    pub const SPREAD: &str = "/0/public/Spread";
}

/// Private endpoints, sent as signed `POST` with a form body.
pub mod private {
    // Account data
    /// Account balance.
    pub const BALANCE: &str = "/0/private/Balance";
    /// Balance including amounts on hold.
    pub const BALANCE_EX: &str = "/0/private/BalanceEx";
    /// Trade balance.
    pub const TRADE_BALANCE: &str = "/0/private/TradeBalance";
    /// Open orders.
    pub const OPEN_ORDERS: &str = "/0/private/OpenOrders";
    /// Closed orders.
    pub const CLOSED_ORDERS: &str = "/0/private/ClosedOrders";
    /// Orders by ID.
    pub const QUERY_ORDERS: &str = "/0/private/QueryOrders";
    /// Trades history.
    pub const TRADES_HISTORY: &str = "/0/private/TradesHistory";
    /// Trades by ID.
    pub const QUERY_TRADES: &str = "/0/private/QueryTrades";
    /// Open margin positions.
    pub const OPEN_POSITIONS: &str = "/0/private/OpenPositions";
    /// Ledger entries.
    pub const LEDGERS: &str = "/0/private/Ledgers";
    /// Ledger entries by ID.
    pub const QUERY_LEDGERS: &str = "/0/private/QueryLedgers";
    /// 30 day volume and fee tiers.
    pub const TRADE_VOLUME: &str = "/0/private/TradeVolume";

    // Export reports
    /// Queue an export report.
    pub const ADD_EXPORT: &str = "/0/private/AddExport";
    /// Status of export reports.
    pub const EXPORT_STATUS: &str = "/0/private/ExportStatus";
    /// Download a processed report as a zip archive.
    pub const RETRIEVE_EXPORT: &str = "/0/private/RetrieveExport";
    /// Delete or cancel a report.
    pub const REMOVE_EXPORT: &str = "/0/private/RemoveExport";

    // Trading
    /// Add order.
    pub const ADD_ORDER: &str = "/0/private/AddOrder";
    /// Edit order.
    pub const EDIT_ORDER: &str = "/0/private/EditOrder";
    /// Cancel order.
    pub const CANCEL_ORDER: &str = "/0/private/CancelOrder";
    /// Cancel all orders.
    pub const CANCEL_ALL: &str = "/0/private/CancelAll";
    /// Dead man's switch.
    pub const CANCEL_ALL_ORDERS_AFTER: &str = "/0/private/CancelAllOrdersAfter";

    // Funding
    /// Deposit methods.
    pub const DEPOSIT_METHODS: &str = "/0/private/DepositMethods";
    /// Deposit addresses.
    pub const DEPOSIT_ADDRESSES: &str = "/0/private/DepositAddresses";
    /// Recent deposits.
    pub const DEPOSIT_STATUS: &str = "/0/private/DepositStatus";
    /// Withdrawal methods.
    pub const WITHDRAW_METHODS: &str = "/0/private/WithdrawMethods";
    /// Withdrawal addresses.
    pub const WITHDRAW_ADDRESSES: &str = "/0/private/WithdrawAddresses";
    /// Withdrawal limits and fees.
    pub const WITHDRAW_INFO: &str = "/0/private/WithdrawInfo";
    /// Withdraw funds.
    pub const WITHDRAW: &str = "/0/private/Withdraw";
    /// Recent withdrawals.
    pub const WITHDRAW_STATUS: &str = "/0/private/WithdrawStatus";
    /// Cancel a withdrawal.
    pub const WITHDRAW_CANCEL: &str = "/0/private/WithdrawCancel";
    /// Transfer between wallets.
    pub const WALLET_TRANSFER: &str = "/0/private/WalletTransfer";

    /// WebSocket authentication token.
    pub const GET_WEBSOCKETS_TOKEN: &str = "/0/private/GetWebSocketsToken";
}
