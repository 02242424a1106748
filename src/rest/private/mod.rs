//! Private REST API endpoints (authentication required).
//!
//! Every call here fails with [`KrakenError::MissingCredentials`] unless the
//! client was built with credentials or an authorizer. Optional request
//! arguments may be `None`, in which case only the nonce is sent.

mod types;

pub use types::*;

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::KrakenError;
use crate::rest::endpoints::private;
use crate::rest::{KrakenRestClient, NoParams, SecurityOptions, StreamingBody};
use crate::types::{ExportRemoval, ExportReport};

impl KrakenRestClient {
    /// Get account balance.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kraken_rest_client::auth::Credentials;
    /// use kraken_rest_client::rest::KrakenRestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = KrakenRestClient::builder()
    ///         .credentials(Credentials::from_env()?)
    ///         .build();
    ///
    ///     for (asset, balance) in client.get_account_balance().await? {
    ///         println!("{asset}: {balance}");
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_account_balance(&self) -> Result<HashMap<String, Decimal>, KrakenError> {
        self.private_post(private::BALANCE, &NoParams {}).await
    }

    /// Get balances with the amounts held by open orders.
    pub async fn get_extended_balance(&self) -> Result<HashMap<String, ExtendedBalance>, KrakenError> {
        self.private_post(private::BALANCE_EX, &NoParams {}).await
    }

    /// Get the margin account summary.
    pub async fn get_trade_balance(
        &self,
        request: Option<&TradeBalanceRequest>,
    ) -> Result<TradeBalance, KrakenError> {
        self.private_post(private::TRADE_BALANCE, &request).await
    }

    /// Get open orders.
    pub async fn get_open_orders(
        &self,
        request: Option<&OpenOrdersRequest>,
    ) -> Result<OpenOrders, KrakenError> {
        self.private_post(private::OPEN_ORDERS, &request).await
    }

    /// Get closed orders, 50 per page.
    pub async fn get_closed_orders(
        &self,
        request: Option<&ClosedOrdersRequest>,
    ) -> Result<ClosedOrders, KrakenError> {
        self.private_post(private::CLOSED_ORDERS, &request).await
    }

    /// Get orders by transaction ID.
    pub async fn query_orders(
        &self,
        request: &QueryByIdRequest,
    ) -> Result<HashMap<String, Order>, KrakenError> {
        self.private_post(private::QUERY_ORDERS, request).await
    }

    /// Get trade history, 50 per page.
    pub async fn get_trades_history(
        &self,
        request: Option<&TradesHistoryRequest>,
    ) -> Result<TradesHistory, KrakenError> {
        self.private_post(private::TRADES_HISTORY, &request).await
    }

    /// Get trades by trade ID.
    pub async fn query_trades(
        &self,
        request: &QueryByIdRequest,
    ) -> Result<HashMap<String, Trade>, KrakenError> {
        self.private_post(private::QUERY_TRADES, request).await
    }

    /// Get open margin positions.
    pub async fn get_open_positions(
        &self,
        request: Option<&OpenPositionsRequest>,
    ) -> Result<HashMap<String, Position>, KrakenError> {
        self.private_post(private::OPEN_POSITIONS, &request).await
    }

    /// Get ledger entries, 50 per page.
    pub async fn get_ledgers(&self, request: Option<&LedgersRequest>) -> Result<LedgersInfo, KrakenError> {
        self.private_post(private::LEDGERS, &request).await
    }

    /// Get ledger entries by ID.
    pub async fn query_ledgers(
        &self,
        request: &QueryLedgersRequest,
    ) -> Result<HashMap<String, LedgerEntry>, KrakenError> {
        self.private_post(private::QUERY_LEDGERS, request).await
    }

    /// Get 30 day volume and fee tiers.
    pub async fn get_trade_volume(
        &self,
        request: Option<&TradeVolumeRequest>,
    ) -> Result<TradeVolume, KrakenError> {
        self.private_post(private::TRADE_VOLUME, &request).await
    }

    /// Queue a trades or ledgers export.
    pub async fn add_export(&self, request: &AddExportRequest) -> Result<ExportId, KrakenError> {
        self.private_post(private::ADD_EXPORT, request).await
    }

    /// Get the status of all exports of one report kind.
    pub async fn get_export_status(
        &self,
        report: ExportReport,
    ) -> Result<Vec<ExportStatus>, KrakenError> {
        #[derive(Serialize)]
        struct Params {
            report: ExportReport,
        }
        self.private_post(private::EXPORT_STATUS, &Params { report })
            .await
    }

    /// Download a processed export.
    ///
    /// The archive is returned unread; copy it wherever it belongs with
    /// [`StreamingBody::copy_to`].
    ///
    /// ```rust,no_run
    /// use kraken_rest_client::auth::Credentials;
    /// use kraken_rest_client::rest::KrakenRestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = KrakenRestClient::builder()
    ///         .credentials(Credentials::from_env()?)
    ///         .build();
    ///
    ///     let body = client.retrieve_export("TCJA").await?;
    ///     let mut file = tokio::fs::File::create("export.zip").await?;
    ///     let written = body.copy_to(&mut file).await?;
    ///     println!("wrote {written} bytes");
    ///     Ok(())
    /// }
    /// ```
    pub async fn retrieve_export(&self, id: &str) -> Result<StreamingBody, KrakenError> {
        #[derive(Serialize)]
        struct Params<'a> {
            id: &'a str,
        }
        self.private_stream(private::RETRIEVE_EXPORT, &Params { id }).await
    }

    /// Delete a processed export or cancel a queued one.
    pub async fn remove_export(
        &self,
        id: &str,
        removal: ExportRemoval,
    ) -> Result<RemovedExport, KrakenError> {
        let request = RemoveExportRequest {
            id: id.to_owned(),
            removal,
        };
        self.private_post(private::REMOVE_EXPORT, &request).await
    }

    /// Place an order.
    pub async fn add_order(&self, request: &AddOrderRequest) -> Result<AddOrderResponse, KrakenError> {
        self.private_post(private::ADD_ORDER, request).await
    }

    /// Amend an open order.
    pub async fn edit_order(&self, request: &EditOrderRequest) -> Result<EditOrderResponse, KrakenError> {
        self.private_post(private::EDIT_ORDER, request).await
    }

    /// Cancel an order by transaction ID or user reference.
    pub async fn cancel_order(
        &self,
        request: &CancelOrderRequest,
    ) -> Result<CancelOrderResponse, KrakenError> {
        self.private_post(private::CANCEL_ORDER, request).await
    }

    /// Cancel every open order.
    pub async fn cancel_all_orders(&self) -> Result<CancelOrderResponse, KrakenError> {
        self.private_post(private::CANCEL_ALL, &NoParams {}).await
    }

    /// Arm the dead man's switch: cancel everything after `timeout` seconds
    /// unless called again. Zero disarms it.
    pub async fn cancel_all_orders_after(&self, timeout: u32) -> Result<CancelAllAfter, KrakenError> {
        #[derive(Serialize)]
        struct Params {
            timeout: u32,
        }
        self.private_post(private::CANCEL_ALL_ORDERS_AFTER, &Params { timeout })
            .await
    }

    /// Get deposit methods for an asset.
    pub async fn get_deposit_methods(
        &self,
        request: &DepositMethodsRequest,
    ) -> Result<Vec<DepositMethod>, KrakenError> {
        self.private_post(private::DEPOSIT_METHODS, request).await
    }

    /// Get or generate deposit addresses.
    pub async fn get_deposit_addresses(
        &self,
        request: &DepositAddressesRequest,
    ) -> Result<Vec<DepositAddress>, KrakenError> {
        self.private_post(private::DEPOSIT_ADDRESSES, request).await
    }

    /// Get one page of recent deposits.
    ///
    /// Pass `None` for the first page and the previous page's
    /// [`next_cursor`](DepositStatusPage::next_cursor) afterwards.
    pub async fn get_deposit_status(
        &self,
        request: Option<&TransferStatusRequest>,
        cursor: Option<&str>,
    ) -> Result<DepositStatusPage, KrakenError> {
        let mut params = request.cloned().unwrap_or_default();
        params.cursor = Some(match cursor {
            Some(next) => Cursor::Next(next.to_owned()),
            None => Cursor::Enabled(true),
        });
        self.private_post(private::DEPOSIT_STATUS, &params).await
    }

    /// Get recent withdrawals as a single list.
    pub async fn get_withdraw_status(
        &self,
        request: Option<&TransferStatusRequest>,
    ) -> Result<Vec<TransferRecord>, KrakenError> {
        let mut params = request.cloned().unwrap_or_default();
        params.cursor = Some(Cursor::Enabled(false));
        self.private_post(private::WITHDRAW_STATUS, &params).await
    }

    /// Get withdrawal methods.
    pub async fn get_withdraw_methods(
        &self,
        request: Option<&WithdrawMethodsRequest>,
    ) -> Result<Vec<WithdrawMethod>, KrakenError> {
        self.private_post(private::WITHDRAW_METHODS, &request).await
    }

    /// Get saved withdrawal addresses.
    pub async fn get_withdraw_addresses(
        &self,
        request: Option<&WithdrawAddressesRequest>,
    ) -> Result<Vec<WithdrawalAddress>, KrakenError> {
        self.private_post(private::WITHDRAW_ADDRESSES, &request).await
    }

    /// Quote the fee and limit for a withdrawal.
    pub async fn get_withdraw_info(&self, request: &WithdrawRequest) -> Result<WithdrawInfo, KrakenError> {
        #[derive(Serialize)]
        struct Params<'a> {
            asset: &'a str,
            key: &'a str,
            amount: Decimal,
        }
        let params = Params {
            asset: &request.asset,
            key: &request.key,
            amount: request.amount,
        };
        self.private_post(private::WITHDRAW_INFO, &params).await
    }

    /// Withdraw funds to a saved address.
    pub async fn withdraw_funds(&self, request: &WithdrawRequest) -> Result<ConfirmationRefId, KrakenError> {
        self.private_post(private::WITHDRAW, request).await
    }

    /// Withdraw funds on an account whose API key requires a one-time password.
    pub async fn withdraw_funds_with_otp(
        &self,
        request: &WithdrawRequest,
        otp: &str,
    ) -> Result<ConfirmationRefId, KrakenError> {
        let security = SecurityOptions::otp(otp);
        self.call_private_with(private::WITHDRAW, request, Some(&security))
            .await
    }

    /// Cancel a pending withdrawal.
    pub async fn cancel_withdrawal(&self, request: &WithdrawCancelRequest) -> Result<bool, KrakenError> {
        self.private_post(private::WITHDRAW_CANCEL, request).await
    }

    /// Move funds from the spot wallet to a futures wallet.
    pub async fn wallet_transfer(
        &self,
        request: &WalletTransferRequest,
    ) -> Result<ConfirmationRefId, KrakenError> {
        self.private_post(private::WALLET_TRANSFER, request).await
    }

    /// Get a token for authenticated WebSocket feeds.
    pub async fn get_websocket_token(&self) -> Result<WebSocketToken, KrakenError> {
        self.private_post(private::GET_WEBSOCKETS_TOKEN, &NoParams {}).await
    }
}
