//! # Kraken REST Client
//!
//! An async client for the Kraken exchange REST API.
//!
//! ## Features
//!
//! - HMAC-SHA512 request signing behind a pluggable [`Authorizer`](auth::Authorizer)
//! - Optional tracing of every authorization through a decorator
//! - Cancellation and deadlines per call via [`RequestContext`]
//! - Typed public and private endpoints, including streamed export downloads
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kraken_rest_client::KrakenRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = KrakenRestClient::new();
//!     let time = client.get_server_time().await?;
//!     println!("Server time: {:?}", time);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod context;
pub mod error;
pub mod rest;
pub mod types;

pub use context::RequestContext;
pub use error::KrakenError;
pub use rest::KrakenRestClient;
pub use types::common::{BuySell, OrderStatus, OrderType};

/// Result type alias using KrakenError
pub type Result<T> = std::result::Result<T, KrakenError>;
