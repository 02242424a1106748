//! Kraken REST API client.
//!
//! A call flows through two stages:
//!
//! - [`KrakenRestClient::build_request`] assembles the URL, headers and form
//!   body and hands the request to the configured
//!   [`Authorizer`](crate::auth::Authorizer);
//! - [`KrakenRestClient::send_json`] or [`KrakenRestClient::send_stream`]
//!   sends it and classifies the response by status and media type.
//!
//! The endpoint methods in [`public`] and [`private`] wrap both stages and
//! unwrap Kraken's `{"error": [...], "result": ...}` envelope.
//!
//! ```rust,no_run
//! use kraken_rest_client::context::RequestContext;
//! use kraken_rest_client::rest::{KrakenRestClient, NoParams};
//! use reqwest::Method;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = KrakenRestClient::new();
//!     let request = client.build_request::<NoParams>("/0/public/Time", Method::GET, None, None)?;
//!     let (body, meta): (serde_json::Value, _) =
//!         client.send_json(&RequestContext::background(), request).await?;
//!     println!("{} {}", meta.status, body["result"]["unixtime"]);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod dispatch;
mod endpoints;
pub mod private;
pub mod public;
mod request;

pub use client::{KrakenRestClient, KrakenRestClientBuilder};
pub use config::{API_URL_VAR, ClientConfig, USER_AGENT_VAR};
pub use dispatch::{ResponseMeta, StreamingBody};
pub use endpoints::*;
pub use request::{NoParams, SecurityOptions};
