//! Authentication module for Kraken API.
//!
//! This module provides:
//! - Credential management with the secret decoded once and kept in secure storage
//! - Nonce generation for replay attack prevention
//! - HMAC-SHA512 signature generation for authenticated requests
//! - The [`Authorizer`] capability and its signing, pass-through and traced implementations

mod authorizer;
mod credentials;
mod nonce;
mod signature;
mod traced;

pub use authorizer::{Authorizer, KrakenAuthorizer, NoAuth, headers};
pub use credentials::{API_KEY_VAR, API_SECRET_VAR, Credentials};
pub use nonce::{CounterNonce, IncreasingNonce, NonceProvider};
pub use signature::sign_request;
pub use traced::TracedAuthorizer;
