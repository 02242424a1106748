//! Common types used across the Kraken client library.

pub mod common;
pub mod serde_helpers;

pub use common::*;
