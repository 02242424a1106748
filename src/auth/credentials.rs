//! Credential management for Kraken API authentication.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use secrecy::{ExposeSecret, SecretSlice};

use crate::error::KrakenError;

/// Default environment variable holding the API key.
pub const API_KEY_VAR: &str = "KRAKEN_API_KEY";
/// Default environment variable holding the base64 API secret.
pub const API_SECRET_VAR: &str = "KRAKEN_API_SECRET";

/// API credentials: the public key and the decoded signing secret.
///
/// The secret is decoded from base64 once, at construction, so a bad secret
/// surfaces before any request is built. The decoded bytes are zeroized on
/// drop and never appear in `Debug` output.
pub struct Credentials {
    api_key: String,
    secret: SecretSlice<u8>,
}

impl Credentials {
    /// Create credentials from an API key and its base64-encoded secret.
    ///
    /// # Errors
    ///
    /// Returns [`KrakenError::InvalidSecret`] if the secret is not valid base64.
    pub fn new(api_key: impl Into<String>, api_secret: impl AsRef<str>) -> Result<Self, KrakenError> {
        let decoded = BASE64
            .decode(api_secret.as_ref().trim())
            .map_err(KrakenError::InvalidSecret)?;

        Ok(Self {
            api_key: api_key.into(),
            secret: SecretSlice::from(decoded),
        })
    }

    /// Read credentials from `KRAKEN_API_KEY` and `KRAKEN_API_SECRET`.
    pub fn from_env() -> Result<Self, KrakenError> {
        Self::from_env_vars(API_KEY_VAR, API_SECRET_VAR)
    }

    /// Read credentials from custom environment variable names.
    ///
    /// Returns [`KrakenError::MissingCredentials`] if either variable is unset.
    pub fn from_env_vars(key_var: &str, secret_var: &str) -> Result<Self, KrakenError> {
        let api_key = std::env::var(key_var).map_err(|_| KrakenError::MissingCredentials)?;
        let api_secret = std::env::var(secret_var).map_err(|_| KrakenError::MissingCredentials)?;
        Self::new(api_key, api_secret)
    }

    /// The public API key sent in the `API-Key` header.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The decoded secret used as the HMAC key.
    pub(crate) fn secret(&self) -> &[u8] {
        self.secret.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
