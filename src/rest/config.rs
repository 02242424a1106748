//! Environment and file driven client configuration.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

use crate::auth::{API_KEY_VAR, API_SECRET_VAR, Credentials};
use crate::error::KrakenError;
use crate::rest::KrakenRestClientBuilder;

/// Environment variable overriding the base URL.
pub const API_URL_VAR: &str = "KRAKEN_API_URL";
/// Environment variable overriding the user agent.
pub const USER_AGENT_VAR: &str = "KRAKEN_USER_AGENT";

/// Client settings that can come from the environment or a config file.
///
/// Missing fields keep the builder defaults. Credentials are optional, but
/// the key and secret must be given together.
///
/// ```rust
/// use kraken_rest_client::rest::ClientConfig;
///
/// let config: ClientConfig = serde_json::from_str(r#"{
///     "base_url": "https://api.kraken.com",
///     "max_retries": 2,
///     "timeout_ms": 10000
/// }"#).unwrap();
/// let client = config.into_builder().unwrap().build();
/// assert!(!client.has_authorizer());
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the REST API.
    pub base_url: Option<String>,
    /// User agent sent with every request.
    pub user_agent: Option<String>,
    /// Public API key.
    pub api_key: Option<String>,
    /// Base64 API secret.
    #[serde(deserialize_with = "secret_string")]
    pub api_secret: Option<SecretString>,
    /// Retries for transient transport failures.
    pub max_retries: u32,
    /// Total timeout per request in milliseconds.
    pub timeout_ms: Option<u64>,
}

fn secret_string<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

impl ClientConfig {
    /// Read `KRAKEN_API_URL`, `KRAKEN_USER_AGENT`, `KRAKEN_API_KEY` and
    /// `KRAKEN_API_SECRET`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            base_url: non_empty(API_URL_VAR),
            user_agent: non_empty(USER_AGENT_VAR),
            api_key: non_empty(API_KEY_VAR),
            api_secret: non_empty(API_SECRET_VAR).map(SecretString::from),
            ..Self::default()
        }
    }

    /// Turn the config into a client builder.
    ///
    /// # Errors
    ///
    /// [`KrakenError::MissingCredentials`] if only one of key and secret is
    /// set; [`KrakenError::InvalidSecret`] if the secret is not base64.
    pub fn into_builder(self) -> Result<KrakenRestClientBuilder, KrakenError> {
        let mut builder = KrakenRestClientBuilder::new().max_retries(self.max_retries);
        if let Some(base_url) = self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        match (self.api_key, self.api_secret) {
            (Some(key), Some(secret)) => {
                let credentials = Credentials::new(key, secret.expose_secret())?;
                Ok(builder.credentials(credentials))
            }
            (None, None) => Ok(builder),
            _ => Err(KrakenError::MissingCredentials),
        }
    }
}
