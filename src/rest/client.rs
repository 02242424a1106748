//! Kraken REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, Request};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::{Authorizer, Credentials, IncreasingNonce, KrakenAuthorizer, NonceProvider, TracedAuthorizer};
use crate::context::RequestContext;
use crate::error::{ApiError, KrakenError};
use crate::rest::dispatch::StreamingBody;
use crate::rest::endpoints::KRAKEN_BASE_URL;
use crate::rest::request::{NoParams, SecurityOptions, encode_form};

/// The Kraken REST API client.
///
/// Every call goes through the same two steps: [`build_request`] assembles
/// and authorizes a `reqwest::Request`, then [`send_json`] or [`send_stream`]
/// dispatches it and classifies the response. The endpoint methods in
/// [`public`](crate::rest::public) and [`private`](crate::rest::private) are
/// thin wrappers over those steps.
///
/// The client is cheap to clone; clones share the connection pool, the
/// authorizer and the nonce provider.
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
///     println!("Server time: {}", time.unixtime);
///     Ok(())
/// }
/// ```
///
/// For private endpoints, provide credentials:
///
/// ```rust,no_run
/// use kraken_rest_client::auth::Credentials;
/// use kraken_rest_client::rest::KrakenRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = KrakenRestClient::builder()
///         .credentials(Credentials::from_env()?)
///         .traced()
///         .build();
///
///     let balance = client.get_account_balance().await?;
///     println!("Balance: {:?}", balance);
///     Ok(())
/// }
/// ```
///
/// [`build_request`]: KrakenRestClient::build_request
/// [`send_json`]: KrakenRestClient::send_json
/// [`send_stream`]: KrakenRestClient::send_stream
#[derive(Clone)]
pub struct KrakenRestClient {
    pub(super) http_client: ClientWithMiddleware,
    pub(super) base_url: String,
    pub(super) user_agent: String,
    pub(super) authorizer: Option<Arc<dyn Authorizer>>,
    pub(super) nonce_provider: Arc<dyn NonceProvider>,
    pub(super) context: RequestContext,
}

impl KrakenRestClient {
    /// Create a client with default settings.
    ///
    /// This client can only access public endpoints.
    /// Use [`KrakenRestClient::builder()`] to configure credentials.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> KrakenRestClientBuilder {
        KrakenRestClientBuilder::new()
    }

    /// A clone of this client whose endpoint calls run under `ctx`.
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use kraken_rest_client::context::RequestContext;
    /// use kraken_rest_client::rest::KrakenRestClient;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let client = KrakenRestClient::new();
    /// let ctx = RequestContext::background().timeout(Duration::from_secs(5));
    /// let bounded = client.with_context(ctx);
    /// assert!(!bounded.context().is_expired());
    /// # }
    /// ```
    pub fn with_context(&self, ctx: RequestContext) -> Self {
        Self {
            context: ctx,
            ..self.clone()
        }
    }

    /// The context endpoint calls run under.
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether an authorizer is configured.
    pub fn has_authorizer(&self) -> bool {
        self.authorizer.is_some()
    }

    /// Make a public GET request.
    pub(crate) async fn public_get<T>(&self, endpoint: &str) -> Result<T, KrakenError>
    where
        T: DeserializeOwned,
    {
        let request = self.build_request::<NoParams>(endpoint, Method::GET, None, None)?;
        self.call(request).await
    }

    /// Make a public GET request with query parameters.
    pub(crate) async fn public_get_with_params<T, Q>(
        &self,
        endpoint: &str,
        params: &Q,
    ) -> Result<T, KrakenError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.build_request(endpoint, Method::GET, Some(params), None)?;
        self.call(request).await
    }

    /// Make an authenticated POST request.
    pub(crate) async fn private_post<T, P>(&self, endpoint: &str, params: &P) -> Result<T, KrakenError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.call_private_with(endpoint, params, None).await
    }

    /// Make an authenticated POST request whose response is a binary download.
    pub(crate) async fn private_stream<P>(
        &self,
        endpoint: &str,
        params: &P,
    ) -> Result<StreamingBody, KrakenError>
    where
        P: Serialize + ?Sized,
    {
        let request = self.private_request(endpoint, params, None)?;
        self.send_stream(&self.context, request).await
    }

    /// Call any private endpoint, optionally with a second factor.
    ///
    /// The form body is `nonce`, then `otp` when `security` carries one, then
    /// `params` in declaration order. Every field is covered by the signature.
    ///
    /// ```rust,no_run
    /// use std::collections::HashMap;
    /// use kraken_rest_client::auth::Credentials;
    /// use kraken_rest_client::rest::{KrakenRestClient, NoParams, SecurityOptions};
    /// use rust_decimal::Decimal;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = KrakenRestClient::builder()
    ///         .credentials(Credentials::from_env()?)
    ///         .build();
    ///
    ///     let security = SecurityOptions::otp("123456");
    ///     let balances: HashMap<String, Decimal> = client
    ///         .call_private_with("/0/private/Balance", &NoParams {}, Some(&security))
    ///         .await?;
    ///     println!("{balances:?}");
    ///     Ok(())
    /// }
    /// ```
    pub async fn call_private_with<T, P>(
        &self,
        endpoint: &str,
        params: &P,
        security: Option<&SecurityOptions>,
    ) -> Result<T, KrakenError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let request = self.private_request(endpoint, params, security)?;
        self.call(request).await
    }

    fn private_request<P>(
        &self,
        endpoint: &str,
        params: &P,
        security: Option<&SecurityOptions>,
    ) -> Result<Request, KrakenError>
    where
        P: Serialize + ?Sized,
    {
        if self.authorizer.is_none() {
            return Err(KrakenError::MissingCredentials);
        }

        let nonce = self.nonce_provider.next_nonce();
        let form = encode_form(nonce, security, params)?;
        self.build_request::<NoParams>(endpoint, Method::POST, None, Some(form))
    }

    async fn call<T>(&self, request: Request) -> Result<T, KrakenError>
    where
        T: DeserializeOwned,
    {
        let (envelope, _meta) = self
            .send_json::<KrakenResponse<T>>(&self.context, request)
            .await?;
        envelope.into_result()
    }
}

impl Default for KrakenRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KrakenRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KrakenRestClient")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("has_authorizer", &self.authorizer.is_some())
            .finish()
    }
}

/// Builder for [`KrakenRestClient`].
///
/// Defaults: the production base URL, a `kraken-rest-client/<version>` user
/// agent, no authorizer, [`IncreasingNonce`], no retries and no timeout.
pub struct KrakenRestClientBuilder {
    base_url: String,
    user_agent: Option<String>,
    http_client: Option<reqwest::Client>,
    authorizer: Option<Arc<dyn Authorizer>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    max_retries: u32,
    timeout: Option<Duration>,
}

impl KrakenRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: KRAKEN_BASE_URL.to_string(),
            user_agent: None,
            http_client: None,
            authorizer: None,
            nonce_provider: None,
            max_retries: 0,
            timeout: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom user agent.
    ///
    /// An agent that is not a valid header value makes every request fail
    /// with [`KrakenError::RequestConstruction`].
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a preconfigured transport.
    ///
    /// [`timeout`](Self::timeout) does not apply to a supplied client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sign private requests with `credentials`.
    pub fn credentials(self, credentials: Credentials) -> Self {
        self.authorizer(KrakenAuthorizer::new(credentials))
    }

    /// Use a custom authorizer for private requests.
    pub fn authorizer<A>(mut self, authorizer: A) -> Self
    where
        A: Authorizer + 'static,
    {
        self.authorizer = Some(Arc::new(authorizer));
        self
    }

    /// Wrap the configured authorizer in a [`TracedAuthorizer`].
    ///
    /// # Panics
    ///
    /// Panics if no authorizer or credentials have been set yet.
    pub fn traced(mut self) -> Self {
        let inner = self
            .authorizer
            .take()
            .expect("traced() needs an authorizer; set credentials or an authorizer first");
        self.authorizer = Some(Arc::new(TracedAuthorizer::new(inner)));
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider<N>(mut self, provider: N) -> Self
    where
        N: NonceProvider + 'static,
    {
        self.nonce_provider = Some(Arc::new(provider));
        self
    }

    /// Retry transient transport failures up to `retries` times.
    ///
    /// Zero, the default, installs no retry middleware at all.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set a total timeout per request on the default transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> KrakenRestClient {
        let reqwest_client = self.http_client.unwrap_or_else(|| {
            let mut builder = reqwest::Client::builder();
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            builder.build().unwrap_or_else(|_| reqwest::Client::new())
        });

        let mut middleware = ClientBuilder::new(reqwest_client).with(TracingMiddleware::default());
        if self.max_retries > 0 {
            let retry_policy = ExponentialBackoff::builder().build_with_max_retries(self.max_retries);
            middleware = middleware.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("kraken-rest-client/{}", env!("CARGO_PKG_VERSION")));

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(IncreasingNonce::new()));

        KrakenRestClient {
            http_client: middleware.build(),
            base_url: self.base_url.trim_end_matches('/').to_string(),
            user_agent,
            authorizer: self.authorizer,
            nonce_provider,
            context: RequestContext::background(),
        }
    }
}

impl Default for KrakenRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Kraken's response envelope: `{"error": [...], "result": ...}`.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct KrakenResponse<T> {
    #[serde(default)]
    error: Vec<String>,
    result: Option<T>,
}

impl<T> KrakenResponse<T> {
    /// Map the `error` list to a typed error, or return `result`.
    pub(crate) fn into_result(self) -> Result<T, KrakenError> {
        if let Some(api_error) = ApiError::from_error_array(&self.error) {
            if api_error.is_rate_limit() {
                return Err(KrakenError::RateLimitExceeded {
                    retry_after_ms: None,
                });
            }
            return Err(KrakenError::Api(api_error));
        }

        self.result
            .ok_or_else(|| KrakenError::InvalidResponse("Response missing 'result' field".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::NoAuth;

    fn envelope(json: &str) -> KrakenResponse<serde_json::Value> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_envelope_result() {
        let value = envelope(r#"{"error":[],"result":{"unixtime":1}}"#).into_result().unwrap();
        assert_eq!(value["unixtime"], 1);
    }

    #[test]
    fn test_envelope_api_error() {
        let err = envelope(r#"{"error":["EGeneral:Invalid arguments"]}"#)
            .into_result()
            .unwrap_err();
        match err {
            KrakenError::Api(api) => {
                assert_eq!(api.code, "EGeneral");
                assert_eq!(api.message, "Invalid arguments");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_envelope_rate_limit() {
        let err = envelope(r#"{"error":["EAPI:Rate limit exceeded"]}"#)
            .into_result()
            .unwrap_err();
        assert!(matches!(err, KrakenError::RateLimitExceeded { .. }));
    }

    #[test]
    fn test_envelope_missing_result() {
        let err = envelope(r#"{"error":[]}"#).into_result().unwrap_err();
        assert!(matches!(err, KrakenError::InvalidResponse(_)));
    }

    #[test]
    fn test_builder_defaults() {
        let client = KrakenRestClient::builder().base_url("http://localhost:8080/").build();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert!(!client.has_authorizer());
        assert!(client.user_agent.starts_with("kraken-rest-client/"));
        assert!(!client.context().is_expired());
    }

    #[test]
    fn test_with_context_leaves_original() {
        let client = KrakenRestClient::new();
        let ctx = RequestContext::background();
        let bound = client.with_context(ctx.clone());
        ctx.cancel();
        assert!(bound.context().is_expired());
        assert!(!client.context().is_expired());
    }

    #[test]
    fn test_traced_wraps_configured_authorizer() {
        let client = KrakenRestClient::builder().authorizer(NoAuth).traced().build();
        assert!(client.has_authorizer());
    }

    #[test]
    #[should_panic(expected = "traced() needs an authorizer")]
    fn test_traced_without_authorizer_panics() {
        let _ = KrakenRestClient::builder().traced();
    }

    #[test]
    fn test_private_call_without_authorizer() {
        let client = KrakenRestClient::new();
        let err = client
            .private_request("/0/private/Balance", &NoParams {}, None)
            .unwrap_err();
        assert!(matches!(err, KrakenError::MissingCredentials));
    }
}
