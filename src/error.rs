//! Error types for the Kraken REST client.
//!
//! Errors fall into two layers:
//! - pipeline errors raised while building, signing, sending and classifying a
//!   request (`InvalidSecret` through `UnsupportedContentType`);
//! - catalogue errors raised after a JSON envelope has been decoded and its
//!   `error` list inspected (`Api`, `RateLimitExceeded`, ...).
//!
//! Every variant is terminal for the call that produced it. The client never
//! retries on its own; retries are an opt-in transport middleware.

use reqwest::StatusCode;
use thiserror::Error;

/// The main error type for all Kraken client operations.
#[derive(Error, Debug)]
pub enum KrakenError {
    /// The configured API secret is not valid base64.
    #[error("API secret must be valid base64: {0}")]
    InvalidSecret(#[source] base64::DecodeError),

    /// The request cannot be signed as built (no buffered form body, no nonce).
    ///
    /// This is a caller bug and should not be retried.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// The HTTP request could not be assembled.
    #[error("Failed to construct request: {0}")]
    RequestConstruction(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The request context was cancelled or its deadline passed.
    #[error("Request context expired")]
    ContextExpired,

    /// The transport failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// Reading a response body failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-200 status.
    ///
    /// The response is handed back untouched so its headers and body stay
    /// available to the caller.
    #[error("API request failed with status {status}")]
    ApiRequest {
        /// HTTP status of the response.
        status: StatusCode,
        /// The unread response.
        response: Box<reqwest::Response>,
    },

    /// The `Content-Type` header is missing or unparseable.
    #[error("Invalid response format: {0}")]
    ResponseFormat(String),

    /// The JSON body could not be decoded into the requested type.
    #[error("Failed to parse response: {0}")]
    ResponseParse(#[source] serde_json::Error),

    /// The response media type is not one the call can handle.
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// Writing a streamed body to its destination failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Kraken API returned an error
    #[error("Kraken API error: {0}")]
    Api(ApiError),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_ms:?}ms")]
    RateLimitExceeded {
        /// Suggested wait time in milliseconds before retrying
        retry_after_ms: Option<u64>,
    },

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for private endpoints")]
    MissingCredentials,
}

impl KrakenError {
    /// Wrap any error as a request construction failure.
    pub(crate) fn construction<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::RequestConstruction(Box::new(err))
    }

    /// HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::ApiRequest { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            Self::Transport(reqwest_middleware::Error::Reqwest(err)) => err.status(),
            _ => None,
        }
    }

    /// Take the preserved response out of an `ApiRequest` error.
    pub fn into_response(self) -> Option<reqwest::Response> {
        match self {
            Self::ApiRequest { response, .. } => Some(*response),
            _ => None,
        }
    }

    /// Whether this error indicates a caller bug rather than an environmental failure.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSecret(_)
                | Self::MalformedRequest(_)
                | Self::RequestConstruction(_)
                | Self::MissingCredentials
        )
    }
}

/// Kraken API error codes and messages.
///
/// These are errors returned by the Kraken API itself in the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The error code/identifier from Kraken (e.g., "EGeneral:Invalid arguments")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Parse the first entry of Kraken's error array, e.g. `["EGeneral:Invalid arguments"]`.
    pub fn from_error_array(errors: &[String]) -> Option<Self> {
        errors.first().map(|e| match e.split_once(':') {
            Some((code, message)) => Self::new(code, message),
            None => Self::new("Unknown", e.clone()),
        })
    }

    /// Get the full error string in Kraken's format (code:message).
    pub fn full_code(&self) -> String {
        format!("{}:{}", self.code, self.message)
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self.code.as_str(), "EAPI" | "EOrder") && self.message.contains("Rate limit")
    }

    /// Check if this is an invalid nonce error.
    pub fn is_invalid_nonce(&self) -> bool {
        self.code == "EAPI" && self.message.contains("Invalid nonce")
    }

    /// Check if this is an invalid key error.
    pub fn is_invalid_key(&self) -> bool {
        self.code == "EAPI" && self.message.contains("Invalid key")
    }

    /// Check if this is an invalid signature error.
    pub fn is_invalid_signature(&self) -> bool {
        self.code == "EAPI" && self.message.contains("Invalid signature")
    }

    /// Check if the exchange rejected a missing or wrong second factor.
    pub fn is_invalid_otp(&self) -> bool {
        self.code == "EAPI" && self.message.contains("Invalid OTP")
    }

    /// Check if this is a permission denied error.
    pub fn is_permission_denied(&self) -> bool {
        self.code == "EGeneral" && self.message.contains("Permission denied")
    }

    /// Check if this is a service unavailable error.
    pub fn is_service_unavailable(&self) -> bool {
        self.code == "EService" && (self.message.contains("Unavailable") || self.message.contains("Busy"))
    }
}

/// Known Kraken error codes for pattern matching.
pub mod error_codes {
    /// General errors
    pub const INVALID_ARGUMENTS: &str = "EGeneral:Invalid arguments";
    pub const PERMISSION_DENIED: &str = "EGeneral:Permission denied";
    pub const UNKNOWN_METHOD: &str = "EGeneral:Unknown method";

    /// API errors
    pub const INVALID_KEY: &str = "EAPI:Invalid key";
    pub const INVALID_SIGNATURE: &str = "EAPI:Invalid signature";
    pub const INVALID_NONCE: &str = "EAPI:Invalid nonce";
    pub const INVALID_OTP: &str = "EAPI:Invalid OTP";
    pub const RATE_LIMIT_EXCEEDED: &str = "EAPI:Rate limit exceeded";

    /// Order errors
    pub const ORDER_RATE_LIMIT: &str = "EOrder:Rate limit exceeded";
    pub const INSUFFICIENT_FUNDS: &str = "EOrder:Insufficient funds";
    pub const ORDER_NOT_FOUND: &str = "EOrder:Unknown order";

    /// Service errors
    pub const SERVICE_UNAVAILABLE: &str = "EService:Unavailable";
    pub const SERVICE_BUSY: &str = "EService:Busy";

    /// Export errors
    pub const UNKNOWN_EXPORT: &str = "EExport:Unknown export";
}
