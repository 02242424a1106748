//! Request authorization.
//!
//! An [`Authorizer`] takes a fully built request and returns it ready to send.
//! [`KrakenAuthorizer`] signs private requests; [`NoAuth`] passes requests
//! through for public-only use; [`TracedAuthorizer`](super::TracedAuthorizer)
//! wraps either one with a tracing span.

use std::borrow::Cow;
use std::sync::Arc;

use reqwest::Request;
use reqwest::header::HeaderValue;

use crate::auth::Credentials;
use crate::auth::signature::sign_request;
use crate::error::KrakenError;

/// Header and form field names used by Kraken's private API.
pub mod headers {
    use reqwest::header::HeaderName;

    /// Public API key header (`API-Key`).
    pub const API_KEY: HeaderName = HeaderName::from_static("api-key");
    /// Signature header (`API-Sign`).
    pub const API_SIGN: HeaderName = HeaderName::from_static("api-sign");
    /// Form field carrying the nonce.
    pub const NONCE_FIELD: &str = "nonce";
    /// Form field carrying the second factor.
    pub const OTP_FIELD: &str = "otp";
}

/// Something that prepares an outgoing request for dispatch.
///
/// Implementations receive the request after its URL, headers and body are
/// final and must not re-encode the body: the signature covers the exact bytes
/// that go on the wire.
///
/// Only requests that carry a form body reach the authorizer. Public `GET`
/// requests without a body are sent exactly as built.
pub trait Authorizer: Send + Sync {
    /// Authorize `request`, returning it with any authentication headers set.
    fn authorize(&self, request: Request) -> Result<Request, KrakenError>;
}

impl<A: Authorizer + ?Sized> Authorizer for Arc<A> {
    fn authorize(&self, request: Request) -> Result<Request, KrakenError> {
        (**self).authorize(request)
    }
}

impl<A: Authorizer + ?Sized> Authorizer for Box<A> {
    fn authorize(&self, request: Request) -> Result<Request, KrakenError> {
        (**self).authorize(request)
    }
}

/// Pass-through authorizer for clients that only call public endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl Authorizer for NoAuth {
    fn authorize(&self, request: Request) -> Result<Request, KrakenError> {
        Ok(request)
    }
}

/// Signs private requests with Kraken's HMAC-SHA512 scheme.
///
/// The nonce and any `otp` must already be in the form body; this type only
/// reads them back.
#[derive(Debug, Clone)]
pub struct KrakenAuthorizer {
    credentials: Arc<Credentials>,
}

impl KrakenAuthorizer {
    /// Create an authorizer from decoded credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials: Arc::new(credentials),
        }
    }

    /// Create an authorizer from an API key and base64 secret.
    ///
    /// # Errors
    ///
    /// Returns [`KrakenError::InvalidSecret`] if the secret is not valid base64.
    pub fn from_secret(
        api_key: impl Into<String>,
        api_secret: impl AsRef<str>,
    ) -> Result<Self, KrakenError> {
        Credentials::new(api_key, api_secret).map(Self::new)
    }

    /// The credentials this authorizer signs with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl Authorizer for KrakenAuthorizer {
    fn authorize(&self, mut request: Request) -> Result<Request, KrakenError> {
        let signature = {
            let body = form_body(&request)?;
            let nonce = read_nonce(body)?;
            sign_request(self.credentials.secret(), request.url().path(), nonce, body)
        };

        let mut api_key =
            HeaderValue::from_str(self.credentials.api_key()).map_err(KrakenError::construction)?;
        api_key.set_sensitive(true);
        let mut api_sign = HeaderValue::from_str(&signature).map_err(KrakenError::construction)?;
        api_sign.set_sensitive(true);

        let headers = request.headers_mut();
        headers.insert(headers::API_KEY, api_key);
        headers.insert(headers::API_SIGN, api_sign);
        Ok(request)
    }
}

/// The buffered form body of `request`.
pub(crate) fn form_body(request: &Request) -> Result<&[u8], KrakenError> {
    request
        .body()
        .and_then(|body| body.as_bytes())
        .ok_or_else(|| KrakenError::MalformedRequest("request has no buffered form body".into()))
}

/// Look up a single field in a URL-encoded form body.
pub(crate) fn form_field<'a>(body: &'a [u8], name: &str) -> Option<Cow<'a, str>> {
    url::form_urlencoded::parse(body)
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

fn read_nonce(body: &[u8]) -> Result<u64, KrakenError> {
    let raw = form_field(body, headers::NONCE_FIELD).ok_or_else(|| {
        KrakenError::MalformedRequest("form body has no nonce field".into())
    })?;
    raw.parse().map_err(|_| {
        KrakenError::MalformedRequest(format!("nonce is not an unsigned integer: {raw}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::{Body, Method, Url};

    fn post(path: &str, body: Option<&'static str>) -> Request {
        let url = Url::parse(&format!("https://api.kraken.com{path}")).unwrap();
        let mut request = Request::new(Method::POST, url);
        *request.body_mut() = body.map(Body::from);
        request
    }

    fn authorizer() -> KrakenAuthorizer {
        KrakenAuthorizer::from_secret("test_key", "dGVzdHNlY3JldA==").unwrap()
    }

    #[test]
    fn test_attaches_key_and_signature() {
        let request = authorizer()
            .authorize(post("/0/private/Balance", Some("nonce=1700000000000")))
            .unwrap();

        assert_eq!(request.headers()[headers::API_KEY], "test_key");
        assert_eq!(
            request.headers()[headers::API_SIGN],
            "DLZh84JEMeXY62GpdT6j9VYjz5XDOT62sOmrY+eaQyLFEASBYZn34rkT6RHb7mwdvVFDxZgCL2qMDaSsPxTfVg=="
        );
        assert!(request.headers()[headers::API_SIGN].is_sensitive());
    }

    #[test]
    fn test_signs_otp_as_part_of_body() {
        let request = authorizer()
            .authorize(post(
                "/0/private/Withdraw",
                Some("nonce=1700000000001&otp=123456&asset=XBT&key=main&amount=0.5"),
            ))
            .unwrap();

        assert_eq!(
            request.headers()[headers::API_SIGN],
            "mny9/DzokYPLkXKkHTPxc1SkbNhtpWkhyvLgwYclU9X9s9Dxm6Fa7HDlipktvVV073n01iGJdY1y4gsa/y61iQ=="
        );
    }

    #[test]
    fn test_missing_body_is_malformed() {
        let err = authorizer()
            .authorize(post("/0/private/Balance", None))
            .unwrap_err();
        assert!(matches!(err, KrakenError::MalformedRequest(_)));
    }

    #[test]
    fn test_missing_nonce_is_malformed() {
        let err = authorizer()
            .authorize(post("/0/private/Balance", Some("asset=XBT")))
            .unwrap_err();
        assert!(matches!(err, KrakenError::MalformedRequest(_)));
    }

    #[test]
    fn test_non_numeric_nonce_is_malformed() {
        let err = authorizer()
            .authorize(post("/0/private/Balance", Some("nonce=soon")))
            .unwrap_err();
        assert!(matches!(err, KrakenError::MalformedRequest(msg) if msg.contains("soon")));
    }

    #[test]
    fn test_no_auth_passes_through() {
        let request = NoAuth
            .authorize(post("/0/public/Time", None))
            .unwrap();
        assert!(request.headers().get(headers::API_SIGN).is_none());
    }

    #[test]
    fn test_trait_object_forwarding() {
        let shared: Arc<dyn Authorizer> = Arc::new(authorizer());
        let request = shared
            .authorize(post("/0/private/Balance", Some("nonce=1")))
            .unwrap();
        assert!(request.headers().contains_key(headers::API_SIGN));
    }

    #[test]
    fn test_form_field_decodes_values() {
        assert_eq!(
            form_field(b"nonce=1&pair=XBT%2FUSD", "pair").as_deref(),
            Some("XBT/USD")
        );
        assert!(form_field(b"nonce=1", "otp").is_none());
    }
}
