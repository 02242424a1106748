//! Request assembly.
//!
//! [`KrakenRestClient::build_request`] turns a path, method, optional query and
//! optional form body into a `reqwest::Request`, then hands it to the
//! configured [`Authorizer`](crate::auth::Authorizer) when there is a body to
//! sign.

use reqwest::header::{CONTENT_TYPE, HeaderValue, USER_AGENT};
use reqwest::{Body, Method, Request, Url};
use serde::Serialize;

use crate::auth::headers::{NONCE_FIELD, OTP_FIELD};
use crate::error::KrakenError;
use crate::rest::KrakenRestClient;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Empty parameter set for endpoints that take none.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoParams {}

/// Per-call security options for private endpoints.
///
/// The one-time password is written into the form body before signing and
/// is never stored on the client.
#[derive(Clone, Default)]
pub struct SecurityOptions {
    /// Second factor for keys that require one.
    pub otp: Option<String>,
}

impl SecurityOptions {
    /// Options carrying a one-time password.
    pub fn otp(otp: impl Into<String>) -> Self {
        Self {
            otp: Some(otp.into()),
        }
    }
}

impl std::fmt::Debug for SecurityOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityOptions")
            .field("otp", &self.otp.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl KrakenRestClient {
    /// Build a request for `path`, authorizing it when it carries a form body.
    ///
    /// - `query` is URL-encoded onto the URL; an empty encoding adds no `?`.
    /// - `form` is used verbatim as the body with
    ///   `Content-Type: application/x-www-form-urlencoded`. The authorizer
    ///   signs these exact bytes.
    ///
    /// Without a configured authorizer the request is returned unsigned.
    ///
    /// # Errors
    ///
    /// [`KrakenError::RequestConstruction`] for an unparseable URL, a query
    /// that cannot be URL-encoded, or an invalid user agent. Authorizer errors
    /// are passed through.
    pub fn build_request<Q>(
        &self,
        path: &str,
        method: Method,
        query: Option<&Q>,
        form: Option<String>,
    ) -> Result<Request, KrakenError>
    where
        Q: Serialize + ?Sized,
    {
        let mut url =
            Url::parse(&format!("{}{}", self.base_url, path)).map_err(KrakenError::construction)?;
        if let Some(query) = query {
            let encoded = serde_urlencoded::to_string(query).map_err(KrakenError::construction)?;
            if !encoded.is_empty() {
                url.set_query(Some(&encoded));
            }
        }

        let mut request = Request::new(method, url);
        let user_agent = HeaderValue::from_str(&self.user_agent).map_err(KrakenError::construction)?;
        request.headers_mut().insert(USER_AGENT, user_agent);

        let Some(form) = form else {
            return Ok(request);
        };

        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        *request.body_mut() = Some(Body::from(form));

        match &self.authorizer {
            Some(authorizer) => authorizer.authorize(request),
            None => Ok(request),
        }
    }
}

/// Encode a private form body: `nonce`, then `otp` if present, then `params`.
pub(crate) fn encode_form<P>(
    nonce: u64,
    security: Option<&SecurityOptions>,
    params: &P,
) -> Result<String, KrakenError>
where
    P: Serialize + ?Sized,
{
    let mut form = url::form_urlencoded::Serializer::new(String::new());
    form.append_pair(NONCE_FIELD, &nonce.to_string());
    if let Some(otp) = security.and_then(|s| s.otp.as_deref()) {
        form.append_pair(OTP_FIELD, otp);
    }
    let mut body = form.finish();

    let params = serde_urlencoded::to_string(params).map_err(KrakenError::construction)?;
    if !params.is_empty() {
        body.push('&');
        body.push_str(&params);
    }
    Ok(body)
}
