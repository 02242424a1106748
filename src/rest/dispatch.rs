//! Response dispatch.
//!
//! Both entry points run the same linear sequence:
//!
//! 1. refuse to send once the [`RequestContext`] has expired;
//! 2. send through the shared middleware client;
//! 3. hand any non-200 response back inside [`KrakenError::ApiRequest`];
//! 4. classify the body by its `Content-Type` media type.
//!
//! [`send_json`](KrakenRestClient::send_json) buffers and decodes JSON.
//! [`send_stream`](KrakenRestClient::send_stream) returns binary downloads
//! unread. Neither retries.

use bytes::Bytes;
use futures_util::Stream;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Request, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::context::RequestContext;
use crate::error::KrakenError;
use crate::rest::KrakenRestClient;

/// Status, headers and final URL of a response whose body was consumed.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Final URL after redirects.
    pub url: Url,
}

impl ResponseMeta {
    fn of(response: &Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            url: response.url().clone(),
        }
    }
}

/// How a response body is handled once the status is known to be 200.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Binary,
}

impl BodyKind {
    fn of(media_type: &str) -> Option<Self> {
        match media_type {
            "application/json" => Some(Self::Json),
            "application/octet-stream" | "application/zip" => Some(Self::Binary),
            _ => None,
        }
    }
}

/// A binary response body that has not been read yet.
///
/// The underlying connection is held until the body is fully read or this
/// value is dropped.
#[derive(Debug)]
pub struct StreamingBody {
    response: Response,
    media_type: String,
}

impl StreamingBody {
    /// HTTP status.
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        self.response.headers()
    }

    /// Media type without parameters, e.g. `application/zip`.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Body length if the server announced one.
    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    /// Read the next chunk, or `None` at the end of the body.
    pub async fn chunk(&mut self) -> Result<Option<Bytes>, KrakenError> {
        Ok(self.response.chunk().await?)
    }

    /// Turn the body into a stream of chunks.
    pub fn into_stream(self) -> impl Stream<Item = Result<Bytes, reqwest::Error>> {
        self.response.bytes_stream()
    }

    /// Buffer the whole body.
    pub async fn bytes(self) -> Result<Bytes, KrakenError> {
        Ok(self.response.bytes().await?)
    }

    /// Copy the body into `writer`, returning the number of bytes written.
    pub async fn copy_to<W>(mut self, writer: &mut W) -> Result<u64, KrakenError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut written = 0u64;
        while let Some(chunk) = self.response.chunk().await? {
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;
        Ok(written)
    }

    /// The raw response.
    pub fn into_response(self) -> Response {
        self.response
    }
}

impl KrakenRestClient {
    /// Send `request` and decode a JSON body into `T`.
    ///
    /// Reading the body races `ctx`; if the context expires first the read is
    /// abandoned and the connection dropped.
    ///
    /// # Errors
    ///
    /// - [`KrakenError::ContextExpired`] if `ctx` expired before sending or
    ///   while reading the body;
    /// - [`KrakenError::Transport`] if no response arrived;
    /// - [`KrakenError::ApiRequest`] for any status other than 200;
    /// - [`KrakenError::ResponseFormat`] for a missing or malformed
    ///   `Content-Type`;
    /// - [`KrakenError::UnsupportedContentType`] for anything but
    ///   `application/json`, binary downloads included;
    /// - [`KrakenError::ResponseParse`] if the body does not decode as `T`.
    pub async fn send_json<T>(
        &self,
        ctx: &RequestContext,
        request: Request,
    ) -> Result<(T, ResponseMeta), KrakenError>
    where
        T: DeserializeOwned,
    {
        let (kind, media_type, response) = self.dispatch(ctx, request).await?;
        if kind != Some(BodyKind::Json) {
            return Err(KrakenError::UnsupportedContentType(media_type));
        }

        let meta = ResponseMeta::of(&response);
        let body = tokio::select! {
            biased;
            _ = ctx.expired() => return Err(KrakenError::ContextExpired),
            body = response.bytes() => body?,
        };

        let value = serde_json::from_slice(&body).map_err(KrakenError::ResponseParse)?;
        Ok((value, meta))
    }

    /// Send `request` and return a binary body unread.
    ///
    /// Accepts `application/octet-stream` and `application/zip`. Errors as
    /// [`send_json`](Self::send_json), with JSON bodies rejected as
    /// [`KrakenError::UnsupportedContentType`].
    pub async fn send_stream(
        &self,
        ctx: &RequestContext,
        request: Request,
    ) -> Result<StreamingBody, KrakenError> {
        let (kind, media_type, response) = self.dispatch(ctx, request).await?;
        if kind != Some(BodyKind::Binary) {
            return Err(KrakenError::UnsupportedContentType(media_type));
        }

        Ok(StreamingBody {
            response,
            media_type,
        })
    }

    async fn dispatch(
        &self,
        ctx: &RequestContext,
        request: Request,
    ) -> Result<(Option<BodyKind>, String, Response), KrakenError> {
        ctx.ensure_active()?;

        let method = request.method().clone();
        let path = request.url().path().to_owned();
        debug!(%method, %path, "sending request");

        let response = self.http_client.execute(request).await?;
        let status = response.status();
        if status != StatusCode::OK {
            warn!(%method, %path, %status, "request failed");
            return Err(KrakenError::ApiRequest {
                status,
                response: Box::new(response),
            });
        }

        let media_type = media_type(response.headers())?.to_owned();
        let kind = BodyKind::of(&media_type);
        debug!(%path, %media_type, ?kind, "response received");
        Ok((kind, media_type, response))
    }
}

/// The media type of a `Content-Type` header, parameters stripped.
///
/// The comparison downstream is exact, so `Application/JSON` is a different
/// type from `application/json`.
pub(crate) fn media_type(headers: &HeaderMap) -> Result<&str, KrakenError> {
    let raw = headers
        .get(CONTENT_TYPE)
        .ok_or_else(|| KrakenError::ResponseFormat("response has no Content-Type header".into()))?
        .to_str()
        .map_err(|_| KrakenError::ResponseFormat("Content-Type is not visible ASCII".into()))?;

    let mut parts = split_unquoted(raw)
        .ok_or_else(|| KrakenError::ResponseFormat(format!("unterminated quoted string: {raw}")))?
        .into_iter();
    let essence = parts.next().unwrap_or_default().trim();
    let well_formed = essence.split_once('/').is_some_and(|(kind, subtype)| {
        is_token(kind) && is_token(subtype)
    });
    if !well_formed {
        return Err(KrakenError::ResponseFormat(format!("invalid media type: {raw}")));
    }

    for param in parts.map(str::trim).filter(|p| !p.is_empty()) {
        if !param.split_once('=').is_some_and(|(name, _)| is_token(name.trim())) {
            return Err(KrakenError::ResponseFormat(format!("invalid media type parameter: {raw}")));
        }
    }

    Ok(essence)
}

/// Split on `;` outside quoted strings, or `None` if a quote is left open.
fn split_unquoted(raw: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;
    for (i, b) in raw.bytes().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if quoted => escaped = true,
            b'"' => quoted = !quoted,
            b';' if !quoted => {
                parts.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if quoted {
        return None;
    }
    parts.push(&raw[start..]);
    Some(parts)
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn test_media_type_strips_parameters() {
        let h = headers("application/json; charset=utf-8");
        assert_eq!(media_type(&h).unwrap(), "application/json");
        assert_eq!(media_type(&headers("application/zip")).unwrap(), "application/zip");
    }

    #[test]
    fn test_media_type_missing() {
        let err = media_type(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, KrakenError::ResponseFormat(_)));
    }

    #[test]
    fn test_media_type_malformed() {
        for bad in ["json", "application/", "/json", "application/json; charset", "text plain/x"] {
            let err = media_type(&headers(bad)).unwrap_err();
            assert!(matches!(err, KrakenError::ResponseFormat(_)), "{bad}");
        }
    }

    #[test]
    fn test_media_type_quoted_parameter() {
        let h = headers(r#"application/zip; name="a;b.zip""#);
        assert_eq!(media_type(&h).unwrap(), "application/zip");

        let h = headers(r#"application/json; note="say \"hi;\""; charset=utf-8"#);
        assert_eq!(media_type(&h).unwrap(), "application/json");

        let err = media_type(&headers(r#"application/zip; name="a;b.zip"#)).unwrap_err();
        assert!(matches!(err, KrakenError::ResponseFormat(_)));
    }

    #[test]
    fn test_classification_is_case_sensitive() {
        assert_eq!(BodyKind::of("application/json"), Some(BodyKind::Json));
        assert_eq!(BodyKind::of("application/octet-stream"), Some(BodyKind::Binary));
        assert_eq!(BodyKind::of("application/zip"), Some(BodyKind::Binary));
        assert_eq!(BodyKind::of("Application/JSON"), None);
        assert_eq!(BodyKind::of("text/html"), None);
    }
}
