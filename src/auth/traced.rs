//! Tracing decorator for authorizers.

use reqwest::Request;
use tracing::field;

use crate::auth::Authorizer;
use crate::auth::authorizer::{form_field, headers};
use crate::error::KrakenError;

/// Wraps an [`Authorizer`] and records one `kraken.authorize` span per call.
///
/// Only the request path and nonce are attached to the span. The body,
/// headers, signature and OTP never are. Without a `tracing` subscriber the
/// span costs nothing.
#[derive(Debug, Clone)]
pub struct TracedAuthorizer<A> {
    inner: A,
}

impl<A: Authorizer> TracedAuthorizer<A> {
    /// Wrap `inner`.
    pub fn new(inner: A) -> Self {
        Self { inner }
    }

    /// The wrapped authorizer.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Unwrap the decorator.
    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: Authorizer> Authorizer for TracedAuthorizer<A> {
    fn authorize(&self, request: Request) -> Result<Request, KrakenError> {
        let span = tracing::info_span!(
            "kraken.authorize",
            path = %request.url().path(),
            nonce = field::Empty,
            error = field::Empty,
        );
        if let Some(nonce) = request
            .body()
            .and_then(|body| body.as_bytes())
            .and_then(|body| form_field(body, headers::NONCE_FIELD))
        {
            span.record("nonce", field::display(&nonce));
        }

        let _guard = span.enter();
        let result = self.inner.authorize(request);
        if let Err(err) = &result {
            span.record("error", field::display(err));
            tracing::warn!(error = %err, "request authorization failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use reqwest::{Body, Method, Url};
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;
    use crate::auth::{KrakenAuthorizer, NoAuth};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Capture {
        fn output(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn post(path: &str, body: &'static str) -> Request {
        let url = Url::parse(&format!("https://api.kraken.com{path}")).unwrap();
        let mut request = Request::new(Method::POST, url);
        *request.body_mut() = Some(Body::from(body));
        request
    }

    fn capture<T>(f: impl FnOnce() -> T) -> (T, String) {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(false)
            .without_time()
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, capture.output())
    }

    #[test]
    fn test_result_is_unchanged() {
        let inner = KrakenAuthorizer::from_secret("test_key", "dGVzdHNlY3JldA==").unwrap();
        let expected = inner
            .authorize(post("/0/private/Balance", "nonce=1700000000000"))
            .unwrap();
        let traced = TracedAuthorizer::new(inner)
            .authorize(post("/0/private/Balance", "nonce=1700000000000"))
            .unwrap();

        assert_eq!(
            traced.headers()[headers::API_SIGN],
            expected.headers()[headers::API_SIGN]
        );
    }

    #[test]
    fn test_span_carries_path_and_nonce_only() {
        let traced =
            TracedAuthorizer::new(KrakenAuthorizer::from_secret("test_key", "dGVzdHNlY3JldA==").unwrap());

        let (result, output) = capture(|| {
            traced.authorize(post(
                "/0/private/Withdraw",
                "nonce=1700000000001&otp=918273&asset=XBT&key=main&amount=0.5",
            ))
        });
        let request = result.unwrap();
        let signature = request.headers()[headers::API_SIGN].to_str().unwrap().to_string();

        assert!(output.contains("kraken.authorize"), "{output}");
        assert!(output.contains("path=/0/private/Withdraw"), "{output}");
        assert!(output.contains("nonce=1700000000001"), "{output}");
        assert!(!output.contains("918273"), "{output}");
        assert!(!output.contains("amount"), "{output}");
        assert!(!output.contains(&signature), "{output}");
    }

    #[test]
    fn test_error_is_recorded() {
        let traced =
            TracedAuthorizer::new(KrakenAuthorizer::from_secret("test_key", "dGVzdHNlY3JldA==").unwrap());

        let (result, output) = capture(|| traced.authorize(post("/0/private/Balance", "asset=XBT")));

        assert!(matches!(result, Err(KrakenError::MalformedRequest(_))));
        assert!(output.contains("request authorization failed"), "{output}");
        assert!(output.contains("no nonce field"), "{output}");
    }

    #[test]
    fn test_wraps_pass_through() {
        let traced = TracedAuthorizer::new(NoAuth);
        let request = traced.authorize(post("/0/public/Time", "")).unwrap();
        assert!(request.headers().is_empty());
        let _: NoAuth = traced.into_inner();
    }
}
