//! Call logging through `tracing`.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Error, Request, Response, Result};

const REDACTED: &str = "<redacted>";
const SENSITIVE_HEADERS: [&str; 3] = ["authorization", "proxy-authorization", "cookie"];

/// Layer wrapping every call in an `http_request` span.
///
/// Completion is logged at info level, an error status or a fault at warn
/// level. At [`LogLevel::Debug`] the outgoing headers are logged too, with
/// credentials redacted.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// How much the logging middleware reports about the outgoing request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Headers and body size, at debug level.
    Debug,
    /// One line per call.
    #[default]
    Info,
}

impl LoggingLayer {
    /// Summary logging.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Detailed logging.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// Level this layer logs requests at.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service produced by [`LoggingLayer`].
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

impl<S> Service<Request<Bytes>> for Logging<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let span = span!(
            Level::INFO,
            "http_request",
            method = %request.method(),
            url = %request.url()
        );

        if self.level == LogLevel::Debug {
            let _entered = span.enter();
            debug!(
                headers = ?redacted_headers(&request),
                body_len = request.body().map_or(0, Bytes::len),
                "sending request"
            );
        }

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();
                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) if response.is_success() => info!(
                        status = response.status(),
                        body_len = response.body().len(),
                        elapsed_ms,
                        "call completed"
                    ),
                    Ok(response) => warn!(
                        status = response.status(),
                        reason = response.status_message(),
                        elapsed_ms,
                        "call answered with an error status"
                    ),
                    Err(err) => warn!(error = %err, elapsed_ms, "call failed"),
                }

                result
            }
            .instrument(span),
        )
    }
}

/// Request headers sorted by name, credentials replaced.
fn redacted_headers(request: &Request<Bytes>) -> BTreeMap<&str, &str> {
    request
        .headers()
        .iter()
        .map(|(name, value)| {
            let sensitive = SENSITIVE_HEADERS
                .iter()
                .any(|candidate| name.eq_ignore_ascii_case(candidate));
            (name.as_str(), if sensitive { REDACTED } else { value.as_str() })
        })
        .collect()
}
