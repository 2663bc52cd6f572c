//! Header injection middleware.
//!
//! Every outgoing request gets the configured headers. A configured header
//! replaces any header of the same name (ignoring case) already on the request.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use tower::{Layer, Service};

use crate::{Error, Request, Response, Result};

/// Layer that sets a fixed set of headers on every request.
///
/// # Example
///
/// ```ignore
/// use netcall::middleware::HeadersLayer;
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .layer(HeadersLayer::new([("X-Api-Key".to_string(), "secret".to_string())].into()))
///     .service(client);
/// ```
#[derive(Debug, Clone)]
pub struct HeadersLayer {
    headers: Arc<HashMap<String, String>>,
}

impl HeadersLayer {
    /// Create a layer injecting `headers`.
    #[must_use]
    pub fn new(headers: HashMap<String, String>) -> Self {
        Self {
            headers: Arc::new(headers),
        }
    }

    /// Create a layer injecting `Authorization: Bearer <token>`.
    #[must_use]
    pub fn bearer(token: impl AsRef<str>) -> Self {
        Self::new(HashMap::from([(
            "Authorization".to_string(),
            format!("Bearer {}", token.as_ref()),
        )]))
    }

    /// Headers injected by this layer.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

impl<S> Layer<S> for HeadersLayer {
    type Service = Headers<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Headers {
            inner,
            headers: Arc::clone(&self.headers),
        }
    }
}

/// Service that sets a fixed set of headers on every request.
#[derive(Debug, Clone)]
pub struct Headers<S> {
    inner: S,
    headers: Arc<HashMap<String, String>>,
}

impl<S> Service<Request<Bytes>> for Headers<S>
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

    fn call(&mut self, mut request: Request<Bytes>) -> Self::Future {
        for (name, value) in self.headers.iter() {
            request.set_header(name.as_str(), value.as_str());
        }

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(request).await })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tower::ServiceExt;

    use super::*;
    use crate::Method;

    /// Records the headers of the last request it saw.
    #[derive(Clone, Default)]
    struct Recorder {
        seen: Arc<Mutex<Option<HashMap<String, String>>>>,
    }

    impl Service<Request<Bytes>> for Recorder {
        type Response = Response<Bytes>;
        type Error = Error;
        type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, request: Request<Bytes>) -> Self::Future {
            *self.seen.lock().expect("lock") = Some(request.headers().clone());
            Box::pin(async { Ok(Response::new(200, HashMap::new(), Bytes::new())) })
        }
    }

    fn request_with(name: &str, value: &str) -> Request<Bytes> {
        let url = url::Url::parse("https://api.example.com/posts").expect("valid URL");
        Request::builder(Method::Post, url).header(name, value).build()
    }

    #[tokio::test]
    async fn injected_header_wins_over_existing_one() {
        let recorder = Recorder::default();
        let service = HeadersLayer::new(HashMap::from([(
            "Content-type".to_string(),
            "application/json; charset=UTF-8".to_string(),
        )]))
        .layer(recorder.clone());

        service
            .oneshot(request_with("Content-Type", "text/plain"))
            .await
            .expect("response");

        let seen = recorder.seen.lock().expect("lock").clone().expect("called");
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen.get("Content-type").map(String::as_str),
            Some("application/json; charset=UTF-8")
        );
    }

    #[tokio::test]
    async fn unrelated_headers_are_kept() {
        let recorder = Recorder::default();
        let service = HeadersLayer::bearer("token123").layer(recorder.clone());

        service
            .oneshot(request_with("Accept", "application/json"))
            .await
            .expect("response");

        let seen = recorder.seen.lock().expect("lock").clone().expect("called");
        assert_eq!(seen.get("Accept").map(String::as_str), Some("application/json"));
        assert_eq!(
            seen.get("Authorization").map(String::as_str),
            Some("Bearer token123")
        );
    }
}
