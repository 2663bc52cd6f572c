//! Transport seam.
//!
//! - [`HttpClient`] - executes one wire-level request
//! - [`Transport`] - an [`HttpClient`] that can be cheaply cloned and re-wrapped
//!   with injected headers, which is what a per-call binding needs

use std::collections::HashMap;
use std::future::Future;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// Implementations should be async-first and support connection pooling.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// A non-2xx status is not an error at this level.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid request
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

/// A transport handle a provider can hand out and reconfigure per call.
///
/// Cloning must be cheap and must share the underlying connection pool.
pub trait Transport: HttpClient + Clone + 'static {
    /// Returns a new transport that sets `headers` on every outgoing request.
    ///
    /// Injected headers replace any header of the same name already present on
    /// the request. `self` is left untouched.
    #[must_use]
    fn with_headers(&self, headers: HashMap<String, String>) -> Self;
}
