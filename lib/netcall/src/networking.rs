//! Transport provider: target resolution and service bindings.

use std::collections::HashMap;
use std::ops::Deref;
use std::sync::{Arc, OnceLock};

use bytes::Bytes;
use tracing::{debug, trace};
use url::Url;

use crate::envelope::Envelope;
use crate::{
    Body, ClientConfig, DataRequest, Error, HttpClient, HyperClient, Method, Request, Result,
    Transport,
};

/// Owns a base address and a default transport, and hands out service
/// bindings over them.
///
/// Cloning is cheap and clones share the lazily built default binding, so a
/// single provider can be handed to every part of an application.
///
/// # Example
///
/// ```ignore
/// use netcall::{HyperClient, Networking};
///
/// let networking = Networking::with_base_url(HyperClient::new(), "https://example.test/")?;
/// let post: Option<serde_json::Value> = networking.request("posts/1").send().await;
/// ```
#[derive(Debug)]
pub struct Networking<C = HyperClient> {
    inner: Arc<Inner<C>>,
}

#[derive(Debug)]
struct Inner<C> {
    base_url: Option<Url>,
    transport: C,
    default_binding: OnceLock<ServiceBinding<C>>,
}

impl<C> Clone for Networking<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> Networking<C> {
    /// Create a provider without a base address: every target must be absolute.
    #[must_use]
    pub fn new(transport: C) -> Self {
        Self::build(transport, None)
    }

    /// Create a provider resolving relative targets against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL.
    pub fn with_base_url(transport: C, base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref()).map_err(Error::InvalidUrl)?;
        Ok(Self::with_url(transport, base_url))
    }

    /// Create a provider with a pre-parsed base address.
    #[must_use]
    pub fn with_url(transport: C, base_url: Url) -> Self {
        Self::build(transport, Some(base_url))
    }

    fn build(transport: C, base_url: Option<Url>) -> Self {
        Self {
            inner: Arc::new(Inner {
                base_url,
                transport,
                default_binding: OnceLock::new(),
            }),
        }
    }

    /// Base address relative targets are resolved against.
    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.inner.base_url.as_ref()
    }

    /// The default transport.
    #[must_use]
    pub fn transport(&self) -> &C {
        &self.inner.transport
    }

    /// Resolve `target` to an absolute address.
    ///
    /// A `target` that parses as a hierarchical URL (`scheme://...`) is
    /// returned unchanged. Anything else, `items:batchGet` included, is
    /// appended to the base address as-is (no path normalisation).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvableTarget`] if `target` is relative and there
    /// is no base address, if `target` is a malformed absolute URL, or if the
    /// result is not a valid URL.
    pub fn resolve(&self, target: &str) -> Result<Url> {
        match Url::parse(target) {
            Ok(url) if !url.cannot_be_a_base() => Ok(url),
            Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {
                let Some(base_url) = &self.inner.base_url else {
                    return Err(Error::unresolvable_target(
                        target,
                        url::ParseError::RelativeUrlWithoutBase,
                    ));
                };
                Url::parse(&format!("{base_url}{target}"))
                    .map_err(|source| Error::unresolvable_target(target, source))
            }
            Err(source) => Err(Error::unresolvable_target(target, source)),
        }
    }
}

impl<C: Transport> Networking<C> {
    /// Start describing a request to `target`.
    ///
    /// The target is resolved right away; a resolution failure is reported
    /// when the request is built or sent.
    pub fn request(&self, target: impl AsRef<str>) -> DataRequest<C> {
        DataRequest::new(self.clone(), self.resolve(target.as_ref()))
    }

    /// Binding a call should use.
    ///
    /// With neither a transport override nor extra headers this is the shared
    /// default binding, built on first use. Otherwise a new binding is built
    /// for this call only: over `transport` if given, else over a clone of the
    /// default transport, with `headers` injected into every request.
    pub fn service_for(
        &self,
        transport: Option<C>,
        headers: Option<HashMap<String, String>>,
    ) -> Binding<'_, C> {
        match (transport, headers) {
            (None, None) => Binding::Shared(self.default_binding()),
            (transport, headers) => Binding::Scoped(self.scoped_binding(transport, headers)),
        }
    }

    fn default_binding(&self) -> &ServiceBinding<C> {
        self.inner.default_binding.get_or_init(|| {
            trace!("building default service binding");
            ServiceBinding::new(self.inner.transport.clone())
        })
    }

    fn scoped_binding(
        &self,
        transport: Option<C>,
        headers: Option<HashMap<String, String>>,
    ) -> ServiceBinding<C> {
        debug!(
            transport_override = transport.is_some(),
            header_count = headers.as_ref().map_or(0, HashMap::len),
            "building call-scoped service binding"
        );

        let transport = transport.unwrap_or_else(|| self.inner.transport.clone());
        let transport = match headers {
            Some(headers) => transport.with_headers(headers),
            None => transport,
        };
        ServiceBinding::new(transport)
    }
}

impl Networking<HyperClient> {
    /// Create a provider over a new [`HyperClient`] built from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL.
    pub fn from_config(base_url: impl AsRef<str>, config: ClientConfig) -> Result<Self> {
        Self::with_base_url(HyperClient::with_config(config), base_url)
    }
}

/// A ready-to-call handle issuing the five HTTP verbs over one transport.
#[derive(Debug, Clone)]
pub struct ServiceBinding<C> {
    transport: C,
}

impl<C> ServiceBinding<C> {
    fn new(transport: C) -> Self {
        Self { transport }
    }

    /// The transport calls go through.
    #[must_use]
    pub fn transport(&self) -> &C {
        &self.transport
    }
}

impl<C: HttpClient> ServiceBinding<C> {
    pub(crate) async fn get(&self, url: &Url) -> Result<Envelope> {
        self.send(Method::Get, url, None).await
    }

    pub(crate) async fn post(&self, url: &Url, body: Option<Body>) -> Result<Envelope> {
        self.send(Method::Post, url, body).await
    }

    pub(crate) async fn put(&self, url: &Url, body: Option<Body>) -> Result<Envelope> {
        self.send(Method::Put, url, body).await
    }

    pub(crate) async fn patch(&self, url: &Url, body: Option<Body>) -> Result<Envelope> {
        self.send(Method::Patch, url, body).await
    }

    pub(crate) async fn delete(&self, url: &Url) -> Result<Envelope> {
        self.send(Method::Delete, url, None).await
    }

    async fn send(&self, method: Method, url: &Url, body: Option<Body>) -> Result<Envelope> {
        let builder = Request::builder(method, url.clone());
        let request = match body {
            Some(body) => builder.payload(body),
            None if method.has_body() => builder.body(Bytes::new()),
            None => builder,
        }
        .build();

        let response = self.transport.execute(request).await?;
        Envelope::from_response(response)
    }
}

/// The binding chosen for one call.
#[derive(Debug)]
pub enum Binding<'a, C> {
    /// The provider's default binding, shared by every call without overrides.
    Shared(&'a ServiceBinding<C>),
    /// A binding built for a single call and dropped with it.
    Scoped(ServiceBinding<C>),
}

impl<C> Binding<'_, C> {
    /// Returns `true` for the provider's shared default binding.
    #[must_use]
    pub const fn is_shared(&self) -> bool {
        matches!(self, Self::Shared(_))
    }
}

impl<C> Deref for Binding<'_, C> {
    type Target = ServiceBinding<C>;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Shared(binding) => binding,
            Self::Scoped(binding) => binding,
        }
    }
}
