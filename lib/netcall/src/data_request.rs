//! Fluent request builder and the frozen descriptor it produces.

use std::collections::HashMap;

use url::Url;

use crate::{
    Body, Decoder, HyperClient, Json, Method, NetworkError, Networking, Result, Transport, facade,
};

/// Frozen description of one HTTP call.
///
/// Only [`DataRequest::build`] creates one, and nothing can change it
/// afterwards.
#[derive(Debug, Clone)]
pub struct Descriptor<C = HyperClient> {
    target: Url,
    method: Method,
    body: Option<Body>,
    headers: Option<HashMap<String, String>>,
    transport: Option<C>,
}

impl<C> Descriptor<C> {
    /// Absolute address of the call.
    #[must_use]
    pub fn target(&self) -> &Url {
        &self.target
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Encoded payload, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Headers injected for this call only.
    #[must_use]
    pub const fn headers(&self) -> Option<&HashMap<String, String>> {
        self.headers.as_ref()
    }

    /// Transport used for this call instead of the default one.
    #[must_use]
    pub const fn transport(&self) -> Option<&C> {
        self.transport.as_ref()
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        Url,
        Method,
        Option<Body>,
        Option<HashMap<String, String>>,
        Option<C>,
    ) {
        (
            self.target,
            self.method,
            self.body,
            self.headers,
            self.transport,
        )
    }
}

/// Fluent builder for a [`Descriptor`], created by [`Networking::request`].
///
/// Every `with_*` call replaces the previous value of that setting. Building or
/// sending consumes the builder.
///
/// # Example
///
/// ```ignore
/// use std::collections::HashMap;
/// use netcall::{Method, NetworkError};
///
/// let echoed: Result<HashMap<String, String>, NetworkError> = networking
///     .request("posts/")
///     .with_method(Method::Post)
///     .with_headers([("Content-type", "application/json; charset=UTF-8")])
///     .with_body(&HashMap::from([("title", "foo"), ("body", "bar"), ("userId", "1")]))
///     .send_safe()
///     .await;
/// ```
#[derive(Debug)]
#[must_use = "a request does nothing until it is built or sent"]
pub struct DataRequest<C = HyperClient> {
    networking: Networking<C>,
    target: Result<Url>,
    method: Method,
    body: Option<Result<Body>>,
    headers: Option<HashMap<String, String>>,
    transport: Option<C>,
}

impl<C> DataRequest<C> {
    pub(crate) fn new(networking: Networking<C>, target: Result<Url>) -> Self {
        Self {
            networking,
            target,
            method: Method::default(),
            body: None,
            headers: None,
            transport: None,
        }
    }

    /// Set the HTTP method (GET by default).
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the headers injected for this call.
    ///
    /// They win over any header of the same name, `Content-Type` included.
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers = Some(
            headers
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        );
        self
    }

    /// Set a JSON body, sent as `application/json; charset=UTF-8`.
    ///
    /// A serialization failure is reported when the request is built.
    pub fn with_body<B: serde::Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(Body::json(body));
        self
    }

    /// Send this call through `transport` instead of the default one.
    pub fn with_transport(mut self, transport: C) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Freeze the request.
    ///
    /// # Errors
    ///
    /// Returns the target resolution error or the body serialization error
    /// held by the builder.
    pub fn build(self) -> Result<Descriptor<C>> {
        self.into_descriptor().1
    }

    fn into_descriptor(self) -> (Networking<C>, Result<Descriptor<C>>) {
        let descriptor = self.target.and_then(|target| {
            Ok(Descriptor {
                target,
                method: self.method,
                body: self.body.transpose()?,
                headers: self.headers,
                transport: self.transport,
            })
        });
        (self.networking, descriptor)
    }
}

impl<C: Transport> DataRequest<C> {
    /// Send the request and decode the body into `T`, best-effort.
    ///
    /// Returns `None` on any failure.
    pub async fn send<T: serde::de::DeserializeOwned>(self) -> Option<T> {
        self.send_with(Json::new()).await
    }

    /// Send the request and decode the body with `decoder`, best-effort.
    pub async fn send_with<T, D: Decoder<T>>(self, decoder: D) -> Option<T> {
        let (networking, descriptor) = self.into_descriptor();
        facade::request_with(&networking, descriptor.ok()?, decoder).await
    }

    /// Send the request and decode the body into `T`, classifying failures.
    ///
    /// # Errors
    ///
    /// Returns the [`NetworkError`] the call ended with.
    pub async fn send_safe<T: serde::de::DeserializeOwned>(
        self,
    ) -> std::result::Result<T, NetworkError> {
        self.send_safe_with(Json::new()).await
    }

    /// Send the request and decode the body with `decoder`, classifying
    /// failures.
    ///
    /// # Errors
    ///
    /// Returns the [`NetworkError`] the call ended with.
    pub async fn send_safe_with<T, D: Decoder<T>>(
        self,
        decoder: D,
    ) -> std::result::Result<T, NetworkError> {
        let (networking, descriptor) = self.into_descriptor();
        let descriptor = descriptor.map_err(NetworkError::from)?;
        facade::safe_request_with(&networking, descriptor, decoder).await
    }
}
