//! Fluent HTTP request construction and execution.
//!
//! Describe a request with a [`DataRequest`] builder, dispatch it through a
//! shared [`Networking`] provider, and get back either an optional decoded
//! value (best-effort) or a decoded value / [`NetworkError`] (safe).
//!
//! # Example
//!
//! ```ignore
//! use std::collections::HashMap;
//! use netcall::prelude::*;
//!
//! let networking = Networking::from_config("https://example.test/", ClientConfig::default())?;
//!
//! // Best-effort: any failure collapses to `None`.
//! let post: Option<HashMap<String, serde_json::Value>> =
//!     networking.request("posts/1").send().await;
//!
//! // Safe: failures are classified.
//! let created: Result<HashMap<String, String>, NetworkError> = networking
//!     .request("posts/")
//!     .with_method(Method::Post)
//!     .with_body(&HashMap::from([("title", "foo"), ("body", "bar"), ("userId", "1")]))
//!     .send_safe()
//!     .await;
//! ```
//!
//! A request that sets headers or a transport gets its own, call-scoped
//! binding; every other request shares the provider's default one.

mod client;
mod config;
mod connector;
mod data_request;
mod envelope;
mod executor;
pub mod facade;
pub mod middleware;
mod networking;
pub mod prelude;

#[cfg(test)]
mod testing;

pub use client::{BoxedService, HyperClient, HyperClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use data_request::{DataRequest, Descriptor};
pub use facade::{request, request_with, safe_request, safe_request_with};
pub use networking::{Binding, Networking, ServiceBinding};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use netcall_core::{
    Body, Decoder, Error, HttpClient, JSON_CONTENT_TYPE, Json, Method, NetworkError, Request,
    RequestBuilder, Response, Result, Transport, from_json, from_value, to_json,
};

// Re-export http types for status codes and headers
pub use netcall_core::{StatusCode, header};

pub use url;
