//! Core types and traits for the netcall request layer.
//!
//! This crate provides the foundational types used by netcall:
//! - [`Method`] - the five HTTP verbs a request can use
//! - [`Request`] and [`RequestBuilder`] - wire-level HTTP requests
//! - [`Response`] - wire-level HTTP responses
//! - [`Error`] and [`Result`] - raw faults raised while executing a call
//! - [`NetworkError`] - the closed, classified error taxonomy returned to callers
//! - [`HttpClient`] and [`Transport`] - the seam to the underlying HTTP transport
//! - [`Decoder`] and [`Json`] - explicit decoding of JSON payloads

mod body;
mod client;
mod error;
mod method;
mod network_error;
pub mod prelude;
mod request;
mod response;

pub use body::{Body, Decoder, JSON_CONTENT_TYPE, Json, from_json, from_value, to_json};
pub use client::{HttpClient, Transport};
pub use error::{Error, Result};
pub use method::Method;
pub use network_error::NetworkError;
pub use request::{Request, RequestBuilder};
pub use response::Response;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
