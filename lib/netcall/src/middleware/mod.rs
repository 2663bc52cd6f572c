//! Tower middleware layers for the default transport.
//!
//! - [`HeadersLayer`] - sets a fixed set of headers on every request; this is
//!   the layer a per-call header override is built from
//! - [`LoggingLayer`] - logs requests/responses using `tracing`
//!
//! # Example
//!
//! ```ignore
//! use netcall::HyperClient;
//! use netcall::middleware::HeadersLayer;
//!
//! let client = HyperClient::builder()
//!     .layer(HeadersLayer::bearer("my-token"))
//!     .with_logging()
//!     .build();
//! ```

mod headers;
mod logging;

pub use headers::{Headers, HeadersLayer};
pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
