//! Raw faults raised while building or executing a call.
//!
//! These are never returned by the safe façade as-is: they are mapped onto the
//! closed [`NetworkError`](crate::NetworkError) taxonomy first.

use derive_more::{Display, Error, From};

/// Fault raised while resolving, sending, or reading an HTTP call.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// A configured timeout elapsed.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// A request target could not be turned into an absolute address.
    #[display("cannot resolve target '{target}': {source}")]
    #[from(skip)]
    UnresolvableTarget {
        /// The target as given by the caller.
        target: String,
        /// Why parsing failed.
        source: url::ParseError,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an unresolvable target error.
    #[must_use]
    pub fn unresolvable_target(target: impl Into<String>, source: url::ParseError) -> Self {
        Self::UnresolvableTarget {
            target: target.into(),
            source,
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the fault happened while building the target address.
    #[must_use]
    pub const fn is_url(&self) -> bool {
        matches!(self, Self::InvalidUrl(_) | Self::UnresolvableTarget { .. })
    }

    /// Returns `true` if the fault happened while decoding a JSON payload.
    #[must_use]
    pub const fn is_decoding(&self) -> bool {
        matches!(self, Self::JsonDeserialization { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::Timeout;
        assert_eq!(err.to_string(), "request timeout");

        let err = Error::connection("failed to connect");
        assert_eq!(err.to_string(), "connection error: failed to connect");

        let err = Error::json_deserialization("user.address.city", "missing field `city`");
        assert_eq!(
            err.to_string(),
            "JSON deserialization error at 'user.address.city': missing field `city`"
        );

        let err = Error::unresolvable_target("test", url::ParseError::RelativeUrlWithoutBase);
        assert_eq!(
            err.to_string(),
            "cannot resolve target 'test': relative URL without a base"
        );
    }

    #[test]
    fn error_predicates() {
        assert!(Error::Timeout.is_timeout());
        assert!(!Error::connection("x").is_timeout());

        assert!(Error::connection("failed").is_connection());
        assert!(!Error::Timeout.is_connection());

        assert!(Error::from(url::ParseError::EmptyHost).is_url());
        assert!(
            Error::unresolvable_target("test", url::ParseError::RelativeUrlWithoutBase).is_url()
        );
        assert!(!Error::Timeout.is_url());

        assert!(Error::json_deserialization("", "eof").is_decoding());
        assert!(!Error::invalid_request("bad").is_decoding());
    }

    #[test]
    fn unresolvable_target_keeps_source() {
        use std::error::Error as _;

        let err = Error::unresolvable_target("test", url::ParseError::RelativeUrlWithoutBase);
        assert!(err.source().is_some());
    }
}
