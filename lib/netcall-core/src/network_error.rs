//! Classified errors returned by the safe façade.

use derive_more::{Display, Error};

use crate::Error;

/// Closed set of failure kinds a safe request can end with.
///
/// Every failing safe request yields exactly one of these. Errors are created
/// at the point of failure and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum NetworkError {
    /// The target could not be resolved to a valid address.
    #[display("URL construction error: {_0}")]
    UrlConstruct(#[error(not(source))] String),

    /// The server answered outside of 2xx.
    #[display("HTTP status {code}: {message}")]
    StatusCode {
        /// HTTP status code.
        code: u16,
        /// Human-readable reason.
        message: String,
    },

    /// The response body did not match the requested shape.
    #[display("decoding error: {_0}")]
    Decoding(#[error(not(source))] String),

    /// Missing body on success, transport fault, or anything unclassified.
    #[display("API error: {_0}")]
    Api(#[error(not(source))] String),
}

impl NetworkError {
    /// Map a raw fault onto the taxonomy.
    ///
    /// Address faults become [`UrlConstruct`](Self::UrlConstruct), payload
    /// decoding faults become [`Decoding`](Self::Decoding), and everything else
    /// becomes [`Api`](Self::Api).
    #[must_use]
    pub fn classify(error: &Error) -> Self {
        match error {
            Error::InvalidUrl(_) | Error::UnresolvableTarget { .. } => {
                Self::UrlConstruct(error.to_string())
            }
            Error::JsonDeserialization { .. } => Self::Decoding(error.to_string()),
            Error::Connection(_)
            | Error::Tls(_)
            | Error::Timeout
            | Error::InvalidRequest(_)
            | Error::JsonSerialization(_) => Self::Api(error.to_string()),
        }
    }

    /// Build the [`StatusCode`](Self::StatusCode) error for a non-2xx answer.
    ///
    /// Well-known codes get a fixed reason; any other code reports the
    /// server's status message.
    #[must_use]
    pub fn from_status(code: u16, status_message: &str) -> Self {
        let message = match code {
            401 => "Unauthorized".to_string(),
            404 => "Not Found".to_string(),
            500 => "Internal Server Error".to_string(),
            _ => format!("Unknown Error: {status_message}"),
        };
        Self::StatusCode { code, message }
    }

    /// Error for a successful answer that carried no body.
    #[must_use]
    pub fn missing_body(status_message: &str) -> Self {
        Self::Api(format!(
            "Error: Body expected but found null instead {status_message}"
        ))
    }

    /// The message carried by this error.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::UrlConstruct(message)
            | Self::StatusCode { message, .. }
            | Self::Decoding(message)
            | Self::Api(message) => message,
        }
    }

    /// Returns the HTTP status code if this is a status error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::StatusCode { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns `true` if this is a status error with the given code.
    #[must_use]
    pub fn is_status(&self, code: u16) -> bool {
        self.status() == Some(code)
    }
}

impl From<Error> for NetworkError {
    fn from(error: Error) -> Self {
        Self::classify(&error)
    }
}
