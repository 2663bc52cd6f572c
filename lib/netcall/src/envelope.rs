//! Raw outcome of one call, before decoding and classification.

use bytes::Bytes;

use crate::{Response, Result, from_json};

/// Status metadata plus the parsed JSON body of a response.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Envelope {
    pub(crate) raw_body: Option<serde_json::Value>,
    pub(crate) status: u16,
    pub(crate) success: bool,
    pub(crate) status_message: String,
}

impl Envelope {
    /// Only 2xx bodies are parsed. An empty body or a JSON `null` counts as
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns a JSON deserialization error when a 2xx body is not valid JSON.
    pub(crate) fn from_response(response: Response<Bytes>) -> Result<Self> {
        let status = response.status();
        let success = response.is_success();
        let status_message = response.status_message().to_string();
        let body = response.into_body();

        let raw_body = if success && !body.is_empty() {
            match from_json::<serde_json::Value>(&body)? {
                serde_json::Value::Null => None,
                value => Some(value),
            }
        } else {
            None
        };

        Ok(Self {
            raw_body,
            status,
            success,
            status_message,
        })
    }
}
