//! JSON body encoding and decoding.

use std::fmt;
use std::marker::PhantomData;

use bytes::Bytes;

use crate::Result;

/// Content type sent with JSON request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// An encoded request payload together with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    bytes: Bytes,
    content_type: String,
}

impl Body {
    /// Creates a body from raw bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }

    /// Encodes `value` as a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self::new(to_json(value)?, JSON_CONTENT_TYPE))
    }

    /// Payload bytes.
    #[must_use]
    pub const fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Content type sent along with the payload.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Consume into (bytes, content type).
    #[must_use]
    pub fn into_parts(self) -> (Bytes, String) {
        (self.bytes, self.content_type)
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use netcall_core::to_json;
/// use std::collections::BTreeMap;
///
/// let body = BTreeMap::from([("title", "foo"), ("userId", "1")]);
/// let bytes = to_json(&body).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"title":"foo","userId":"1"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes into a value.
///
/// Errors carry the path to the problematic field (e.g., "user.address.city").
///
/// # Errors
///
/// Returns [`Error::JsonDeserialization`](crate::Error::JsonDeserialization)
/// if the bytes are not valid JSON or do not match `T`.
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Decode an already-parsed JSON document into a value.
///
/// # Errors
///
/// Returns [`Error::JsonDeserialization`](crate::Error::JsonDeserialization)
/// if the document does not match `T`.
///
/// # Example
///
/// ```
/// use netcall_core::from_value;
///
/// let value = serde_json::json!({"key": "value"});
/// assert!(from_value::<Vec<String>>(value).is_err());
/// ```
pub fn from_value<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Turns a raw JSON document into the shape a caller asked for.
///
/// Closures `FnOnce(serde_json::Value) -> Result<T>` are decoders, so a
/// caller can supply any custom schema check without a dedicated type.
pub trait Decoder<T> {
    /// Decode `value`.
    ///
    /// # Errors
    ///
    /// Returns an error when `value` does not have the expected shape.
    fn decode(self, value: serde_json::Value) -> Result<T>;
}

impl<T, F> Decoder<T> for F
where
    F: FnOnce(serde_json::Value) -> Result<T>,
{
    fn decode(self, value: serde_json::Value) -> Result<T> {
        self(value)
    }
}

/// Decoder driven by `T`'s [`Deserialize`](serde::Deserialize) implementation.
pub struct Json<T>(PhantomData<fn() -> T>);

impl<T> Json<T> {
    /// Creates the decoder.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Json<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Json<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Json<T> {}

impl<T> fmt::Debug for Json<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Json")
            .field(&std::any::type_name::<T>())
            .finish()
    }
}

impl<T: serde::de::DeserializeOwned> Decoder<T> for Json<T> {
    fn decode(self, value: serde_json::Value) -> Result<T> {
        from_value(value)
    }
}
