//! Prelude module for convenient imports.
//!
//! ```ignore
//! use netcall_core::prelude::*;
//! ```

pub use crate::{
    Body, Decoder, Error, HttpClient, Json, Method, NetworkError, Request, RequestBuilder,
    Response, Result, Transport, from_json, from_value, to_json,
};
