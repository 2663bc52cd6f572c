//! Prelude module for convenient imports.
//!
//! ```ignore
//! use netcall::prelude::*;
//! ```

pub use crate::{
    ClientConfig, DataRequest, Decoder, Descriptor, Error, HttpClient, HyperClient, Json, Method,
    NetworkError, Networking, Result, Transport,
};
pub use serde::{Deserialize, Serialize};
