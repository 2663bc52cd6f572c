//! In-memory transport for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bytes::Bytes;

use crate::{Error, HttpClient, Method, Request, Response, Result, Transport};

type Reply = Arc<dyn Fn(&Request<Bytes>) -> Result<Response<Bytes>> + Send + Sync>;

/// A request as it reached the fake transport.
#[derive(Debug, Clone)]
pub(crate) struct Sent {
    pub(crate) transport: &'static str,
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<Bytes>,
}

impl Sent {
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Answers every request with a canned reply and records what was sent.
///
/// Clones share the record, so a test can keep one handle and inspect what
/// any derived transport sent.
#[derive(Clone)]
pub(crate) struct FakeTransport {
    name: &'static str,
    injected: HashMap<String, String>,
    reply: Reply,
    sent: Arc<Mutex<Vec<Sent>>>,
}

impl std::fmt::Debug for FakeTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeTransport")
            .field("name", &self.name)
            .field("injected", &self.injected)
            .finish_non_exhaustive()
    }
}

impl FakeTransport {
    pub(crate) fn replying(status: u16, body: &'static str) -> Self {
        Self::with_reply(move |_| {
            Ok(Response::new(
                status,
                HashMap::new(),
                Bytes::from_static(body.as_bytes()),
            ))
        })
    }

    pub(crate) fn failing(fault: fn() -> Error) -> Self {
        Self::with_reply(move |_| Err(fault()))
    }

    /// Echoes the request body back with a 200.
    pub(crate) fn echoing() -> Self {
        Self::with_reply(|request| {
            Ok(Response::new(
                200,
                HashMap::new(),
                request.body().cloned().unwrap_or_default(),
            ))
        })
    }

    fn with_reply(
        reply: impl Fn(&Request<Bytes>) -> Result<Response<Bytes>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: "default",
            injected: HashMap::new(),
            reply: Arc::new(reply),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub(crate) fn injected(&self) -> &HashMap<String, String> {
        &self.injected
    }

    pub(crate) fn sent(&self) -> Vec<Sent> {
        self.sent.lock().expect("lock").clone()
    }
}

impl HttpClient for FakeTransport {
    async fn execute(&self, mut request: Request<Bytes>) -> Result<Response<Bytes>> {
        for (name, value) in &self.injected {
            request.set_header(name.as_str(), value.as_str());
        }

        let reply = (self.reply)(&request);
        self.sent.lock().expect("lock").push(Sent {
            transport: self.name,
            method: request.method(),
            url: request.url().to_string(),
            headers: request.headers().clone(),
            body: request.body().cloned(),
        });
        reply
    }
}

impl Transport for FakeTransport {
    fn with_headers(&self, headers: HashMap<String, String>) -> Self {
        let mut layered = self.clone();
        layered.injected.extend(headers);
        layered
    }
}
