//! In-memory fetcher used by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use bytes::Bytes;

use crate::api::Fetch;
use crate::error::{PokedexError, Result};

/// Serves canned bodies by URL; unknown URLs answer 404.
#[derive(Debug, Default)]
pub(crate) struct StubFetcher {
    routes: HashMap<String, std::result::Result<Bytes, u16>>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_body(mut self, url: &str, body: &str) -> Self {
        self.routes
            .insert(url.to_string(), Ok(Bytes::copy_from_slice(body.as_bytes())));
        self
    }

    pub(crate) fn with_status(mut self, url: &str, status: u16) -> Self {
        self.routes.insert(url.to_string(), Err(status));
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Fetch for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(url.to_string());

        match self.routes.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(PokedexError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(PokedexError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
