//! Page fetching: transport, decoding, and the error taxonomy.
//!
//! [`PageFetcher`] is the single entry point the rest of the application
//! uses to get a page: one transport call, one decode call, one attempt.
//! Retrying is the caller's business; in practice the store just requests
//! a failed page number again on the next trigger.
//!
//! ## For contributors — pointing at a different catalog service
//!
//! Implement [`Transport`] for whatever carries the bytes (HTTP, a fixture
//! directory, a unix socket…) and hand it to [`PageFetcher::new`].  As long
//! as the payload decodes into [`Page`], nothing else needs to change.

use thiserror::Error;

use super::product::Page;
use super::Transport;

/// Failure while carrying page bytes over the wire.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection-level failure: unreachable host, timeout, TLS trouble.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered, but not with a usable response.
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
}

/// Failure turning page bytes into a [`Page`].
#[derive(Debug, Error)]
#[error("bad payload: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// What a page fetch can fail with, tagged by cause.
///
/// The tag is all the display layer needs: transport failures read as
/// "check your connection", decode failures as "the service is misbehaving".
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    #[error("decode: {0}")]
    Decode(#[from] DecodeError),
}

// ---------------------------------------------------------------------------
// PageFetcher
// ---------------------------------------------------------------------------

/// Fetches one catalog page per call: `transport.send` then `Page::from_json`.
///
/// Holds no state besides the transport, so it can live on the worker
/// thread for the whole life of the process.
pub struct PageFetcher<T: Transport> {
    transport: T,
}

impl<T: Transport> PageFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Fetch and decode page `page_number` (1-based).
    ///
    /// Single attempt: both failure kinds propagate immediately, tagged
    /// with their cause.
    pub fn fetch_page(&self, page_number: u32) -> Result<Page, FetchError> {
        debug_assert!(page_number >= 1, "catalog pages are 1-based");
        let bytes = self.transport.send(page_number)?;
        Ok(Page::from_json(&bytes)?)
    }
}

// ---------------------------------------------------------------------------
// HTTP transport
// ---------------------------------------------------------------------------

/// The production [`Transport`]: `GET {base_url}/items/{page}` over HTTP.
///
/// Runs on the worker thread, so the blocking client is fine here; the
/// render thread never waits on it.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    /// `base_url` is the service root, without a trailing slash
    /// (e.g. `https://market.example.com`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, page_number: u32) -> Result<Vec<u8>, TransportError> {
        let url = format!("{}/items/{page_number}", self.base_url);
        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(TransportError::Status(response.status()));
        }
        Ok(response.bytes()?.to_vec())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
