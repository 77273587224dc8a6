//! Background fetch workers.
//!
//! Two dedicated threads keep all blocking I/O off the render thread:
//!
//! * the **page worker** waits for page numbers, runs
//!   [`PageFetcher::fetch_page`], and sends each outcome back for the main
//!   loop to resolve into the store;
//! * the **thumbnail worker** resolves product image URLs to raw bytes,
//!   dropping failures on the floor so a missing image never blocks the
//!   list.
//!
//! Both workers stop silently when either end of their channel pair is
//! dropped, which is how the whole process shuts down: main exits, the
//! channels close, the threads return.

use std::sync::mpsc;
use std::thread;

use crate::catalog::{FetchDispatch, FetchError, Page, PageFetcher, Transport};

// ---------------------------------------------------------------------------
// Page worker
// ---------------------------------------------------------------------------

/// The store's side of the page worker: a [`FetchDispatch`] that forwards
/// requested page numbers over the worker's channel.
pub struct ChannelDispatch {
    tx: mpsc::Sender<u32>,
}

impl FetchDispatch for ChannelDispatch {
    fn request(&mut self, page_number: u32) {
        // A closed channel means the worker is gone and the process is on
        // its way out; there is nobody left to tell.
        let _ = self.tx.send(page_number);
    }
}

/// Spawn the page-fetching thread.
///
/// Returns the dispatch handle to build the store with, and the outcome
/// receiver the main loop drains on every tick.  At most one request is
/// ever queued, because the store's single-flight guard sits in front of
/// the dispatch.
pub fn spawn_pages<T>(
    fetcher: PageFetcher<T>,
) -> (ChannelDispatch, mpsc::Receiver<Result<Page, FetchError>>)
where
    T: Transport + 'static,
{
    let (req_tx, req_rx) = mpsc::channel();
    let (out_tx, out_rx) = mpsc::channel();

    thread::spawn(move || {
        for page_number in req_rx {
            let outcome = fetcher.fetch_page(page_number);
            if out_tx.send(outcome).is_err() {
                return;
            }
        }
    });

    (ChannelDispatch { tx: req_tx }, out_rx)
}

// ---------------------------------------------------------------------------
// Thumbnail worker
// ---------------------------------------------------------------------------

/// Ask the thumbnail worker to resolve one product's image URL.
pub struct ThumbRequest {
    pub product_id: u64,
    pub url: String,
}

/// Image bytes for a product whose thumbnail resolved.
pub struct ThumbReady {
    pub product_id: u64,
    pub bytes: Vec<u8>,
}

/// Spawn the thumbnail-resolving thread.
///
/// A request that fails (unreachable host, error status, truncated body)
/// produces no message at all: absence of a thumbnail is not an event the
/// list needs to hear about.
pub fn spawn_thumbs() -> (mpsc::Sender<ThumbRequest>, mpsc::Receiver<ThumbReady>) {
    let (req_tx, req_rx) = mpsc::channel::<ThumbRequest>();
    let (out_tx, out_rx) = mpsc::channel();

    thread::spawn(move || {
        let client = reqwest::blocking::Client::new();
        for req in req_rx {
            let bytes = match client
                .get(&req.url)
                .send()
                .and_then(|response| response.error_for_status())
                .and_then(|response| response.bytes())
            {
                Ok(bytes) => bytes,
                Err(_) => continue,
            };
            let ready = ThumbReady {
                product_id: req.product_id,
                bytes: bytes.to_vec(),
            };
            if out_tx.send(ready).is_err() {
                return;
            }
        }
    });

    (req_tx, out_rx)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
