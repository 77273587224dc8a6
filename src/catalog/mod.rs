//! Catalog access: model, fetching, pagination state, and trigger policy.
//!
//! This module is the data half of the application.  The display layer
//! talks to exactly three things here: [`ProductListStore`] (snapshot +
//! `load_next`), [`NearEndTrigger`] (when to call `load_next`), and the
//! notification callbacks registered through
//! [`ProductListStore::subscribe`].
//!
//! ## For contributors — swapping the backing service
//!
//! 1. Implement [`Transport`] for the new byte source (see `HttpTransport`
//!    in `fetch.rs` for the worked example).
//! 2. If the payload shape differs, adjust the serde model in `product.rs`.
//! 3. Construct the new transport in `main.rs` and hand it to
//!    [`PageFetcher::new`].
//!
//! The store, trigger, worker, and UI are all transport-agnostic.

mod fetch;
mod product;
mod store;
mod trigger;

// Re-export the public API of this module so callers can write
// `use crate::catalog::{Page, ProductListStore, NearEndTrigger};`
pub use fetch::{DecodeError, FetchError, HttpTransport, PageFetcher, TransportError};
pub use product::{Page, Product};
pub use store::{LoadState, ProductListStore, Subscription};
pub use trigger::{NearEndTrigger, DEFAULT_LOOKAHEAD};

/// Carries raw page bytes to and from the catalog service.
///
/// Implementations run on the fetch worker thread, so they must be
/// [`Send`] and are free to block.
pub trait Transport: Send {
    /// Request the payload for `page_number` (1-based).  One attempt; the
    /// caller decides whether a failed page is ever asked for again.
    fn send(&self, page_number: u32) -> Result<Vec<u8>, TransportError>;
}

/// How [`ProductListStore`] issues a fetch without blocking its thread.
///
/// The store calls [`request`](FetchDispatch::request) at most once per
/// fetch cycle (the single-flight guard sits in front of it); the
/// implementation routes the page number to whatever actually runs
/// [`PageFetcher::fetch_page`], which is the worker thread's request
/// channel in production and a recording stub in tests.
pub trait FetchDispatch {
    fn request(&mut self, page_number: u32);
}
