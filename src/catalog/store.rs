//! The product list store.
//!
//! Owns everything the storefront screen knows about the catalog: the
//! growing product list, the pagination cursor, and the fetch state
//! machine.  All mutation and every notification happen on the one thread
//! that owns the store, so there is nothing to lock; the only concurrency
//! rule is the single-flight guard in [`ProductListStore::load_next`].
//!
//! State machine:
//!
//! ```text
//!            load_next            complete(non-empty page)
//!   Idle ───────────────► Loading ───────────────────────► Idle
//!    ▲                      │  │
//!    │   complete(error)    │  │  complete(empty page)
//!    └──────────────────────┘  └────────────────────────► Exhausted
//! ```
//!
//! `Exhausted` is terminal; a failed fetch returns to `Idle` with the
//! cursor untouched, so the next trigger retries the same page.

use super::fetch::FetchError;
use super::product::{Page, Product};
use super::FetchDispatch;

/// Where the store is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No fetch outstanding; `load_next` will start one.
    Idle,
    /// One fetch is in flight; `load_next` is a no-op until it resolves.
    Loading,
    /// The catalog reported its end.  Terminal.
    Exhausted,
}

type ChangeFn = Box<dyn FnMut(&[Product])>;
type ErrorFn = Box<dyn FnMut(&FetchError)>;

struct Subscriber {
    id: u64,
    on_change: ChangeFn,
    on_error: ErrorFn,
}

/// Handle returned by [`ProductListStore::subscribe`].  Pass it back to
/// [`ProductListStore::unsubscribe`] to stop receiving notifications.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription(u64);

pub struct ProductListStore {
    state: LoadState,
    /// Next page to request, 1-based.  Advances only on a successful merge.
    current_page: u32,
    /// Append-only: products arrive in page order and are never reordered,
    /// de-duplicated, or dropped.
    items: Vec<Product>,
    dispatch: Box<dyn FetchDispatch>,
    subscribers: Vec<Subscriber>,
    next_subscriber_id: u64,
}

impl ProductListStore {
    /// A fresh store: empty list, cursor at page 1, `Idle`.
    ///
    /// `dispatch` is how an issued fetch reaches the
    /// [`PageFetcher`](super::PageFetcher): in production the request
    /// channel into the worker thread, in tests a recording stub.
    pub fn new(dispatch: impl FetchDispatch + 'static) -> Self {
        Self {
            state: LoadState::Idle,
            current_page: 1,
            items: Vec::new(),
            dispatch: Box::new(dispatch),
            subscribers: Vec::new(),
            next_subscriber_id: 0,
        }
    }

    // -- the fetch cycle -----------------------------------------------------

    /// Request the next catalog page.
    ///
    /// Silent no-op while a fetch is in flight or once the catalog is
    /// exhausted, which is what makes scroll-driven triggering safe to
    /// call as often as the display layer likes.
    pub fn load_next(&mut self) {
        if self.state != LoadState::Idle {
            return;
        }
        self.state = LoadState::Loading;
        self.dispatch.request(self.current_page);
    }

    /// Resolve the in-flight fetch with the worker's outcome.
    ///
    /// Exactly one notification goes out per call: the change callback on
    /// success (including the empty page that ends the catalog), the error
    /// callback on failure.  An outcome arriving with no fetch in flight
    /// is dropped.
    pub fn complete(&mut self, result: Result<Page, FetchError>) {
        if self.state != LoadState::Loading {
            return;
        }
        match result {
            Ok(page) if page.is_last() => {
                self.state = LoadState::Exhausted;
                self.notify_change();
            }
            Ok(page) => {
                self.items.extend(page.products);
                self.current_page += 1;
                self.state = LoadState::Idle;
                self.notify_change();
            }
            Err(err) => {
                // Cursor untouched: the next load_next retries this page.
                self.state = LoadState::Idle;
                self.notify_error(&err);
            }
        }
    }

    // -- reads ---------------------------------------------------------------

    /// The products loaded so far, in arrival order.  Borrowed, not copied;
    /// the store is the only writer.
    pub fn current_items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == LoadState::Exhausted
    }

    pub fn has_more(&self) -> bool {
        !self.is_exhausted()
    }

    /// The next page number a fetch would request.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    // -- notifications -------------------------------------------------------

    /// Register a pair of callbacks: `on_change` fires with the full item
    /// slice after every completed load, `on_error` with the failure of an
    /// attempted one.  Callbacks run synchronously on the store's thread.
    pub fn subscribe(
        &mut self,
        on_change: impl FnMut(&[Product]) + 'static,
        on_error: impl FnMut(&FetchError) + 'static,
    ) -> Subscription {
        let id = self.next_subscriber_id;
        self.next_subscriber_id += 1;
        self.subscribers.push(Subscriber {
            id,
            on_change: Box::new(on_change),
            on_error: Box::new(on_error),
        });
        Subscription(id)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.subscribers.retain(|s| s.id != subscription.0);
    }

    fn notify_change(&mut self) {
        for sub in &mut self.subscribers {
            (sub.on_change)(&self.items);
        }
    }

    fn notify_error(&mut self, err: &FetchError) {
        for sub in &mut self.subscribers {
            (sub.on_error)(err);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
