use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use ratatui::widgets::ListState;

use crate::catalog::{FetchDispatch, FetchError, NearEndTrigger, Page, ProductListStore};
use crate::worker::{ThumbReady, ThumbRequest};

pub struct App {
    /// The catalog: product list, pagination cursor, fetch state machine.
    store: ProductListStore,
    /// Decides, from scroll position, when the next page is requested.
    trigger: NearEndTrigger,
    /// List selection state for scrolling.
    pub list_state: ListState,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Status-bar text, written by the store's notification callbacks.
    status: Rc<RefCell<String>>,
    /// Byte count per product id whose thumbnail has resolved.
    thumbs: HashMap<u64, usize>,
}

impl App {
    pub fn new(dispatch: impl FetchDispatch + 'static) -> Self {
        let mut store = ProductListStore::new(dispatch);

        let status = Rc::new(RefCell::new(String::from("Loading catalog…")));
        let on_merge = Rc::clone(&status);
        let on_failure = Rc::clone(&status);
        store.subscribe(
            move |items| *on_merge.borrow_mut() = format!("{} products loaded", items.len()),
            move |err| *on_failure.borrow_mut() = format!("fetch failed: {err}"),
        );

        Self {
            store,
            trigger: NearEndTrigger::default(),
            list_state: ListState::default(),
            quit: false,
            status,
            thumbs: HashMap::new(),
        }
    }

    pub fn store(&self) -> &ProductListStore {
        &self.store
    }

    pub fn status(&self) -> String {
        self.status.borrow().clone()
    }

    /// Kick off the very first page.  Called once at startup; every later
    /// page is pulled in by scrolling.
    pub fn load_initial(&mut self) {
        self.store.load_next();
    }

    /// A row at `index` is (or just became) the deepest visible one.
    ///
    /// Consults the trigger and starts the next fetch when the viewport is
    /// close enough to the end of the loaded data.  Safe to call as often
    /// as rendering likes: the store ignores triggers while a fetch is in
    /// flight or after the catalog ended.
    pub fn notify_visibility(&mut self, index: usize) {
        if self.trigger.should_load_more(index, self.store.len()) {
            self.store.load_next();
        }
    }

    /// Resolve a finished page fetch into the store.
    ///
    /// Returns the thumbnail requests for the newly merged products so the
    /// caller can hand them to the thumbnail worker.
    pub fn on_page(&mut self, outcome: Result<Page, FetchError>) -> Vec<ThumbRequest> {
        let already_loaded = self.store.len();
        self.store.complete(outcome);

        self.store.current_items()[already_loaded..]
            .iter()
            .filter_map(|product| {
                let url = product.primary_thumbnail()?;
                Some(ThumbRequest {
                    product_id: product.id,
                    url: url.to_string(),
                })
            })
            .collect()
    }

    /// Record a resolved thumbnail.
    pub fn on_thumb(&mut self, ready: ThumbReady) {
        self.thumbs.insert(ready.product_id, ready.bytes.len());
    }

    pub fn has_thumbnail(&self, product_id: u64) -> bool {
        self.thumbs.contains_key(&product_id)
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.store.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.store.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
        self.notify_visibility(i);
    }

    pub fn select_previous(&mut self) {
        if self.store.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
        self.notify_visibility(i);
    }

    pub fn select_first(&mut self) {
        if !self.store.is_empty() {
            self.list_state.select(Some(0));
            self.notify_visibility(0);
        }
    }

    pub fn select_last(&mut self) {
        if !self.store.is_empty() {
            let i = self.store.len() - 1;
            self.list_state.select(Some(i));
            self.notify_visibility(i);
        }
    }
}
