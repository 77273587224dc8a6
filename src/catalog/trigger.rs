//! Near-end trigger policy.
//!
//! Decides, from scroll position alone, when the next catalog page should
//! be requested.  Pure policy with no mutable state beyond the lookahead
//! constant, so the display layer can consult it on every visibility event
//! without ceremony.

/// How many unseen items may remain below the viewport before the next
/// page is requested.
pub const DEFAULT_LOOKAHEAD: usize = 20;

/// Fixed-lookahead prefetch policy.
///
/// Advisory only: callers route a `true` answer into
/// [`ProductListStore::load_next`](super::ProductListStore::load_next),
/// whose own guards make repeated or redundant triggers harmless.
#[derive(Debug, Clone, Copy)]
pub struct NearEndTrigger {
    lookahead: usize,
}

impl NearEndTrigger {
    pub fn new(lookahead: usize) -> Self {
        Self { lookahead }
    }

    /// True when at most `lookahead` items remain after `visible_index`.
    ///
    /// An empty list never triggers; the first page is requested
    /// explicitly, not by scrolling.  An index at or past the end of the
    /// loaded data (the viewport outran the catalog) triggers immediately.
    pub fn should_load_more(&self, visible_index: usize, total_item_count: usize) -> bool {
        if total_item_count == 0 {
            return false;
        }
        let remaining = total_item_count.saturating_sub(visible_index + 1);
        remaining <= self.lookahead
    }
}

impl Default for NearEndTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKAHEAD)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_inside_the_lookahead_window() {
        let trigger = NearEndTrigger::default();
        assert!(trigger.should_load_more(79, 100));
        assert!(trigger.should_load_more(99, 100));
    }

    #[test]
    fn stays_quiet_outside_the_window() {
        let trigger = NearEndTrigger::default();
        assert!(!trigger.should_load_more(75, 100));
        assert!(!trigger.should_load_more(0, 100));
    }

    #[test]
    fn exact_boundary() {
        // 21 items remain after index 78: one past the window.
        let trigger = NearEndTrigger::default();
        assert!(!trigger.should_load_more(78, 100));
        assert!(trigger.should_load_more(79, 100));
    }

    #[test]
    fn empty_list_never_fires() {
        let trigger = NearEndTrigger::default();
        assert!(!trigger.should_load_more(0, 0));
        assert!(!trigger.should_load_more(50, 0));
    }

    #[test]
    fn index_beyond_loaded_data_fires_immediately() {
        let trigger = NearEndTrigger::new(0);
        assert!(trigger.should_load_more(10, 10));
        assert!(trigger.should_load_more(500, 10));
    }

    #[test]
    fn custom_lookahead_is_respected() {
        let trigger = NearEndTrigger::new(2);
        assert!(!trigger.should_load_more(6, 10));
        assert!(trigger.should_load_more(7, 10));
        assert!(trigger.should_load_more(9, 10));
    }

    #[test]
    fn short_first_page_triggers_at_once() {
        // Fewer items than the lookahead: any visible row asks for more.
        let trigger = NearEndTrigger::default();
        assert!(trigger.should_load_more(0, 10));
    }
}
