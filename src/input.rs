//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] actions.  Adding a new keybinding is
//! a single match arm in [`handle_key_event`].
//!
//! ## For contributors
//!
//! To add a new keybinding:
//!
//! 1. Add a method on [`App`] for the action (if one doesn't exist).
//! 2. Add a `KeyCode` match arm in [`handle_key_event`] that calls it.
//! 3. Update the help text in [`crate::ui`]'s status bar.
//! 4. Update the keybindings table in `README.md`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::App;

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.  Selection moves double
/// as visibility reports, so scrolling with the keyboard is what pulls new
/// pages in.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crossterm::event::{KeyEventState, KeyModifiers};

    use super::*;
    use crate::catalog::{FetchDispatch, Page, Product};

    #[derive(Clone, Default)]
    struct RecordingDispatch {
        requested: Rc<RefCell<Vec<u32>>>,
    }

    impl FetchDispatch for RecordingDispatch {
        fn request(&mut self, page_number: u32) {
            self.requested.borrow_mut().push(page_number);
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    fn loaded_app() -> App {
        let mut app = App::new(RecordingDispatch::default());
        app.load_initial();
        app.on_page(Ok(Page {
            page: 1,
            products: (1..=3u64)
                .map(|id| Product {
                    id,
                    title: format!("p{id}"),
                    price: 1,
                    discounted_price: None,
                    currency: "KRW".to_string(),
                    stock: 1,
                    descriptions: None,
                    thumbnails: Vec::new(),
                    registration_date: None,
                })
                .collect(),
        }));
        app
    }

    #[test]
    fn q_requests_quit() {
        let mut app = loaded_app();
        handle_key_event(&mut app, press(KeyCode::Char('q')));
        assert!(app.quit);
    }

    #[test]
    fn arrows_move_the_selection() {
        let mut app = loaded_app();

        handle_key_event(&mut app, press(KeyCode::Down));
        assert_eq!(app.list_state.selected(), Some(0));

        handle_key_event(&mut app, press(KeyCode::Down));
        assert_eq!(app.list_state.selected(), Some(1));

        handle_key_event(&mut app, press(KeyCode::Up));
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn home_and_end_jump() {
        let mut app = loaded_app();

        handle_key_event(&mut app, press(KeyCode::End));
        assert_eq!(app.list_state.selected(), Some(2));

        handle_key_event(&mut app, press(KeyCode::Home));
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = loaded_app();
        handle_key_event(&mut app, release(KeyCode::Char('q')));
        assert!(!app.quit);
    }
}
