//! marketscroll — a terminal storefront over a paged remote catalog.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐  page no.  ┌───────────┐  outcome   ┌──────────┐
//! │ catalog/  │ ◄───────── │ worker.rs │ ─────────► │  app.rs  │
//! │ (store +  │  dispatch  │ (threads) │  (channel) │ (state)  │
//! │  fetcher) │            └───────────┘            └────┬─────┘
//! └───────────┘                                          │ draw()
//!      ▲              handle_key_event()            ┌────▼─────┐
//!      └─ visibility ──── input.rs ─────────────────│  ui.rs   │
//!                                                   └──────────┘
//! ```
//!
//! * **`catalog/`** — the product model, the page fetcher, the pagination
//!   state machine, and the near-end trigger policy.
//! * **`worker`** — background threads running the blocking fetches.
//! * **`app`** — owns all application state (store, selection, status).
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` mutations.
//! * **`main`** — wires everything together: parse args, set up the
//!   terminal, and run the event loop.

mod app;
mod catalog;
mod input;
mod ui;
mod worker;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;
use catalog::{HttpTransport, PageFetcher};

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.  This prevents the common TUI bug where a panic leaves the
/// terminal in a broken state.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.  Without this, a panic inside the event loop would leave
/// raw mode enabled and the alternate screen active.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    install_panic_hook();

    // -- parse arguments -----------------------------------------------------
    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://camp-open-market-2.herokuapp.com".into());

    // -- start background workers --------------------------------------------
    let fetcher = PageFetcher::new(HttpTransport::new(base_url));
    let (dispatch, page_rx) = worker::spawn_pages(fetcher);
    let (thumb_tx, thumb_rx) = worker::spawn_thumbs();

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new(dispatch);
    app.load_initial();

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Drain finished page fetches and thumbnail resolutions.
    //   2. Render the UI (which also reports viewport visibility).
    //   3. Poll for keyboard input (non-blocking, up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        // 1. Resolve worker messages
        while let Ok(outcome) = page_rx.try_recv() {
            for request in app.on_page(outcome) {
                let _ = thumb_tx.send(request);
            }
        }
        while let Ok(ready) = thumb_rx.try_recv() {
            app.on_thumb(ready);
        }

        // 2. Render
        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        // 3. Handle input
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.quit {
            break;
        }
    }

    // `guard` is dropped here, restoring the terminal.
    Ok(())
}
