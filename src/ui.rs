//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).  Rendering is also where
//! visibility is observed: after laying the list out, the bottom-most
//! visible row is reported back to the app, which is what drives
//! scroll-triggered pagination.
//!
//! ## For contributors
//!
//! * The layout is a two-row split: a scrollable product list on top and a
//!   one-line status bar at the bottom.
//! * Colours and styles are defined inline — feel free to extract them into
//!   constants or a theme struct if the palette grows.
//! * [`ratatui`] is the TUI framework; see its docs for widget details.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::catalog::{LoadState, Product};

/// Draw the complete UI for one frame.
///
/// Called once per tick from the main loop.  Delegates to helper functions
/// for each screen region.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [main_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_product_list(app, frame, main_area);
    draw_status_bar(app, frame, status_area);
}

/// One list row: date, thumbnail marker, title, price, stock.
fn product_row(app: &App, product: &Product) -> Line<'static> {
    let date_str = product
        .registered_at()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "no date".into());

    let mut spans = vec![
        Span::styled(format!("{date_str:<12}"), Style::default().fg(Color::DarkGray)),
        Span::raw(if app.has_thumbnail(product.id) { "▣ " } else { "  " }),
        Span::styled(product.title.clone(), Style::default().fg(Color::White)),
        Span::raw("  "),
    ];

    match product.discounted_price {
        // A discount strikes through the original price, as on the
        // storefront card.
        Some(discounted) => {
            spans.push(Span::styled(
                format!("{} {}", product.currency, product.price),
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::CROSSED_OUT),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!("{} {}", product.currency, discounted),
                Style::default().fg(Color::Gray),
            ));
        }
        None => {
            spans.push(Span::styled(
                format!("{} {}", product.currency, product.price),
                Style::default().fg(Color::Gray),
            ));
        }
    }

    spans.push(Span::raw("  "));
    if product.stock == 0 {
        spans.push(Span::styled("sold out", Style::default().fg(Color::Yellow)));
    } else {
        spans.push(Span::styled(
            format!("stock {}", product.stock),
            Style::default().fg(Color::Green),
        ));
    }

    Line::from(spans)
}

/// Render the scrollable product list, then report the deepest visible row.
fn draw_product_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let list_items: Vec<ListItem> = app
        .store()
        .current_items()
        .iter()
        .map(|product| ListItem::new(product_row(app, product)))
        .collect();

    let list = List::new(list_items)
        .block(
            Block::default()
                .title(" Catalog ")
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);

    // The render pass is the one place that knows which rows fit on
    // screen; everything below the viewport is still unseen.
    let viewport_rows = area.height.saturating_sub(2) as usize;
    let total = app.store().len();
    if total > 0 && viewport_rows > 0 {
        let bottom = (app.list_state.offset() + viewport_rows).min(total) - 1;
        app.notify_visibility(bottom);
    }
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::raw(" "),
        Span::styled(app.status(), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            format!("{} products", app.store().len()),
            Style::default().fg(Color::Green),
        ),
    ];

    match app.store().state() {
        LoadState::Loading => {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("fetching page {}…", app.store().current_page()),
                Style::default().fg(Color::Cyan),
            ));
        }
        LoadState::Exhausted => {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                "end of catalog",
                Style::default().fg(Color::DarkGray),
            ));
        }
        LoadState::Idle => {}
    }

    spans.push(Span::raw("  q: quit  ↑/↓: scroll  Home/End: jump"));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
