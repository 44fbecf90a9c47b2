//! Layout definitions for the TUI
//!
//! Header on top, expense panel in the middle, status bar at the bottom.

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Layout regions for the TUI
pub struct AppLayout {
    /// Title and tagline
    pub header: Rect,
    /// Expense panel
    pub main: Rect,
    pub status_bar: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let [header, main, status_bar] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        Self {
            header,
            main,
            status_bar,
        }
    }
}

/// Rect of a fixed size centered in `r`, clamped to fit
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    centered(
        r,
        Constraint::Length(width.min(r.width)),
        Constraint::Length(height.min(r.height)),
    )
}

fn centered(r: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [row] = Layout::vertical([vertical]).flex(Flex::Center).areas(r);
    let [cell] = Layout::horizontal([horizontal]).flex(Flex::Center).areas(row);
    cell
}
