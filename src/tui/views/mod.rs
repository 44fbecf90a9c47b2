//! TUI Views module
//!
//! Contains the expense list and the status bar, plus the header and the
//! overlay dispatch.

pub mod expense_list;
pub mod status_bar;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::app::App;
use super::dialogs;
use super::layout::AppLayout;

/// Loading spinner frames
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_glyph(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    render_header(frame, layout.header);
    expense_list::render(frame, app, layout.main);
    status_bar::render(frame, app, layout.status_bar);

    app.hit_map.detail_panel = None;
    app.hit_map.close_button = None;

    if app.view.selected_record().is_some() {
        dialogs::detail::render(frame, app);
    }

    if app.show_help {
        dialogs::help::render(frame);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "SnapTrack: Your Receipts, Instantly Organized",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Uploaded receipts, automatically extracted into expenses. Uploads happen outside this viewer.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}


#[cfg(test)]
mod tests {
    use super::test_support::draw;
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_header_is_rendered() {
        let settings = Settings::default();
        let mut app = App::new(&settings, "test");
        let screen = draw(&mut app, 120, 20);
        assert!(screen.contains("SnapTrack: Your Receipts, Instantly Organized"));
    }

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner_glyph(0), "⠋");
        assert_eq!(spinner_glyph(10), "⠋");
        assert_eq!(spinner_glyph(3), "⠸");
    }
}
