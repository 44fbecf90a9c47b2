//! Status bar view
//!
//! Shows load progress, the record count or the fetch failure, and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;

use super::spinner_glyph;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut spans = status_spans(app);

    // Key hints (right-aligned)
    let hints = key_hints(app);

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.chars().count());
    let padding = " ".repeat(padding_len.max(1));

    spans.push(Span::raw(padding));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn status_spans(app: &App) -> Vec<Span<'static>> {
    if app.view.is_loading() {
        return vec![
            Span::styled(
                format!(" {} ", spinner_glyph(app.spinner_frame)),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!("Fetching {}", app.source_label),
                Style::default().fg(Color::DarkGray),
            ),
        ];
    }

    if let Some(err) = app.view.load_error() {
        return vec![
            Span::styled(
                format!(" Could not load expenses ({})", err.summary()),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled(err.to_string(), Style::default().fg(Color::Red)),
        ];
    }

    let count = app.view.records().len();
    let noun = if count == 1 { "expense" } else { "expenses" };
    vec![
        Span::styled(
            format!(" {} {}", count, noun),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(app.source_label.clone(), Style::default().fg(Color::Cyan)),
    ]
}

fn key_hints(app: &App) -> &'static str {
    if app.show_help {
        " any key:Close "
    } else if app.view.selected().is_some() {
        " Esc:Close  j/k:Next/Prev  ?:Help "
    } else {
        " j/k:Move  Enter:Open  ?:Help  q:Quit "
    }
}
