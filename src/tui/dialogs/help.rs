//! Help dialog
//!
//! Lists the keyboard shortcuts straight from the keybinding table

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::keybindings::{format_keybinding, get_keybindings, KeyContext};
use crate::tui::layout::centered_rect_fixed;

const PANEL_WIDTH: u16 = 64;

/// Render the help dialog, sized to its wrapped content
pub fn render(frame: &mut Frame) {
    let screen = frame.area();
    let width = PANEL_WIDTH.min(screen.width);
    let paragraph = Paragraph::new(help_lines()).wrap(Wrap { trim: false });
    let lines = paragraph.line_count(width.saturating_sub(2));
    let height = lines.saturating_add(2).min(u16::MAX as usize) as u16;
    let area = centered_rect_fixed(width, height, screen);

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(paragraph.block(block), area);
}

fn help_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for context in [KeyContext::Global, KeyContext::List, KeyContext::Detail] {
        lines.push(Line::from(Span::styled(
            context.title(),
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Yellow),
        )));

        // Keys sharing a description go on one line
        let mut grouped: Vec<(Vec<String>, &'static str)> = Vec::new();
        for kb in get_keybindings(context) {
            match grouped.iter_mut().find(|(_, desc)| *desc == kb.description) {
                Some((keys, _)) => keys.push(format_keybinding(kb)),
                None => grouped.push((vec![format_keybinding(kb)], kb.description)),
            }
        }
        lines.extend(
            grouped
                .into_iter()
                .map(|(keys, description)| key_line(&keys.join("/"), description)),
        );
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("Mouse: ", Style::default().fg(Color::Cyan)),
        Span::raw("click a row to open it, click outside to close"),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )));

    lines
}

/// Create a formatted key line
fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
