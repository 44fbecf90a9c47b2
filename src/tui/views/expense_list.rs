//! Expense list view
//!
//! One row per record in server order: vendor, date, total, the nested line
//! items and a details affordance. Rows fade and slide in as they enter.

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::{
    date_text, line_item_amount, line_item_description, money_text, vendor_text, PLACEHOLDER,
};
use crate::tui::app::App;
use crate::tui::transition::RowFrame;

use super::spinner_glyph;

/// Render the expense panel
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    app.hit_map.rows.clear();

    let block = Block::default()
        .title(panel_title(app))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.view.is_loading() {
        let text = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{} ", spinner_glyph(app.spinner_frame)),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled("Loading expenses…", Style::default().fg(Color::DarkGray)),
        ]))
        .block(block);
        frame.render_widget(text, area);
        return;
    }

    if app.view.shows_empty_state() {
        let text = Paragraph::new("No expenses found.")
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    render_table(frame, app, area, block);
}

fn panel_title(app: &App) -> Line<'static> {
    let mut spans = vec![Span::styled(
        " Expenses ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if app.view.is_loading() {
        spans.push(Span::styled(
            format!("{} ", spinner_glyph(app.spinner_frame)),
            Style::default().fg(Color::Cyan),
        ));
    } else if !app.view.records().is_empty() {
        spans.push(Span::styled(
            format!("({}) ", app.view.records().len()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Line::from(spans)
}

fn render_table(frame: &mut Frame, app: &mut App, area: Rect, block: Block) {
    let now = Instant::now();
    let settings = app.settings;
    let symbol = settings.currency_symbol.as_str();
    let frames = app.transitions.frames(now);

    let widths = [
        Constraint::Min(14),    // Vendor
        Constraint::Length(10), // Date
        Constraint::Length(12), // Total
        Constraint::Min(24),    // Line items
        Constraint::Length(9),  // Details
    ];

    let header = Row::new(vec![
        Cell::from("Vendor"),
        Cell::from("Date"),
        Cell::from("Total"),
        Cell::from("Line Items"),
        Cell::from(""),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
    .height(1);

    // Borders and the header line; a taller row would blank the table
    let max_row_height = area.height.saturating_sub(3).max(1);
    let rows: Vec<Row> = frames
        .iter()
        .map(|row| build_row(row, symbol, max_row_height))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let selected = app.transitions.position_of(app.cursor);
    let hitboxes = row_hitboxes(&frames, area, selected, app.list_offset, max_row_height);

    let mut state = TableState::default()
        .with_offset(app.list_offset)
        .with_selected(selected);

    frame.render_stateful_widget(table, area, &mut state);
    app.list_offset = state.offset();
    app.hit_map.rows = hitboxes;
}

/// Build a table row, faded and offset according to its transition
///
/// Rows taller than `max_height` list their first items and a `+N more`
/// line; the detail overlay has the full list.
fn build_row<'a>(row: &RowFrame<'a>, symbol: &str, max_height: u16) -> Row<'a> {
    let record = row.record;
    let items = record.line_items();
    let height = row_height(row, max_height);

    let line_items = if items.is_empty() {
        Text::from(Span::styled(
            PLACEHOLDER,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        let shown = if items.len() > height as usize {
            height as usize - 1
        } else {
            items.len()
        };
        let mut lines: Vec<Line> = items[..shown]
            .iter()
            .map(|item| {
                Line::from(vec![
                    Span::styled(
                        line_item_description(item),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" "),
                    Span::styled(
                        line_item_amount(item, symbol),
                        Style::default().fg(Color::Cyan),
                    ),
                ])
            })
            .collect();
        if shown < items.len() {
            lines.push(Line::from(Span::styled(
                format!("+{} more", items.len() - shown),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }
        Text::from(lines)
    };

    let details = if row.is_exiting() {
        Cell::from("")
    } else {
        Cell::from("[Details]").style(
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        )
    };

    Row::new(vec![
        Cell::from(vendor_text(record)).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(date_text(record)),
        Cell::from(money_text(&record.total, symbol)),
        Cell::from(line_items),
        details,
    ])
    .height(height)
    .top_margin(row_offset(row))
    .style(fade_style(row.visibility))
}

/// One line per line item, at least one, at most `max_height`
fn row_height(row: &RowFrame, max_height: u16) -> u16 {
    let items = row.record.line_items().len().clamp(1, u16::MAX as usize) as u16;
    items.min(max_height.max(1))
}

/// Rows start one line low and settle into place halfway through
fn row_offset(row: &RowFrame) -> u16 {
    if row.visibility < 0.5 {
        1
    } else {
        0
    }
}

/// Terminal rendition of opacity
fn fade_style(visibility: f32) -> Style {
    if visibility < 0.34 {
        Style::default().fg(Color::DarkGray)
    } else if visibility < 0.67 {
        Style::default().fg(Color::Gray)
    } else {
        Style::default()
    }
}

/// Screen areas of the visible, clickable rows
///
/// Mirrors the table's own layout: one border line, one header line, then
/// the rows `visible_rows` picks, each shifted down by its top margin. The
/// last row may be clipped by the border.
fn row_hitboxes(
    frames: &[RowFrame],
    area: Rect,
    selected: Option<usize>,
    offset: usize,
    max_row_height: u16,
) -> Vec<(Rect, usize)> {
    let inner = Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    );
    let rows_area = Rect::new(
        inner.x,
        inner.y.saturating_add(1),
        inner.width,
        inner.height.saturating_sub(1),
    );

    let sizes: Vec<(u16, u16)> = frames
        .iter()
        .map(|row| (row_offset(row), row_height(row, max_row_height)))
        .collect();
    let (start, end) = visible_rows(&sizes, selected, offset, rows_area.height);

    let mut y = rows_area.y;
    let mut hitboxes = Vec::new();
    for (row, (margin, height)) in frames[start..end].iter().zip(&sizes[start..end]) {
        if let Some(index) = row.index {
            let hitbox = Rect::new(rows_area.x, y.saturating_add(*margin), rows_area.width, *height)
                .intersection(rows_area);
            if !hitbox.is_empty() {
                hitboxes.push((hitbox, index));
            }
        }
        y = y.saturating_add(*margin).saturating_add(*height);
    }

    hitboxes
}

/// Range of rows the table draws, given `(top_margin, height)` per row
///
/// Same rule as ratatui's `Table`: starting at `offset`, a row fits while
/// the height used so far plus its own height (margin excluded) stays within
/// `max_height`; then the window slides until `selected` is inside it.
fn visible_rows(
    sizes: &[(u16, u16)],
    selected: Option<usize>,
    offset: usize,
    max_height: u16,
) -> (usize, usize) {
    if sizes.is_empty() {
        return (0, 0);
    }
    let with_margin = |i: usize| sizes[i].0.saturating_add(sizes[i].1);

    let offset = offset.min(sizes.len() - 1);
    let mut start = offset;
    let mut end = offset;
    let mut height: u16 = 0;
    for &(margin, row_height) in &sizes[offset..] {
        if height.saturating_add(row_height) > max_height {
            break;
        }
        height = height.saturating_add(margin).saturating_add(row_height);
        end += 1;
    }

    let selected = selected.unwrap_or(0).min(sizes.len() - 1);
    while selected >= end {
        height = height.saturating_add(with_margin(end));
        end += 1;
        while height > max_height {
            height = height.saturating_sub(with_margin(start));
            start += 1;
        }
    }
    while selected < start {
        start -= 1;
        height = height.saturating_add(with_margin(start));
        while height > max_height {
            end -= 1;
            height = height.saturating_sub(with_margin(end));
        }
    }

    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::error::ViewerError;
    use crate::fetch::decode_expenses;
    use crate::tui::views::test_support::draw;

    fn settled_settings() -> Settings {
        Settings {
            transition_ms: 0,
            ..Settings::default()
        }
    }

    #[test]
    fn test_loading_shows_indicator_only() {
        let settings = settled_settings();
        let mut app = App::new(&settings, "test");

        let screen = draw(&mut app, 100, 20);
        assert!(screen.contains("Loading expenses…"));
        assert!(!screen.contains("Vendor"));
        assert!(app.hit_map.rows.is_empty());
    }

    #[test]
    fn test_rows_in_response_order() {
        let settings = settled_settings();
        let mut app = App::new(&settings, "test");
        let records = decode_expenses(
            r#"[{"ExpenseId":"1","Vendor":"Zeta Foods"},
                {"ExpenseId":"2","Vendor":"Alpha Hardware"},
                {"ExpenseId":"3","Vendor":"Midway Gas"}]"#,
        )
        .unwrap();
        app.on_fetch(Ok(records), Instant::now());

        let screen = draw(&mut app, 100, 20);
        let zeta = screen.find("Zeta Foods").unwrap();
        let alpha = screen.find("Alpha Hardware").unwrap();
        let midway = screen.find("Midway Gas").unwrap();
        assert!(zeta < alpha && alpha < midway);
        assert!(!app.view.is_loading());
        assert_eq!(app.hit_map.rows.len(), 3);
        assert_eq!(screen.matches("[Details]").count(), 3);
    }

    #[test]
    fn test_acme_row() {
        let settings = settled_settings();
        let mut app = App::new(&settings, "test");
        let records = decode_expenses(
            r#"[{"Vendor":"Acme","Total":"12.5","LineItems":[{"Description":"Pens","Amount":"12.50"}]}]"#,
        )
        .unwrap();
        app.on_fetch(Ok(records), Instant::now());

        let screen = draw(&mut app, 100, 20);
        assert!(screen.contains("Acme"));
        assert!(screen.contains("$12.50"));
        assert!(screen.contains("Pens $12.50"));
    }

    #[test]
    fn test_missing_fields_render_placeholders() {
        let settings = settled_settings();
        let mut app = App::new(&settings, "test");
        app.on_fetch(Ok(decode_expenses(r#"[{"Total":"not-a-number"}]"#).unwrap()), Instant::now());

        let screen = draw(&mut app, 100, 20);
        let row = screen.lines().find(|line| line.contains("$NaN")).unwrap();
        assert_eq!(row.matches(PLACEHOLDER).count(), 3);
    }

    #[test]
    fn test_empty_collection_shows_placeholder() {
        let settings = settled_settings();
        let mut app = App::new(&settings, "test");
        app.on_fetch(Ok(Vec::new()), Instant::now());

        let screen = draw(&mut app, 100, 20);
        assert!(screen.contains("No expenses found."));
        assert!(!screen.contains("Line Items"));
    }

    #[test]
    fn test_failed_fetch_shows_placeholder() {
        let settings = settled_settings();
        let mut app = App::new(&settings, "test");
        app.on_fetch(Err(ViewerError::Transport("connection refused".into())), Instant::now());

        let screen = draw(&mut app, 100, 20);
        assert!(screen.contains("No expenses found."));
        assert!(!screen.contains("Loading expenses"));
    }

    #[test]
    fn test_multi_line_rows_have_taller_hitboxes() {
        let settings = settled_settings();
        let mut app = App::new(&settings, "test");
        let records = decode_expenses(
            r#"[{"Vendor":"A","LineItems":[{"Description":"x","Amount":1},{"Description":"y","Amount":2}]},
                {"Vendor":"B"}]"#,
        )
        .unwrap();
        app.on_fetch(Ok(records), Instant::now());

        draw(&mut app, 100, 20);
        let rows = &app.hit_map.rows;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0.height, 2);
        assert_eq!(rows[1].0.y, rows[0].0.y + 2);
        assert_eq!(rows[1].1, 1);
    }

    #[test]
    fn test_entering_rows_are_offset() {
        let settings = Settings::default();
        let mut app = App::new(&settings, "test");
        let now = Instant::now();
        app.on_fetch(Ok(decode_expenses(r#"[{"Vendor":"A"}]"#).unwrap()), now);

        let frames = app.transitions.frames(now);
        assert_eq!(row_offset(&frames[0]), 1);
        assert_eq!(fade_style(frames[0].visibility).fg, Some(Color::DarkGray));

        let settled = app.transitions.frames(now + settings.transition_duration());
        assert_eq!(row_offset(&settled[0]), 0);
        assert_eq!(fade_style(settled[0].visibility), Style::default());
    }

    fn big_and_small() -> String {
        let items: Vec<String> = (1..=25)
            .map(|n| format!(r#"{{"Description":"Item {}","Amount":1}}"#, n))
            .collect();
        format!(
            r#"[{{"Vendor":"BigMart","LineItems":[{}]}},{{"Vendor":"SmallShop"}}]"#,
            items.join(",")
        )
    }

    #[test]
    fn test_tall_row_is_capped_to_the_panel() {
        let settings = settled_settings();
        let mut app = App::new(&settings, "test");
        app.on_fetch(Ok(decode_expenses(&big_and_small()).unwrap()), Instant::now());

        // 20-line panel: two borders and the header leave 17 lines for rows
        let screen = draw(&mut app, 100, 24);
        assert!(screen.contains("BigMart"));
        assert!(screen.contains("Item 16"));
        assert!(!screen.contains("Item 17"));
        assert!(screen.contains("+9 more"));
        assert_eq!(app.hit_map.rows.len(), 1);
        assert_eq!(app.hit_map.rows[0].0.height, 17);

        app.move_down();
        let screen = draw(&mut app, 100, 24);
        assert!(screen.contains("SmallShop"));
        assert!(!screen.contains("BigMart"));
        assert_eq!(app.hit_map.rows.len(), 1);
        assert_eq!(app.hit_map.rows[0].1, 1);
    }

    #[test]
    fn test_entering_rows_clipped_at_the_bottom() {
        let settings = Settings {
            transition_ms: 60_000,
            ..Settings::default()
        };
        let mut app = App::new(&settings, "test");
        let body: Vec<String> = (0..10)
            .map(|n| format!(r#"{{"ExpenseId":"{}","Vendor":"V{}"}}"#, n, n))
            .collect();
        app.on_fetch(
            Ok(decode_expenses(&format!("[{}]", body.join(","))).unwrap()),
            Instant::now(),
        );

        draw(&mut app, 100, 24);
        let rows = &app.hit_map.rows;
        // Each row sits one line below its slot; the ninth lands on the border
        assert_eq!(rows.len(), 8);
        let first = rows[0].0;
        assert_eq!(rows[7].0.y, first.y + 14);
        assert!(rows.iter().all(|(rect, _)| rect.height == 1));
    }

    #[test]
    fn test_visible_rows_follow_the_selection() {
        // Fit check ignores the top margin of the row being placed
        assert_eq!(visible_rows(&[(1, 1), (1, 1), (1, 1)], None, 0, 4), (0, 2));
        assert_eq!(visible_rows(&[(1, 1), (1, 1)], None, 0, 3), (0, 2));

        // Selecting past the end drops the tall first row
        let sizes = [(0, 3), (0, 1), (0, 1), (0, 1)];
        assert_eq!(visible_rows(&sizes, Some(2), 0, 4), (1, 3));
        assert_eq!(visible_rows(&sizes, Some(0), 2, 4), (0, 2));
        assert_eq!(visible_rows(&[], Some(0), 0, 4), (0, 0));
    }
}
