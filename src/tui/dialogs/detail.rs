//! Expense detail overlay
//!
//! Full field listing for the selected record over a dimmed backdrop. Clicks
//! on the backdrop or the close button dismiss it; clicks inside the panel
//! do not.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::display::{
    category_text, created_at_text, date_text, line_item_text, money_text, receipt_path_text,
    vendor_text,
};
use crate::models::ExpenseRecord;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;

const PANEL_WIDTH: u16 = 64;
const LABEL_WIDTH: usize = 12;
const CLOSE_LABEL: &str = "[ Close ]";
const SCROLL_HINT: &str = " PgUp/PgDn to scroll ";

/// Render the detail overlay for the selected record
///
/// The panel grows with its wrapped content up to the screen height; past
/// that the content scrolls and the close button stays on the last line.
pub fn render(frame: &mut Frame, app: &mut App) {
    let Some(record) = app.view.selected_record() else {
        return;
    };

    let symbol = app.settings.currency_symbol.as_str();
    let screen = frame.area();
    let width = PANEL_WIDTH.min(screen.width);
    let content = detail_paragraph(record, symbol);
    let content_lines = line_count(&content, width.saturating_sub(2));

    // Dim everything behind the panel
    frame
        .buffer_mut()
        .set_style(screen, Style::default().fg(Color::DarkGray));

    // Borders, a spacer line and the button row around the content
    let area = centered_rect_fixed(width, content_lines.saturating_add(4), screen);
    frame.render_widget(Clear, area);

    let mut block = Block::default()
        .title(" Expense Details ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    let body = Rect {
        height: inner.height.saturating_sub(2),
        ..inner
    };
    app.detail_scroll.fit(content_lines, body.height);
    if app.detail_scroll.max > 0 {
        block = block.title_bottom(Line::from(SCROLL_HINT).right_aligned());
    }

    frame.render_widget(block, area);
    frame.render_widget(content.scroll((app.detail_scroll.offset, 0)), body);

    let button = close_button_area(area);
    frame.render_widget(
        Paragraph::new(Span::styled(
            CLOSE_LABEL,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        button,
    );

    app.hit_map.detail_panel = Some(area);
    app.hit_map.close_button = Some(button);
}

fn detail_paragraph(record: &ExpenseRecord, symbol: &str) -> Paragraph<'static> {
    Paragraph::new(detail_lines(record, symbol)).wrap(Wrap { trim: false })
}

/// Lines the paragraph occupies once wrapped to `width`
fn line_count(paragraph: &Paragraph, width: u16) -> u16 {
    paragraph.line_count(width).min(u16::MAX as usize) as u16
}

fn detail_lines(record: &ExpenseRecord, symbol: &str) -> Vec<Line<'static>> {
    let mut lines = vec![
        field_line("Vendor", vendor_text(record)),
        field_line("Date", date_text(record)),
        field_line("Total", money_text(&record.total, symbol)),
        field_line("Category", category_text(record)),
        field_line("Receipt", receipt_path_text(record)),
        field_line("Created At", created_at_text(record)),
        Line::from(""),
        Line::from(Span::styled(
            "Line Items",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let items = record.line_items();
    if items.is_empty() {
        lines.push(Line::from(Span::styled(
            "  None",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    } else {
        lines.extend(items.iter().map(|item| {
            Line::from(vec![
                Span::styled("  • ", Style::default().fg(Color::Cyan)),
                Span::raw(line_item_text(item, symbol)),
            ])
        }));
    }

    lines
}

fn field_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<width$}", format!("{}:", label), width = LABEL_WIDTH),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

/// Centered on the panel's last inner line
fn close_button_area(panel: Rect) -> Rect {
    let width = (CLOSE_LABEL.chars().count() as u16).min(panel.width);
    let x = panel.x + panel.width.saturating_sub(width) / 2;
    let y = (panel.y + panel.height).saturating_sub(2).max(panel.y);
    Rect::new(x, y, width, 1)
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::config::Settings;
    use crate::fetch::decode_expenses;
    use crate::tui::app::OverlayClick;
    use crate::tui::views::test_support::draw;

    fn app_with<'a>(settings: &'a Settings, body: &str) -> App<'a> {
        let mut app = App::new(settings, "test");
        app.on_fetch(Ok(decode_expenses(body).unwrap()), Instant::now());
        app
    }

    #[test]
    fn test_detail_shows_all_fields() {
        let settings = Settings::default();
        let mut app = app_with(
            &settings,
            r#"[{"ExpenseId":"x1","Vendor":"Acme","Date":"2024-03-05T00:00:00Z","Total":"12.5",
                "Category":"Office","ReceiptS3Path":"s3://bucket/r.jpg",
                "CreatedAt":"2024-03-05T10:11:12.345Z",
                "LineItems":[{"Description":"Pens","Amount":"12.50"}]}]"#,
        );
        app.open_detail(0);

        let screen = draw(&mut app, 100, 30);
        assert!(screen.contains("Expense Details"));
        assert!(screen.contains("Acme"));
        assert!(screen.contains("2024-03-05"));
        assert!(screen.contains("$12.50"));
        assert!(screen.contains("Office"));
        assert!(screen.contains("s3://bucket/r.jpg"));
        assert!(screen.contains("2024-03-05 10:11:12"));
        assert!(screen.contains("• Pens $12.50"));
        assert!(screen.contains(CLOSE_LABEL));
    }

    #[test]
    fn test_acme_detail_uses_placeholders() {
        let settings = Settings::default();
        let mut app = app_with(
            &settings,
            r#"[{"Vendor":"Acme","Total":"12.5","LineItems":[{"Description":"Pens","Amount":"12.50"}]}]"#,
        );
        app.open_detail(0);

        let screen = draw(&mut app, 100, 30);
        let line_with = |label: &str| {
            screen
                .lines()
                .find(|line| line.contains(label))
                .unwrap_or_default()
                .to_string()
        };
        assert!(line_with("Total:").contains("$12.50"));
        assert!(line_with("Receipt:").contains("—"));
        assert!(line_with("Created At:").contains("—"));
        assert!(screen.contains("• Pens $12.50"));
    }

    #[test]
    fn test_detail_without_line_items() {
        let settings = Settings::default();
        let mut app = app_with(&settings, r#"[{"Vendor":"Bare"}]"#);
        app.open_detail(0);

        let screen = draw(&mut app, 100, 30);
        assert!(screen.contains("None"));
    }

    #[test]
    fn test_detail_records_hit_regions() {
        let settings = Settings::default();
        let mut app = app_with(&settings, r#"[{"Vendor":"Acme"}]"#);
        app.open_detail(0);

        let screen = draw(&mut app, 100, 30);
        let panel = app.hit_map.detail_panel.unwrap();
        let button = app.hit_map.close_button.unwrap();

        assert_eq!(panel.width, PANEL_WIDTH);
        assert_eq!(panel.height, 13);
        let button_row = screen.lines().nth(button.y as usize).unwrap();
        assert!(button_row.contains(CLOSE_LABEL));

        assert_eq!(app.hit_map.overlay_click(button.x, button.y), OverlayClick::Close);
        assert_eq!(app.hit_map.overlay_click(panel.x + 1, panel.y + 1), OverlayClick::Inside);
        assert_eq!(app.hit_map.overlay_click(0, 0), OverlayClick::Backdrop);
    }

    #[test]
    fn test_no_overlay_without_selection() {
        let settings = Settings::default();
        let mut app = app_with(&settings, r#"[{"Vendor":"Acme"}]"#);

        let screen = draw(&mut app, 100, 30);
        assert!(!screen.contains("Expense Details"));
        assert!(app.hit_map.detail_panel.is_none());
    }

    #[test]
    fn test_long_receipt_path_grows_panel() {
        let long = "s3://bucket/".to_string() + &"a".repeat(120);
        let record = ExpenseRecord {
            receipt_path: Some(long),
            ..Default::default()
        };
        let plain = ExpenseRecord::default();
        assert!(
            line_count(&detail_paragraph(&record, "$"), 62)
                > line_count(&detail_paragraph(&plain, "$"), 62)
        );
    }

    fn many_items(count: usize) -> String {
        let items: Vec<String> = (1..=count)
            .map(|n| format!(r#"{{"Description":"Item {}","Amount":1}}"#, n))
            .collect();
        format!(r#"[{{"Vendor":"BigMart","LineItems":[{}]}}]"#, items.join(","))
    }

    #[test]
    fn test_long_detail_scrolls_to_last_item() {
        let settings = Settings::default();
        let mut app = app_with(&settings, &many_items(25));
        app.open_detail(0);

        let screen = draw(&mut app, 100, 24);
        assert!(screen.contains("BigMart"));
        assert!(screen.contains(CLOSE_LABEL));
        assert!(screen.contains("PgUp/PgDn to scroll"));
        assert!(!screen.contains("• Item 24"));
        assert_eq!(app.detail_scroll.offset, 0);
        assert!(app.detail_scroll.max > 0);

        while app.detail_scroll.offset < app.detail_scroll.max {
            app.detail_scroll.page_down();
        }
        let screen = draw(&mut app, 100, 24);
        assert!(screen.contains("• Item 24"));
        assert!(screen.contains("• Item 25"));
        assert!(screen.contains(CLOSE_LABEL));
        let button = app.hit_map.close_button.unwrap();
        assert_eq!(button.y, 22);
    }

    #[test]
    fn test_wrapped_vendor_keeps_last_item_visible() {
        let settings = Settings::default();
        let vendor = "Wholesale ".repeat(15);
        let body = format!(
            r#"[{{"Vendor":"{}","LineItems":[{{"Description":"First","Amount":1}},{{"Description":"Last","Amount":2}}]}}]"#,
            vendor.trim_end()
        );
        let mut app = app_with(&settings, &body);
        app.open_detail(0);

        let screen = draw(&mut app, 100, 30);
        assert!(screen.contains("• Last $2.00"));
        assert_eq!(app.detail_scroll.max, 0);
        assert!(!screen.contains("PgUp/PgDn to scroll"));
    }
}
