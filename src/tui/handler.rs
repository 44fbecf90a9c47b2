//! Event handler for the TUI
//!
//! Routes keyboard and mouse events to the appropriate handlers
//! based on the current application state.

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, warn};

use super::app::{App, OverlayClick};
use super::event::Event;
use super::keybindings::{lookup, Action, KeyContext};

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Tick => app.tick(Instant::now()),
        Event::Resize(_, _) => {}
        Event::ExpensesLoaded(outcome) => app.on_fetch(outcome, Instant::now()),
        Event::InputClosed => {
            warn!("terminal input closed; exiting");
            app.quit();
        }
    }
    Ok(())
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Any key dismisses help
    if app.show_help {
        app.close_help();
        return;
    }

    let context = if app.view.selected().is_some() {
        KeyContext::Detail
    } else {
        KeyContext::List
    };

    if let Some(action) = lookup(context, &key) {
        debug!(?action, ?context, "key action");
        apply_action(app, action);
    }
}

fn apply_action(app: &mut App, action: Action) {
    match action {
        Action::Quit => app.quit(),
        Action::Help => app.open_help(),
        Action::MoveUp => app.move_up(),
        Action::MoveDown => app.move_down(),
        Action::GoTop => app.go_top(),
        Action::GoBottom => app.go_bottom(),
        Action::OpenDetails => {
            app.open_highlighted();
        }
        Action::CloseDetails => app.close_detail(),
        Action::NextDetails => app.next_detail(),
        Action::PrevDetails => app.prev_detail(),
        Action::ScrollDetailsDown => app.detail_scroll.page_down(),
        Action::ScrollDetailsUp => app.detail_scroll.page_up(),
    }
}

/// Lines the detail overlay moves per wheel notch
const WHEEL_LINES: i32 = 3;

/// Handle a mouse event against the regions of the last frame
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    let detail_open = !app.show_help && app.view.selected().is_some();
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_click(app, mouse.column, mouse.row),
        MouseEventKind::ScrollDown if detail_open => app.detail_scroll.scroll_by(WHEEL_LINES),
        MouseEventKind::ScrollUp if detail_open => app.detail_scroll.scroll_by(-WHEEL_LINES),
        MouseEventKind::ScrollDown if !app.has_overlay() => app.move_down(),
        MouseEventKind::ScrollUp if !app.has_overlay() => app.move_up(),
        _ => {}
    }
}

fn handle_click(app: &mut App, column: u16, row: u16) {
    if app.show_help {
        app.close_help();
        return;
    }

    if app.view.selected().is_some() {
        match app.hit_map.overlay_click(column, row) {
            OverlayClick::Close | OverlayClick::Backdrop => app.close_detail(),
            OverlayClick::Inside => {}
        }
        return;
    }

    if let Some(index) = app.hit_map.row_at(column, row) {
        app.open_detail(index);
    }
}
