//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use tracing::{debug, info};

use crate::config::Settings;
use crate::fetch::{spawn_fetch, ExpenseSource};

use super::app::{App, ViewState};
use super::event::{Event, EventHandler};
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal(mouse: bool) -> Result<Tui> {
    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic info
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Leave raw mode, the alternate screen and mouse capture
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI application against `source`
pub fn run_tui<S: ExpenseSource>(settings: &Settings, source: S) -> Result<()> {
    let mut terminal = init_terminal(settings.mouse_enabled)?;
    let result = run_app(&mut terminal, settings, source);
    // Restore even when the loop failed
    let restored = restore_terminal();
    result.and(restored)
}

/// Event loop fed by the terminal reader
pub fn run_app<B: Backend, S: ExpenseSource>(
    terminal: &mut Terminal<B>,
    settings: &Settings,
    source: S,
) -> Result<()> {
    let events = EventHandler::new(settings.tick_rate());
    run_app_with_events(terminal, settings, source, events)?;
    Ok(())
}

/// Event loop: start the fetch, then draw and dispatch until quit
///
/// Also stops when every producer has gone away. Returns the final view.
pub fn run_app_with_events<B: Backend, S: ExpenseSource>(
    terminal: &mut Terminal<B>,
    settings: &Settings,
    source: S,
    events: EventHandler,
) -> Result<ViewState> {
    let label = source.describe();
    let mut app = App::new(settings, label);

    let (sender, receiver) = events.into_parts();
    spawn_fetch(source, move |outcome| {
        sender.send(Event::ExpensesLoaded(outcome)).is_ok()
    });

    loop {
        terminal.draw(|frame| {
            super::views::render(frame, &mut app);
        })?;

        let Ok(event) = receiver.recv() else {
            debug!("event queue closed");
            break;
        };
        handle_event(&mut app, event)?;

        if app.should_quit {
            break;
        }
    }

    info!("viewer closed");
    Ok(app.view)
}
