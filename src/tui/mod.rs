//! Terminal User Interface module
//!
//! The interactive expense viewer: a list of fetched expenses with a detail
//! overlay, built on ratatui. State lives in `app`, drawing in `views` and
//! `dialogs`, input routing in `handler`.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

// Keybindings and row animation
pub mod keybindings;
pub mod transition;

pub use app::{App, ViewState};
pub use terminal::run_tui;
