//! Dialog modules for the TUI
//!
//! Overlays drawn on top of the expense list

pub mod detail;
pub mod help;
