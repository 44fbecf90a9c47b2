//! Display formatting for terminal output
//!
//! Provides the field formatters used by the TUI and the `list` command.

pub mod expense;

pub use expense::*;
