//! Core data models for SnapTrack
//!
//! - `ExpenseRecord`: one receipt's extracted data
//! - `LineItem`: a purchased item on that receipt
//! - `Amount`: a loosely typed monetary value with display coercion

pub mod amount;
pub mod expense;

pub use amount::Amount;
pub use expense::{ExpenseRecord, LineItem, RowKey};
