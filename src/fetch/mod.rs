//! Expense retrieval
//!
//! One retrieval call per viewer session, no polling and no retry.

pub mod source;
pub mod worker;

pub use source::{decode_expenses, ExpenseSource, HttpSource, StaticSource};
pub use worker::{spawn_fetch, FetchOutcome};
