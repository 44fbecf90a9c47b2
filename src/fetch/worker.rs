//! One-shot background retrieval
//!
//! The fetch runs off the render loop and hands its result to a delivery
//! callback. The callback reports whether anyone was still listening; when
//! the viewer has already gone away the result is dropped untouched.

use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use super::source::ExpenseSource;
use crate::error::ViewerResult;
use crate::models::ExpenseRecord;

/// Outcome of the retrieval call
pub type FetchOutcome = ViewerResult<Vec<ExpenseRecord>>;

/// Launch the single retrieval call
///
/// `deliver` returns `false` when the owning view no longer exists.
pub fn spawn_fetch<S, F>(source: S, deliver: F) -> JoinHandle<()>
where
    S: ExpenseSource,
    F: FnOnce(FetchOutcome) -> bool + Send + 'static,
{
    thread::spawn(move || {
        let target = source.describe();
        let outcome = source.fetch();

        match &outcome {
            Ok(records) => info!(source = %target, count = records.len(), "expenses loaded"),
            Err(err) => warn!(source = %target, error = %err, "expense fetch failed"),
        }

        if !deliver(outcome) {
            debug!(source = %target, "viewer closed before fetch settled; result discarded");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewerError;
    use crate::fetch::source::StaticSource;
    use std::sync::mpsc;

    #[test]
    fn test_delivers_records() {
        let (tx, rx) = mpsc::channel();
        let source = StaticSource::new(vec![ExpenseRecord::default(), ExpenseRecord::default()]);

        spawn_fetch(source, move |outcome| tx.send(outcome).is_ok())
            .join()
            .unwrap();

        assert_eq!(rx.recv().unwrap().unwrap().len(), 2);
    }

    #[test]
    fn test_delivers_failures() {
        let (tx, rx) = mpsc::channel();
        let source = StaticSource::failing(ViewerError::Transport("refused".into()));

        spawn_fetch(source, move |outcome| tx.send(outcome).is_ok())
            .join()
            .unwrap();

        assert!(matches!(rx.recv().unwrap(), Err(ViewerError::Transport(_))));
    }

    #[test]
    fn test_late_result_is_discarded() {
        let (tx, rx) = mpsc::channel::<FetchOutcome>();
        drop(rx);

        let source = StaticSource::new(vec![ExpenseRecord::default()]);
        let (seen_tx, seen_rx) = mpsc::channel();

        spawn_fetch(source, move |outcome| {
            let accepted = tx.send(outcome).is_ok();
            let _ = seen_tx.send(accepted);
            accepted
        })
        .join()
        .unwrap();

        assert!(!seen_rx.recv().unwrap());
    }
}
