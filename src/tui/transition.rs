//! Row enter/exit transitions
//!
//! Rows are matched across collection changes by `RowKey` (record id, or
//! position when the record has none). A key that appears enters; a key that
//! disappears stays on screen as a ghost row while it exits. Reordering rows
//! that have no id therefore shows up as removals plus insertions.
//!
//! Transitions only affect how rows are drawn. Selection and the detail
//! overlay always work on the current collection.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::models::{ExpenseRecord, RowKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Entering(Instant),
    Visible,
    Exiting(Instant),
}

#[derive(Debug, Clone)]
struct TrackedRow {
    key: RowKey,
    record: ExpenseRecord,
    /// Position in the current collection; `None` once the row is exiting
    index: Option<usize>,
    phase: Phase,
}

/// A row to draw this frame
#[derive(Debug, Clone, Copy)]
pub struct RowFrame<'a> {
    pub key: &'a RowKey,
    pub index: Option<usize>,
    pub record: &'a ExpenseRecord,
    /// 0.0 = offset and transparent, 1.0 = in place and fully visible
    pub visibility: f32,
}

impl RowFrame<'_> {
    pub fn is_exiting(&self) -> bool {
        self.index.is_none()
    }
}

/// Tracks which rows are entering, visible, or exiting
#[derive(Debug, Clone)]
pub struct RowTransitions {
    duration: Duration,
    rows: Vec<TrackedRow>,
}

impl RowTransitions {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            rows: Vec::new(),
        }
    }

    /// Diff `records` against the tracked rows
    pub fn sync(&mut self, records: &[ExpenseRecord], now: Instant) {
        let mut previous: HashMap<RowKey, (usize, TrackedRow)> = HashMap::new();
        let mut ghosts: Vec<(usize, TrackedRow)> = Vec::new();

        for (position, row) in std::mem::take(&mut self.rows).into_iter().enumerate() {
            if matches!(row.phase, Phase::Exiting(_)) || previous.contains_key(&row.key) {
                ghosts.push((position, exit(row, now)));
            } else {
                previous.insert(row.key.clone(), (position, row));
            }
        }

        let mut rows: Vec<TrackedRow> = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let key = record.row_key(index);
                let phase = match previous.remove(&key) {
                    Some((_, kept)) => kept.phase,
                    None => Phase::Entering(now),
                };
                TrackedRow {
                    key,
                    record: record.clone(),
                    index: Some(index),
                    phase,
                }
            })
            .collect();

        ghosts.extend(
            previous
                .into_values()
                .map(|(position, row)| (position, exit(row, now))),
        );
        ghosts.sort_by_key(|(position, _)| *position);

        for (position, ghost) in ghosts {
            let at = position.min(rows.len());
            rows.insert(at, ghost);
        }

        self.rows = rows;
    }

    /// Rows to draw, in display order
    pub fn frames(&self, now: Instant) -> Vec<RowFrame<'_>> {
        self.rows
            .iter()
            .map(|row| RowFrame {
                key: &row.key,
                index: row.index,
                record: &row.record,
                visibility: self.visibility(row.phase, now),
            })
            .collect()
    }

    /// Display position of the record at `index`
    pub fn position_of(&self, index: usize) -> Option<usize> {
        self.rows.iter().position(|row| row.index == Some(index))
    }

    /// Drop finished exits and settle finished entrances
    pub fn prune(&mut self, now: Instant) {
        let duration = self.duration;
        self.rows.retain(|row| match row.phase {
            Phase::Exiting(start) => now.saturating_duration_since(start) < duration,
            _ => true,
        });
        for row in &mut self.rows {
            if let Phase::Entering(start) = row.phase {
                if now.saturating_duration_since(start) >= duration {
                    row.phase = Phase::Visible;
                }
            }
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.rows.iter().any(|row| match row.phase {
            Phase::Entering(start) | Phase::Exiting(start) => {
                now.saturating_duration_since(start) < self.duration
            }
            Phase::Visible => false,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn progress(&self, start: Instant, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(start).as_secs_f32();
        (elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    fn visibility(&self, phase: Phase, now: Instant) -> f32 {
        match phase {
            Phase::Entering(start) => self.progress(start, now),
            Phase::Visible => 1.0,
            Phase::Exiting(start) => 1.0 - self.progress(start, now),
        }
    }
}

fn exit(mut row: TrackedRow, now: Instant) -> TrackedRow {
    if !matches!(row.phase, Phase::Exiting(_)) {
        row.phase = Phase::Exiting(now);
    }
    row.index = None;
    row
}
