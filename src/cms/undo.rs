//! Single-step undo.
//!
//! The table keeps at most one snapshot. Insert, update and delete arm it with a
//! value copy of the record sequence just before they mutate; a second mutation
//! overwrites the first snapshot. Restoring consumes it, and a successful save
//! discards it. Sorting never touches it.
//!
//! ```text
//!            checkpoint(op)           checkpoint(op)
//!   Empty ─────────────────▶ Armed ◀────────────────┐
//!     ▲                        │ └──────────────────┘
//!     │   take / discard       │
//!     └────────────────────────┘
//! ```

use crate::model::Record;
use std::fmt;

/// The mutating operation that produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Insert,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::Insert => "INSERT",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        };
        f.write_str(label)
    }
}

/// A deep copy of the record sequence, labeled with the operation that took it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub records: Vec<Record>,
    pub operation: Operation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UndoSlot {
    #[default]
    Empty,
    Armed(Snapshot),
}

impl UndoSlot {
    /// Arms the slot with a copy of `records`, replacing any previous snapshot.
    pub fn checkpoint(&mut self, records: &[Record], operation: Operation) {
        log::debug!(
            "Checkpoint {} ({} records)",
            operation,
            records.len()
        );
        *self = UndoSlot::Armed(Snapshot {
            records: records.to_vec(),
            operation,
        });
    }

    /// Removes and returns the snapshot, leaving the slot empty.
    pub fn take(&mut self) -> Option<Snapshot> {
        match std::mem::take(self) {
            UndoSlot::Armed(snapshot) => Some(snapshot),
            UndoSlot::Empty => None,
        }
    }

    pub fn clear(&mut self) {
        *self = UndoSlot::Empty;
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, UndoSlot::Armed(_))
    }

    pub fn operation(&self) -> Option<Operation> {
        match self {
            UndoSlot::Armed(snapshot) => Some(snapshot.operation),
            UndoSlot::Empty => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::fixtures::record;

    #[test]
    fn starts_empty() {
        let slot = UndoSlot::default();
        assert!(!slot.is_armed());
        assert_eq!(slot.operation(), None);
    }

    #[test]
    fn checkpoint_overwrites_previous_snapshot() {
        let mut slot = UndoSlot::default();
        slot.checkpoint(&[record(1000001, "Ann", "CS", 885)], Operation::Insert);
        slot.checkpoint(&[], Operation::Delete);

        let snapshot = slot.take().unwrap();
        assert_eq!(snapshot.operation, Operation::Delete);
        assert!(snapshot.records.is_empty());
    }

    #[test]
    fn take_is_single_use() {
        let mut slot = UndoSlot::default();
        slot.checkpoint(&[record(1000001, "Ann", "CS", 885)], Operation::Update);

        assert!(slot.take().is_some());
        assert!(slot.take().is_none());
        assert!(!slot.is_armed());
    }

    #[test]
    fn snapshot_is_independent_of_live_records() {
        let mut live = vec![record(1000001, "Ann", "CS", 885)];
        let mut slot = UndoSlot::default();
        slot.checkpoint(&live, Operation::Update);

        live[0].name = "Changed".to_string();
        live.clear();

        let snapshot = slot.take().unwrap();
        assert_eq!(snapshot.records[0].name, "Ann");
    }

    #[test]
    fn operation_labels() {
        assert_eq!(Operation::Insert.to_string(), "INSERT");
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }
}
