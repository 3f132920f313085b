//! # The Record Table
//!
//! [`Table`] is the in-memory store: an ordered, capacity-bounded sequence of
//! [`Record`]s plus the open flag, the associated filename and the undo slot.
//!
//! ## Invariants
//!
//! - ids are pairwise distinct
//! - `len() <= capacity()`
//! - while closed, every operation except `open` and `close` fails with
//!   [`CmsError::NotOpen`], before any other check
//!
//! The table is an owned value. Callers that share it across threads must
//! serialize access to the whole table themselves; no operation here is atomic
//! across the check, checkpoint and mutate steps.
//!
//! Mutations take typed, already-validated values. Turning raw strings into
//! those values is the job of [`crate::validation`] and the command layer.

use crate::error::{CmsError, Result};
use crate::model::{Record, StudentId};
use crate::undo::{Operation, UndoSlot};
use crate::validation::FieldValue;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Hard ceiling on the number of records a table may hold.
pub const MAX_RECORDS: usize = 1000;

#[derive(Debug, Clone)]
pub struct Table {
    records: Vec<Record>,
    capacity: usize,
    is_open: bool,
    filename: Option<PathBuf>,
    undo: UndoSlot,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Self::with_capacity(MAX_RECORDS)
    }

    /// Creates a closed, empty table. Capacity is clamped to `1..=MAX_RECORDS`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            capacity: capacity.clamp(1, MAX_RECORDS),
            is_open: false,
            filename: None,
            undo: UndoSlot::Empty,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, filename: PathBuf) {
        self.filename = Some(filename);
    }

    pub fn ensure_open(&self) -> Result<()> {
        if self.is_open {
            Ok(())
        } else {
            Err(CmsError::NotOpen)
        }
    }

    /// Replaces the contents with `records` and marks the table open.
    pub fn open(&mut self, records: Vec<Record>, filename: Option<PathBuf>) -> Result<()> {
        if self.is_open {
            return Err(CmsError::AlreadyOpen);
        }
        if records.len() > self.capacity {
            return Err(CmsError::Full {
                capacity: self.capacity,
            });
        }
        let mut seen = HashSet::with_capacity(records.len());
        if let Some(dup) = records.iter().find(|r| !seen.insert(r.id)) {
            return Err(CmsError::DuplicateId(dup.id));
        }

        self.records = records;
        self.filename = filename;
        self.undo.clear();
        self.is_open = true;
        log::info!("Opened table with {} records", self.records.len());
        Ok(())
    }

    /// Clears the contents and marks the table closed. Always succeeds.
    pub fn close(&mut self) {
        self.records.clear();
        self.filename = None;
        self.undo.clear();
        self.is_open = false;
    }

    pub fn records(&self) -> Result<&[Record]> {
        self.ensure_open()?;
        Ok(&self.records)
    }

    pub fn position(&self, id: StudentId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    pub fn contains(&self, id: StudentId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: StudentId) -> Result<&Record> {
        self.ensure_open()?;
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or(CmsError::NotFound(id))
    }

    /// Appends a record, checkpointing first.
    pub fn insert(&mut self, record: Record) -> Result<()> {
        self.ensure_open()?;
        if self.is_full() {
            return Err(CmsError::Full {
                capacity: self.capacity,
            });
        }
        if self.contains(record.id) {
            return Err(CmsError::DuplicateId(record.id));
        }

        self.checkpoint(Operation::Insert);
        self.records.push(record);
        Ok(())
    }

    /// Changes one field of the record with `id`, checkpointing first.
    pub fn update(&mut self, id: StudentId, value: FieldValue) -> Result<&Record> {
        self.ensure_open()?;
        let index = self.position(id).ok_or(CmsError::NotFound(id))?;

        self.checkpoint(Operation::Update);
        let record = &mut self.records[index];
        match value {
            FieldValue::Name(name) => record.name = name,
            FieldValue::Programme(programme) => record.programme = programme,
            FieldValue::Mark(mark) => record.mark = mark,
        }
        Ok(record)
    }

    /// Removes the record with `id`, shifting later records left. Checkpoints first.
    pub fn remove(&mut self, id: StudentId) -> Result<Record> {
        self.ensure_open()?;
        let index = self.position(id).ok_or(CmsError::NotFound(id))?;

        self.checkpoint(Operation::Delete);
        Ok(self.records.remove(index))
    }

    /// Stable in-place reorder. Does not checkpoint.
    pub fn sort_by<F>(&mut self, compare: F) -> Result<()>
    where
        F: FnMut(&Record, &Record) -> Ordering,
    {
        self.ensure_open()?;
        self.records.sort_by(compare);
        Ok(())
    }

    /// Arms the undo slot with a copy of the current records.
    ///
    /// Mutations call this themselves. A caller that checkpoints and then
    /// abandons its change must call [`Table::discard_checkpoint`].
    pub fn checkpoint(&mut self, operation: Operation) {
        self.undo.checkpoint(&self.records, operation);
    }

    pub fn discard_checkpoint(&mut self) {
        self.undo.clear();
    }

    pub fn pending_undo(&self) -> Option<Operation> {
        self.undo.operation()
    }

    /// Restores the records saved by the last checkpoint and empties the slot.
    pub fn undo(&mut self) -> Result<Operation> {
        self.ensure_open()?;
        let snapshot = self.undo.take().ok_or(CmsError::NothingToUndo)?;
        log::debug!(
            "Undo {}: {} -> {} records",
            snapshot.operation,
            self.records.len(),
            snapshot.records.len()
        );
        self.records = snapshot.records;
        Ok(snapshot.operation)
    }

    /// Called after the records were written out; earlier state is no longer restorable.
    pub fn mark_saved(&mut self) {
        self.undo.clear();
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Mark;

    pub fn record(id: u32, name: &str, programme: &str, tenths: u16) -> Record {
        Record::new(
            StudentId::new(id).expect("fixture id out of range"),
            name.to_string(),
            programme.to_string(),
            Mark::from_tenths(tenths).expect("fixture mark out of range"),
        )
    }

    pub fn sample_records() -> Vec<Record> {
        vec![
            record(2301234, "Joshua Chen", "Software Engineering", 704),
            record(2201234, "Isaac Teo", "Computer Science", 635),
            record(2304567, "John Levoy", "Digital Supply Chain", 852),
            record(2105678, "Ann Tan", "Applied AI", 704),
        ]
    }

    pub fn open_table(records: Vec<Record>) -> Table {
        let mut table = Table::new();
        table
            .open(records, Some(PathBuf::from("fixture.txt")))
            .expect("fixture records must be valid");
        table
    }
}
