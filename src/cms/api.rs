//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for every table operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** one [`Table`] and one storage backend
//! - **Normalizes inputs**: raw strings for ids, field names and marks become
//!   typed values here, after the open check, so a closed table always reports
//!   [`CmsError::NotOpen`] first
//! - **Dispatches** to the matching command and returns its `CmdResult`
//!
//! Business logic stays in `commands/*.rs`. Nothing here prints.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `CmsApi<FsBackend>`
//! - Testing: `CmsApi<MemBackend>`
//!
//! API tests check argument normalization and dispatch. Command behaviour is
//! tested in the command modules.

use crate::commands::{self, CmdResult};
use crate::config::CmsConfig;
use crate::error::{CmsError, Result};
use crate::model::{Field, RecordDraft, StudentId};
use crate::store::StorageBackend;
use crate::table::Table;
use crate::validation::{validate_id, validate_mark};
use std::path::Path;

pub use commands::sort::{SortKey, SortOrder};

pub struct CmsApi<B: StorageBackend> {
    table: Table,
    backend: B,
}

impl<B: StorageBackend> CmsApi<B> {
    pub fn new(backend: B) -> Self {
        Self {
            table: Table::new(),
            backend,
        }
    }

    pub fn with_config(backend: B, config: &CmsConfig) -> Self {
        Self {
            table: Table::with_capacity(config.capacity),
            backend,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_open(&self) -> bool {
        self.table.is_open()
    }

    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<CmdResult> {
        commands::open::run(&mut self.table, &self.backend, path.as_ref())
    }

    pub fn close(&mut self) -> Result<CmdResult> {
        commands::close::run(&mut self.table)
    }

    pub fn list_all(&self) -> Result<CmdResult> {
        commands::list::run(&self.table)
    }

    pub fn insert(&mut self, draft: &RecordDraft) -> Result<CmdResult> {
        commands::insert::run(&mut self.table, draft)
    }

    pub fn update(&mut self, id: &str, field: &str, value: &str) -> Result<CmdResult> {
        self.table.ensure_open()?;
        let id = parse_id(id)?;
        let field: Field = field.parse()?;
        commands::update::run(&mut self.table, id, field, value)
    }

    pub fn delete(&mut self, id: &str) -> Result<CmdResult> {
        self.table.ensure_open()?;
        let id = parse_id(id)?;
        commands::delete::run(&mut self.table, id)
    }

    pub fn find_by_id(&self, id: &str) -> Result<CmdResult> {
        self.table.ensure_open()?;
        let id = parse_id(id)?;
        commands::find::by_id(&self.table, id)
    }

    pub fn find_by_name(&self, term: &str) -> Result<CmdResult> {
        commands::find::by_name(&self.table, term)
    }

    pub fn find_by_programme(&self, term: &str) -> Result<CmdResult> {
        commands::find::by_programme(&self.table, term)
    }

    pub fn find_by_mark(&self, mark: &str) -> Result<CmdResult> {
        self.table.ensure_open()?;
        let mark = validate_mark(mark.trim()).map_err(|e| CmsError::invalid(Field::Mark, e))?;
        commands::find::by_mark(&self.table, mark)
    }

    pub fn sort_by_id(&mut self, ascending: bool) -> Result<CmdResult> {
        self.sort(SortKey::Id, SortOrder::from_ascending(ascending))
    }

    pub fn sort_by_mark(&mut self, ascending: bool) -> Result<CmdResult> {
        self.sort(SortKey::Mark, SortOrder::from_ascending(ascending))
    }

    pub fn sort(&mut self, key: SortKey, order: SortOrder) -> Result<CmdResult> {
        commands::sort::run(&mut self.table, key, order)
    }

    pub fn undo(&mut self) -> Result<CmdResult> {
        commands::undo::run(&mut self.table)
    }

    /// Drops a pending undo snapshot, for callers that checkpoint and then cancel.
    pub fn discard_checkpoint(&mut self) {
        self.table.discard_checkpoint();
    }

    pub fn save(&mut self, path: Option<&Path>) -> Result<CmdResult> {
        commands::save::run(&mut self.table, &self.backend, path)
    }

    pub fn status(&self) -> Result<CmdResult> {
        commands::status::run(&self.table)
    }
}

fn parse_id(raw: &str) -> Result<StudentId> {
    validate_id(raw.trim()).map_err(|e| CmsError::invalid(Field::Id, e))
}
