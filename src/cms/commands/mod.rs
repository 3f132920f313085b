//! # Commands
//!
//! One module per table operation. Each exposes a `run` function that takes the
//! [`Table`](crate::table::Table) (and a storage backend where files are
//! involved) and returns a [`CmdResult`]. Commands never print; the CLI renders
//! whatever they return.
//!
//! Most of the behavioural tests live here, against in-memory tables.

use crate::format::LoadReport;
use crate::model::Record;

pub mod close;
pub mod delete;
pub mod find;
pub mod insert;
pub mod list;
pub mod open;
pub mod save;
pub mod sort;
pub mod status;
pub mod undo;
pub mod update;

pub use status::TableStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Records to display, in table order
    pub listed_records: Vec<Record>,
    /// Records created, changed or removed by the command
    pub affected_records: Vec<Record>,
    pub messages: Vec<CmdMessage>,
    pub load_report: Option<LoadReport>,
    pub status: Option<TableStatus>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_records(mut self, records: Vec<Record>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_load_report(mut self, report: LoadReport) -> Self {
        self.load_report = Some(report);
        self
    }

    pub fn with_status(mut self, status: TableStatus) -> Self {
        self.status = Some(status);
        self
    }
}
