use crate::commands::CmdResult;
use crate::error::Result;
use crate::table::Table;
use crate::undo::Operation;
use std::path::PathBuf;

/// A snapshot of the table's bookkeeping, available whether or not it is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStatus {
    pub is_open: bool,
    pub filename: Option<PathBuf>,
    pub records: usize,
    pub capacity: usize,
    pub pending_undo: Option<Operation>,
}

pub fn run(table: &Table) -> Result<CmdResult> {
    let status = TableStatus {
        is_open: table.is_open(),
        filename: table.filename().map(|p| p.to_path_buf()),
        records: table.len(),
        capacity: table.capacity(),
        pending_undo: table.pending_undo(),
    };
    Ok(CmdResult::default().with_status(status))
}
