use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::table::Table;

/// Restores the table to its state before the last insert, update or delete.
pub fn run(table: &mut Table) -> Result<CmdResult> {
    let operation = table.undo()?;
    let records = table.records()?.to_vec();
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Undid last {} ({} records restored)",
            operation,
            records.len()
        )))
        .with_listed_records(records))
}
