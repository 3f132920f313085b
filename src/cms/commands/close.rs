use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::table::Table;

/// Closes the table, discarding unsaved changes. Closing a closed table is a no-op.
pub fn run(table: &mut Table) -> Result<CmdResult> {
    if !table.is_open() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No database is open")));
    }

    let message = match table.filename() {
        Some(path) => format!("Closed \"{}\"", path.display()),
        None => "Closed the database".to_string(),
    };
    table.close();
    Ok(CmdResult::default().with_message(CmdMessage::success(message)))
}
