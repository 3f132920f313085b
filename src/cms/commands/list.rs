use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::table::Table;

pub fn run(table: &Table) -> Result<CmdResult> {
    let records = table.records()?.to_vec();
    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info("No records in the database"));
    }
    Ok(result.with_listed_records(records))
}
