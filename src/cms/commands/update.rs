use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Field, StudentId};
use crate::table::Table;
use crate::validation::validate_field;

/// Replaces one field of the record with `id`.
///
/// The record must exist before `raw` is validated. Only the targeted field
/// changes.
pub fn run(table: &mut Table, id: StudentId, field: Field, raw: &str) -> Result<CmdResult> {
    table.get(id)?;
    let value = validate_field(field, raw)?;
    let updated = table.update(id, value)?.clone();

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "The record with ID={} is successfully updated",
            id
        )))
        .with_affected_records(vec![updated]))
}
