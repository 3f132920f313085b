use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CmsError, Result};
use crate::model::{Field, RecordDraft};
use crate::table::Table;
use crate::validation::{validate_id, validate_record};

/// Validates a draft and appends it to the table.
///
/// Checks run in a fixed order: open, capacity, id (format then uniqueness),
/// then the remaining fields. The table is untouched unless all of them pass.
pub fn run(table: &mut Table, draft: &RecordDraft) -> Result<CmdResult> {
    table.ensure_open()?;
    if table.is_full() {
        return Err(CmsError::Full {
            capacity: table.capacity(),
        });
    }
    let id = validate_id(&draft.id).map_err(|e| CmsError::invalid(Field::Id, e))?;
    if table.contains(id) {
        return Err(CmsError::DuplicateId(id));
    }

    let record = validate_record(draft)?;
    table.insert(record.clone())?;

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "A new record with ID={} is successfully inserted",
            record.id
        )))
        .with_affected_records(vec![record]))
}
