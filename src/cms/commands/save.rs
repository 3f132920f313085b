use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CmsError, Result};
use crate::format::render_records;
use crate::store::StorageBackend;
use crate::table::Table;
use std::path::{Path, PathBuf};

/// Writes the table to `path`, or to its current file when `path` is `None`.
///
/// On success the target becomes the table's file and the undo slot is
/// cleared. On failure nothing changes.
pub fn run<B: StorageBackend>(
    table: &mut Table,
    backend: &B,
    path: Option<&Path>,
) -> Result<CmdResult> {
    let records = table.records()?;
    let target: PathBuf = match path {
        Some(p) => p.to_path_buf(),
        None => table
            .filename()
            .map(Path::to_path_buf)
            .ok_or(CmsError::NoFilename)?,
    };

    let count = records.len();
    backend.write(&target, &render_records(records))?;
    log::debug!("Saved {} records to {}", count, target.display());

    let message = format!(
        "The database file \"{}\" is successfully saved ({} records)",
        target.display(),
        count
    );
    table.set_filename(target);
    table.mark_saved();
    Ok(CmdResult::default().with_message(CmdMessage::success(message)))
}
