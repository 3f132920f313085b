use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CmsError, Result};
use crate::format::parse_document;
use crate::store::StorageBackend;
use crate::table::Table;
use std::path::Path;

/// Loads `path` into a closed table.
///
/// The file is read and parsed in full before the table is touched, so any
/// failure leaves the table exactly as it was.
pub fn run<B: StorageBackend>(table: &mut Table, backend: &B, path: &Path) -> Result<CmdResult> {
    if table.is_open() {
        return Err(CmsError::AlreadyOpen);
    }

    let text = backend
        .read(path)?
        .ok_or_else(|| CmsError::FileNotFound(path.to_path_buf()))?;
    let doc = parse_document(&text, table.capacity());
    if !doc.report.has_data() {
        return Err(CmsError::NoData(path.to_path_buf()));
    }

    let report = doc.report;
    table.open(doc.records, Some(path.to_path_buf()))?;
    log::info!(
        "Loaded {} of {} data lines from {}",
        report.loaded,
        report.data_lines,
        path.display()
    );

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "The database file \"{}\" is successfully opened ({} records loaded)",
        path.display(),
        report.loaded
    )));
    for warning in &report.warnings {
        result.add_message(CmdMessage::warning(warning.to_string()));
    }
    if !report.warnings.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "{} of {} data lines skipped",
            report.skipped(),
            report.data_lines
        )));
    }

    Ok(result.with_load_report(report))
}
