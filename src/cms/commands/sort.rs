use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Record;
use crate::table::Table;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Mark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Id => f.write_str("ID"),
            SortKey::Mark => f.write_str("mark"),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => f.write_str("ascending"),
            SortOrder::Descending => f.write_str("descending"),
        }
    }
}

fn compare(key: SortKey, a: &Record, b: &Record) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Mark => a.mark.cmp(&b.mark),
    }
}

/// Reorders the table in place. Stable, so equal marks keep their relative
/// order in both directions. Never checkpoints.
pub fn run(table: &mut Table, key: SortKey, order: SortOrder) -> Result<CmdResult> {
    table.sort_by(|a, b| match order {
        SortOrder::Ascending => compare(key, a, b),
        SortOrder::Descending => compare(key, b, a),
    })?;

    let records = table.records()?.to_vec();
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Sorted {} records by {} ({})",
            records.len(),
            key,
            order
        )))
        .with_listed_records(records))
}
