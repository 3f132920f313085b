//! Read-only queries. All of them require an open, non-empty table and return
//! matches in table order.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CmsError, Result};
use crate::model::{Field, Mark, Record, StudentId};
use crate::table::Table;

fn searchable(table: &Table) -> Result<&[Record]> {
    let records = table.records()?;
    if records.is_empty() {
        return Err(CmsError::NoRecords);
    }
    Ok(records)
}

fn matches_result(matches: Vec<Record>, description: String) -> CmdResult {
    let mut result = CmdResult::default();
    if matches.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No records found with {}",
            description
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "{} record(s) found with {}",
            matches.len(),
            description
        )));
    }
    result.with_listed_records(matches)
}

pub fn by_id(table: &Table, id: StudentId) -> Result<CmdResult> {
    searchable(table)?;
    let record = table.get(id)?.clone();
    Ok(CmdResult::default().with_listed_records(vec![record]))
}

pub fn by_name(table: &Table, term: &str) -> Result<CmdResult> {
    by_substring(table, Field::Name, term, |r| r.name.as_str())
}

pub fn by_programme(table: &Table, term: &str) -> Result<CmdResult> {
    by_substring(table, Field::Programme, term, |r| r.programme.as_str())
}

pub fn by_mark(table: &Table, mark: Mark) -> Result<CmdResult> {
    let matches = searchable(table)?
        .iter()
        .filter(|r| r.mark == mark)
        .cloned()
        .collect();
    Ok(matches_result(matches, format!("mark {}", mark)))
}

/// Case-insensitive substring match. An empty term is a usage error, not a
/// match-everything query.
fn by_substring<F>(table: &Table, field: Field, term: &str, value: F) -> Result<CmdResult>
where
    F: Fn(&Record) -> &str,
{
    let records = searchable(table)?;
    let term = term.trim();
    if term.is_empty() {
        return Err(CmsError::EmptyQuery(field));
    }

    let needle = term.to_lowercase();
    let matches = records
        .iter()
        .filter(|r| value(r).to_lowercase().contains(&needle))
        .cloned()
        .collect();
    Ok(matches_result(
        matches,
        format!("{} containing \"{}\"", field, term),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::fixtures::{open_table, sample_records};

    fn ids(result: &CmdResult) -> Vec<u32> {
        result.listed_records.iter().map(|r| r.id.value()).collect()
    }

    #[test]
    fn by_id_exact() {
        let table = open_table(sample_records());
        let result = by_id(&table, StudentId::new(2304567).unwrap()).unwrap();
        assert_eq!(ids(&result), vec![2304567]);

        let missing = by_id(&table, StudentId::new(1).unwrap());
        assert!(matches!(missing, Err(CmsError::NotFound(_))));
    }

    #[test]
    fn by_name_is_case_insensitive_and_ordered() {
        let table = open_table(sample_records());
        let result = by_name(&table, "JO").unwrap();
        assert_eq!(ids(&result), vec![2301234, 2304567]);
    }

    #[test]
    fn by_programme_substring() {
        let table = open_table(sample_records());
        let result = by_programme(&table, "science").unwrap();
        assert_eq!(ids(&result), vec![2201234]);

        let result = by_programme(&table, "e").unwrap();
        assert_eq!(ids(&result), vec![2301234, 2201234, 2105678]);
    }

    #[test]
    fn no_match_is_an_empty_result_not_an_error() {
        let table = open_table(sample_records());
        let result = by_name(&table, "zzz").unwrap();
        assert!(result.listed_records.is_empty());
        assert!(result.messages[0].content.starts_with("No records found"));
    }

    #[test]
    fn empty_term_is_rejected() {
        let table = open_table(sample_records());
        assert!(matches!(
            by_name(&table, "  "),
            Err(CmsError::EmptyQuery(Field::Name))
        ));
        assert!(matches!(
            by_programme(&table, ""),
            Err(CmsError::EmptyQuery(Field::Programme))
        ));
    }

    #[test]
    fn by_mark_exact_equality() {
        let table = open_table(sample_records());
        let result = by_mark(&table, Mark::from_tenths(704).unwrap()).unwrap();
        assert_eq!(ids(&result), vec![2301234, 2105678]);

        let result = by_mark(&table, Mark::from_tenths(705).unwrap()).unwrap();
        assert!(result.listed_records.is_empty());
    }

    #[test]
    fn queries_require_records() {
        let table = open_table(vec![]);
        assert!(matches!(by_name(&table, "a"), Err(CmsError::NoRecords)));

        let closed = Table::new();
        assert!(matches!(by_name(&closed, ""), Err(CmsError::NotOpen)));
    }

    #[test]
    fn queries_do_not_mutate() {
        let table = open_table(sample_records());
        by_name(&table, "a").unwrap();
        by_mark(&table, Mark::from_tenths(704).unwrap()).unwrap();
        assert_eq!(table.records().unwrap(), sample_records().as_slice());
        assert_eq!(table.pending_undo(), None);
    }
}
