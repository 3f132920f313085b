use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::StudentId;
use crate::table::Table;

/// Removes the record with `id`. Confirmation is the caller's business.
pub fn run(table: &mut Table, id: StudentId) -> Result<CmdResult> {
    let removed = table.remove(id)?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "The record with ID={} is successfully deleted",
            id
        )))
        .with_affected_records(vec![removed]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::undo;
    use crate::error::CmsError;
    use crate::table::fixtures::{open_table, record, sample_records};

    fn id(value: u32) -> StudentId {
        StudentId::new(value).unwrap()
    }

    #[test]
    fn delete_then_undo_restores_order() {
        let original = vec![
            record(1000001, "Ann", "CS", 885),
            record(1000002, "Ben", "CS", 720),
        ];
        let mut table = open_table(original.clone());

        let result = run(&mut table, id(1000001)).unwrap();
        assert_eq!(result.affected_records, vec![original[0].clone()]);
        assert_eq!(table.records().unwrap(), &original[1..]);

        undo::run(&mut table).unwrap();
        assert_eq!(table.records().unwrap(), original.as_slice());
    }

    #[test]
    fn keeps_relative_order_of_the_rest() {
        let mut table = open_table(sample_records());
        run(&mut table, id(2201234)).unwrap();

        let ids: Vec<u32> = table
            .records()
            .unwrap()
            .iter()
            .map(|r| r.id.value())
            .collect();
        assert_eq!(ids, vec![2301234, 2304567, 2105678]);
    }

    #[test]
    fn missing_record() {
        let mut table = open_table(sample_records());
        let result = run(&mut table, id(1000001));
        assert!(matches!(result, Err(CmsError::NotFound(_))));
        assert_eq!(table.pending_undo(), None);
    }
}
