//! # Record File Format
//!
//! One record per line, four tab-separated fields:
//!
//! ```text
//! <id:7 digits>\t<name>\t<programme>\t<mark:one decimal>
//! ```
//!
//! The serializer writes exactly that, with no header. The loader is more
//! forgiving about what surrounds the data:
//!
//! - blank lines are skipped
//! - a line starting with a digit is data
//! - a non-digit line is a header if it has no tab, starts with `#`, or its first
//!   field is a known header keyword (`ID`, `Table Name:`, ...)
//! - any other line is data that will fail to tokenize, and is reported
//!
//! Each data line is tokenized (split on tab, exactly four fields, each trimmed)
//! and then every field is validated on its own, so each failure mode is
//! reported separately. The first occurrence of an id wins; later duplicates
//! are reported and skipped. Data lines past the table capacity are reported
//! and skipped too. Nothing here aborts a load: problems become
//! [`LoadWarning`]s in the [`LoadReport`].

use crate::model::{Field, Record, StudentId};
use crate::validation::{
    validate_id, validate_mark, validate_name, validate_programme, ValidationError,
};
use std::collections::HashSet;
use std::fmt;

pub const FIELD_SEPARATOR: char = '\t';
pub const FIELD_COUNT: usize = 4;

const HEADER_KEYWORDS: &[&str] = &["id", "student id", "database name", "authors", "table name"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Header,
    Data,
}

pub fn classify_line(line: &str) -> LineKind {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with(|c: char| c.is_ascii_digit()) {
        return LineKind::Data;
    }
    if line.starts_with('#') || !line.contains(FIELD_SEPARATOR) {
        return LineKind::Header;
    }

    let first = line
        .split(FIELD_SEPARATOR)
        .next()
        .unwrap_or_default()
        .trim()
        .trim_end_matches(':')
        .to_lowercase();
    if HEADER_KEYWORDS.contains(&first.as_str()) {
        LineKind::Header
    } else {
        LineKind::Data
    }
}

/// Why a data line was not loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadIssue {
    /// The line did not split into exactly four fields
    FieldCount(usize),
    /// A field failed validation
    Invalid {
        field: Field,
        error: ValidationError,
    },
    /// An earlier line already supplied this id
    DuplicateId(StudentId),
    /// The table was already at capacity
    OverCapacity,
}

impl fmt::Display for LoadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadIssue::FieldCount(found) => write!(
                f,
                "expected {} tab-separated fields, found {}",
                FIELD_COUNT, found
            ),
            LoadIssue::Invalid { field, error } => write!(f, "invalid {}: {}", field, error),
            LoadIssue::DuplicateId(id) => write!(f, "duplicate ID {} (first occurrence kept)", id),
            LoadIssue::OverCapacity => write!(f, "table is full"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// 1-based line number in the source file
    pub line: usize,
    pub issue: LoadIssue,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.issue)
    }
}

/// Counters and diagnostics from parsing one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_lines: usize,
    pub blank_lines: usize,
    pub header_lines: usize,
    /// Lines treated as data, whether or not they loaded
    pub data_lines: usize,
    pub loaded: usize,
    pub warnings: Vec<LoadWarning>,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.data_lines - self.loaded
    }

    pub fn has_data(&self) -> bool {
        self.data_lines > 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub records: Vec<Record>,
    pub report: LoadReport,
}

/// Splits a data line into its four trimmed fields.
pub fn tokenize(line: &str) -> Result<[&str; FIELD_COUNT], LoadIssue> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    match fields.as_slice() {
        [id, name, programme, mark] => Ok([*id, *name, *programme, *mark]),
        other => Err(LoadIssue::FieldCount(other.len())),
    }
}

pub fn parse_record(line: &str) -> Result<Record, LoadIssue> {
    let [id, name, programme, mark] = tokenize(line)?;
    let invalid = |field| move |error| LoadIssue::Invalid { field, error };

    let id = validate_id(id).map_err(invalid(Field::Id))?;
    let name = validate_name(name).map_err(invalid(Field::Name))?;
    let programme = validate_programme(programme).map_err(invalid(Field::Programme))?;
    let mark = validate_mark(mark).map_err(invalid(Field::Mark))?;
    Ok(Record::new(id, name, programme, mark))
}

/// Parses a whole file, keeping at most `capacity` records.
pub fn parse_document(text: &str, capacity: usize) -> ParsedDocument {
    let mut doc = ParsedDocument::default();
    let mut seen: HashSet<StudentId> = HashSet::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        doc.report.total_lines += 1;

        match classify_line(line) {
            LineKind::Blank => {
                doc.report.blank_lines += 1;
                continue;
            }
            LineKind::Header => {
                doc.report.header_lines += 1;
                log::debug!("Skipping header line {}: {:?}", line_no, line);
                continue;
            }
            LineKind::Data => doc.report.data_lines += 1,
        }

        let outcome = if doc.records.len() >= capacity {
            Err(LoadIssue::OverCapacity)
        } else {
            parse_record(line).and_then(|record| {
                if seen.insert(record.id) {
                    Ok(record)
                } else {
                    Err(LoadIssue::DuplicateId(record.id))
                }
            })
        };

        match outcome {
            Ok(record) => doc.records.push(record),
            Err(issue) => {
                let warning = LoadWarning {
                    line: line_no,
                    issue,
                };
                log::debug!("Skipping {}", warning);
                doc.report.warnings.push(warning);
            }
        }
    }

    doc.report.loaded = doc.records.len();
    doc
}

pub fn render_record(record: &Record) -> String {
    format!(
        "{}{sep}{}{sep}{}{sep}{}",
        record.id,
        record.name,
        record.programme,
        record.mark,
        sep = FIELD_SEPARATOR
    )
}

/// Renders records in order, one per line, each line newline-terminated.
pub fn render_records(records: &[Record]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&render_record(record));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::fixtures::{record, sample_records};

    #[test]
    fn classifies_lines() {
        assert_eq!(classify_line(""), LineKind::Blank);
        assert_eq!(classify_line("   "), LineKind::Blank);
        assert_eq!(classify_line("HEADER"), LineKind::Header);
        assert_eq!(classify_line("Table Name: StudentRecords"), LineKind::Header);
        assert_eq!(classify_line("ID\tName\tProgramme\tMark"), LineKind::Header);
        assert_eq!(classify_line("Table Name:\tStudentRecords"), LineKind::Header);
        assert_eq!(classify_line("# comment\twith tab"), LineKind::Header);
        assert_eq!(classify_line("1000001\tAnn\tCS\t88.5"), LineKind::Data);
        assert_eq!(classify_line("bad\tline"), LineKind::Data);
    }

    #[test]
    fn tokenizer_requires_four_fields() {
        assert_eq!(
            tokenize("1000001\tAnn Lee \t CS\t88.5").unwrap(),
            ["1000001", "Ann Lee", "CS", "88.5"]
        );
        assert_eq!(tokenize("bad\tline"), Err(LoadIssue::FieldCount(2)));
        assert_eq!(
            tokenize("1\t2\t3\t4\t5"),
            Err(LoadIssue::FieldCount(5))
        );
        assert_eq!(
            tokenize("1000001 Ann CS 88.5"),
            Err(LoadIssue::FieldCount(1))
        );
    }

    #[test]
    fn parse_record_reports_the_failing_field() {
        assert_eq!(
            parse_record("1000001\tAnn\tCS\t88.5").unwrap(),
            record(1000001, "Ann", "CS", 885)
        );
        assert_eq!(
            parse_record("100001\tAnn\tCS\t88.5"),
            Err(LoadIssue::Invalid {
                field: Field::Id,
                error: ValidationError::WrongLength {
                    expected: 7,
                    found: 6
                }
            })
        );
        assert_eq!(
            parse_record("1000001\tAnn\tCS\t88.55"),
            Err(LoadIssue::Invalid {
                field: Field::Mark,
                error: ValidationError::TooManyFractionDigits
            })
        );
    }

    #[test]
    fn header_blank_and_unparseable_lines() {
        let text = "HEADER\n\n1000003\tCara\tIT\t91.0\nbad\tline\n";
        let doc = parse_document(text, 1000);

        assert_eq!(doc.records, vec![record(1000003, "Cara", "IT", 910)]);
        assert_eq!(doc.report.total_lines, 4);
        assert_eq!(doc.report.header_lines, 1);
        assert_eq!(doc.report.blank_lines, 1);
        assert_eq!(doc.report.data_lines, 2);
        assert_eq!(doc.report.loaded, 1);
        assert_eq!(doc.report.skipped(), 1);
        assert_eq!(
            doc.report.warnings,
            vec![LoadWarning {
                line: 4,
                issue: LoadIssue::FieldCount(2)
            }]
        );
    }

    #[test]
    fn first_duplicate_wins() {
        let text = "1000001\tAnn\tCS\t88.5\n1000001\tBen\tCS\t72.0\n";
        let doc = parse_document(text, 1000);

        assert_eq!(doc.records.len(), 1);
        assert_eq!(doc.records[0].name, "Ann");
        assert_eq!(
            doc.report.warnings[0].issue,
            LoadIssue::DuplicateId(StudentId::new(1000001).unwrap())
        );
    }

    #[test]
    fn invalid_duplicate_does_not_shadow_a_later_valid_line() {
        let text = "1000001\tAnn1\tCS\t88.5\n1000001\tAnn\tCS\t88.5\n";
        let doc = parse_document(text, 1000);
        assert_eq!(doc.records, vec![record(1000001, "Ann", "CS", 885)]);
    }

    #[test]
    fn lines_past_capacity_are_reported() {
        let text = "1000001\tAnn\tCS\t1.0\n1000002\tBen\tCS\t2.0\n1000003\tCal\tCS\t3.0\n";
        let doc = parse_document(text, 2);

        assert_eq!(doc.records.len(), 2);
        assert_eq!(doc.report.data_lines, 3);
        assert_eq!(doc.report.warnings[0].issue, LoadIssue::OverCapacity);
        assert_eq!(doc.report.warnings[0].line, 3);
    }

    #[test]
    fn only_headers_means_no_data() {
        let doc = parse_document("Database Name: Sample-CMS\nAuthors: P7\n\n", 1000);
        assert!(!doc.report.has_data());
        assert!(doc.records.is_empty());
    }

    #[test]
    fn crlf_line_endings() {
        let doc = parse_document("ID\tName\tProgramme\tMark\r\n1000001\tAnn\tCS\t88.5\r\n", 1000);
        assert_eq!(doc.records, vec![record(1000001, "Ann", "CS", 885)]);
        assert!(doc.report.warnings.is_empty());
    }

    #[test]
    fn renders_one_tab_separated_line_per_record() {
        let rendered = render_records(&[
            record(1000001, "Ann", "CS", 885),
            record(42, "Ben Ong", "Applied AI", 700),
        ]);
        assert_eq!(
            rendered,
            "1000001\tAnn\tCS\t88.5\n0000042\tBen Ong\tApplied AI\t70.0\n"
        );
    }

    #[test]
    fn rendered_records_parse_back() {
        let records = sample_records();
        let doc = parse_document(&render_records(&records), 1000);
        assert_eq!(doc.records, records);
        assert!(doc.report.warnings.is_empty());
    }

    #[test]
    fn warning_display() {
        let warning = LoadWarning {
            line: 7,
            issue: LoadIssue::FieldCount(2),
        };
        assert_eq!(
            warning.to_string(),
            "line 7: expected 4 tab-separated fields, found 2"
        );
    }
}
