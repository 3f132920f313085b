//! Field validation for student records.
//!
//! Every raw value passes through here before it can become part of a
//! [`Record`]. The rules:
//!
//! - **id**: exactly 7 ASCII digits
//! - **name**: 1-40 characters after trimming, ASCII letters and spaces only
//! - **programme**: same as name; digits are reported separately
//! - **mark**: digits with at most one decimal point and at most one digit
//!   after it, a leading digit before the point, within 0-100
//!
//! # Examples
//! ```
//! use cms::validation::{validate_id, validate_mark, validate_name};
//!
//! assert!(validate_id("2301234").is_ok());
//! assert!(validate_id("230123").is_err());
//!
//! assert!(validate_name("Ann Lee").is_ok());
//! assert!(validate_name("R2D2").is_err());
//!
//! assert_eq!(validate_mark("70.0").unwrap().tenths(), 700);
//! assert!(validate_mark("70.").is_err());
//! assert!(validate_mark(".5").is_err());
//! ```

use crate::error::{CmsError, Result};
use crate::model::{Field, Mark, Record, RecordDraft, StudentId};

pub const MAX_NAME_LENGTH: usize = 40;
pub const MAX_PROGRAMME_LENGTH: usize = 40;

/// Error type for field validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value is empty (or only spaces)
    Empty,
    /// Value does not have the exact required length
    WrongLength { expected: usize, found: usize },
    /// Value is longer than allowed
    TooLong { max: usize, found: usize },
    /// Value contains a character outside the allowed set
    InvalidCharacter(char),
    /// Value contains a digit where none are allowed
    ContainsDigit(char),
    /// Mark has more than one decimal point
    MultipleDecimalPoints,
    /// Mark has no digit before the decimal point (".5")
    MissingLeadingDigit,
    /// Mark ends with a decimal point ("70.")
    MissingFractionDigit,
    /// Mark has more than one digit after the decimal point
    TooManyFractionDigits,
    /// Mark is outside 0-100
    OutOfRange,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "value cannot be empty"),
            ValidationError::WrongLength { expected, found } => {
                write!(f, "must be exactly {} digits, found {}", expected, found)
            }
            ValidationError::TooLong { max, found } => {
                write!(f, "cannot exceed {} characters, found {}", max, found)
            }
            ValidationError::InvalidCharacter(ch) => {
                write!(f, "contains invalid character '{}'", ch)
            }
            ValidationError::ContainsDigit(ch) => {
                write!(f, "cannot contain digits, found '{}'", ch)
            }
            ValidationError::MultipleDecimalPoints => {
                write!(f, "must have at most one decimal point")
            }
            ValidationError::MissingLeadingDigit => {
                write!(f, "numbers below 1 need a leading zero (0.x)")
            }
            ValidationError::MissingFractionDigit => {
                write!(f, "decimal point must be followed by a digit")
            }
            ValidationError::TooManyFractionDigits => {
                write!(f, "at most one decimal place is allowed")
            }
            ValidationError::OutOfRange => write!(f, "must be between 0 and 100"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validated value for one of the updatable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Name(String),
    Programme(String),
    Mark(Mark),
}

pub fn validate_id(raw: &str) -> std::result::Result<StudentId, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Empty);
    }
    if let Some(ch) = raw.chars().find(|c| !c.is_ascii_digit()) {
        return Err(ValidationError::InvalidCharacter(ch));
    }
    if raw.len() != StudentId::DIGITS {
        return Err(ValidationError::WrongLength {
            expected: StudentId::DIGITS,
            found: raw.len(),
        });
    }

    let value = raw
        .bytes()
        .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
    StudentId::new(value).ok_or(ValidationError::WrongLength {
        expected: StudentId::DIGITS,
        found: raw.len(),
    })
}

pub fn validate_name(raw: &str) -> std::result::Result<String, ValidationError> {
    validate_text(raw, MAX_NAME_LENGTH, false)
}

pub fn validate_programme(raw: &str) -> std::result::Result<String, ValidationError> {
    validate_text(raw, MAX_PROGRAMME_LENGTH, true)
}

fn validate_text(
    raw: &str,
    max: usize,
    report_digits: bool,
) -> std::result::Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    let length = trimmed.chars().count();
    if length > max {
        return Err(ValidationError::TooLong { max, found: length });
    }

    for ch in trimmed.chars() {
        if report_digits && ch.is_ascii_digit() {
            return Err(ValidationError::ContainsDigit(ch));
        }
        if !is_valid_text_char(ch) {
            return Err(ValidationError::InvalidCharacter(ch));
        }
    }

    Ok(trimmed.to_string())
}

fn is_valid_text_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == ' '
}

pub fn validate_mark(raw: &str) -> std::result::Result<Mark, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Empty);
    }

    let mut seen_point = false;
    let mut whole_digits = 0usize;
    let mut whole: u32 = 0;
    let mut fraction: Option<u32> = None;

    for ch in raw.chars() {
        match ch {
            '.' if seen_point => return Err(ValidationError::MultipleDecimalPoints),
            '.' => seen_point = true,
            '0'..='9' => {
                let digit = ch as u32 - '0' as u32;
                if seen_point {
                    if fraction.is_some() {
                        return Err(ValidationError::TooManyFractionDigits);
                    }
                    fraction = Some(digit);
                } else {
                    whole_digits += 1;
                    // Saturate well above the range check so long inputs cannot overflow
                    whole = (whole * 10 + digit).min(10_000);
                }
            }
            other => return Err(ValidationError::InvalidCharacter(other)),
        }
    }

    if whole_digits == 0 {
        return Err(ValidationError::MissingLeadingDigit);
    }
    if seen_point && fraction.is_none() {
        return Err(ValidationError::MissingFractionDigit);
    }

    let tenths = whole * 10 + fraction.unwrap_or(0);
    u16::try_from(tenths)
        .ok()
        .and_then(Mark::from_tenths)
        .ok_or(ValidationError::OutOfRange)
}

/// Validates the raw value for an updatable field. `id` is never updatable.
pub fn validate_field(field: Field, raw: &str) -> Result<FieldValue> {
    let value = match field {
        Field::Id => return Err(CmsError::ImmutableField(Field::Id)),
        Field::Name => FieldValue::Name(validate_name(raw).map_err(|e| CmsError::invalid(field, e))?),
        Field::Programme => FieldValue::Programme(
            validate_programme(raw).map_err(|e| CmsError::invalid(field, e))?,
        ),
        Field::Mark => FieldValue::Mark(validate_mark(raw).map_err(|e| CmsError::invalid(field, e))?),
    };
    Ok(value)
}

/// Validates every field of a draft, reporting the first failing field.
pub fn validate_record(draft: &RecordDraft) -> Result<Record> {
    let id = validate_id(&draft.id).map_err(|e| CmsError::invalid(Field::Id, e))?;
    let name = validate_name(&draft.name).map_err(|e| CmsError::invalid(Field::Name, e))?;
    let programme =
        validate_programme(&draft.programme).map_err(|e| CmsError::invalid(Field::Programme, e))?;
    let mark = validate_mark(&draft.mark).map_err(|e| CmsError::invalid(Field::Mark, e))?;
    Ok(Record::new(id, name, programme, mark))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        assert_eq!(validate_id("2301234").unwrap().value(), 2301234);
        assert_eq!(validate_id("0000001").unwrap().value(), 1);
    }

    #[test]
    fn test_invalid_ids() {
        assert_eq!(validate_id(""), Err(ValidationError::Empty));
        assert_eq!(
            validate_id("123456"),
            Err(ValidationError::WrongLength {
                expected: 7,
                found: 6
            })
        );
        assert_eq!(
            validate_id("12345678"),
            Err(ValidationError::WrongLength {
                expected: 7,
                found: 8
            })
        );
        assert_eq!(
            validate_id("12a4567"),
            Err(ValidationError::InvalidCharacter('a'))
        );
        assert_eq!(
            validate_id(" 1234567"),
            Err(ValidationError::InvalidCharacter(' '))
        );
    }

    #[test]
    fn test_valid_names() {
        assert_eq!(validate_name("Ann").unwrap(), "Ann");
        assert_eq!(validate_name("  Mary Jane  ").unwrap(), "Mary Jane");
        assert!(validate_name(&"a".repeat(40)).is_ok());
    }

    #[test]
    fn test_invalid_names() {
        assert_eq!(validate_name(""), Err(ValidationError::Empty));
        assert_eq!(validate_name("   "), Err(ValidationError::Empty));
        assert_eq!(
            validate_name(&"a".repeat(41)),
            Err(ValidationError::TooLong { max: 40, found: 41 })
        );
        assert_eq!(
            validate_name("O'Brien"),
            Err(ValidationError::InvalidCharacter('\''))
        );
        assert_eq!(
            validate_name("Ann2"),
            Err(ValidationError::InvalidCharacter('2'))
        );
        assert_eq!(
            validate_name("Ann\tLee"),
            Err(ValidationError::InvalidCharacter('\t'))
        );
    }

    #[test]
    fn test_programme_reports_digits() {
        assert_eq!(
            validate_programme("Computer Science").unwrap(),
            "Computer Science"
        );
        assert_eq!(
            validate_programme("CS101"),
            Err(ValidationError::ContainsDigit('1'))
        );
        assert_eq!(
            validate_programme("C&S"),
            Err(ValidationError::InvalidCharacter('&'))
        );
        assert_eq!(validate_programme(""), Err(ValidationError::Empty));
    }

    #[test]
    fn test_valid_marks() {
        assert_eq!(validate_mark("70").unwrap().tenths(), 700);
        assert_eq!(validate_mark("70.0").unwrap().tenths(), 700);
        assert_eq!(validate_mark("0.5").unwrap().tenths(), 5);
        assert_eq!(validate_mark("0").unwrap().tenths(), 0);
        assert_eq!(validate_mark("100").unwrap().tenths(), 1000);
        assert_eq!(validate_mark("100.0").unwrap().tenths(), 1000);
        assert_eq!(validate_mark("088.5").unwrap().tenths(), 885);
    }

    #[test]
    fn test_invalid_marks() {
        assert_eq!(validate_mark(""), Err(ValidationError::Empty));
        assert_eq!(
            validate_mark(".5"),
            Err(ValidationError::MissingLeadingDigit)
        );
        assert_eq!(
            validate_mark("70."),
            Err(ValidationError::MissingFractionDigit)
        );
        assert_eq!(
            validate_mark("70.12"),
            Err(ValidationError::TooManyFractionDigits)
        );
        assert_eq!(
            validate_mark("7.0.1"),
            Err(ValidationError::MultipleDecimalPoints)
        );
        assert_eq!(validate_mark("101"), Err(ValidationError::OutOfRange));
        assert_eq!(validate_mark("100.1"), Err(ValidationError::OutOfRange));
        assert_eq!(
            validate_mark("99999999999"),
            Err(ValidationError::OutOfRange)
        );
        assert_eq!(
            validate_mark("-5"),
            Err(ValidationError::InvalidCharacter('-'))
        );
        assert_eq!(
            validate_mark("7O"),
            Err(ValidationError::InvalidCharacter('O'))
        );
    }

    #[test]
    fn test_validate_field_rejects_id() {
        assert!(matches!(
            validate_field(Field::Id, "1234567"),
            Err(CmsError::ImmutableField(Field::Id))
        ));
        assert_eq!(
            validate_field(Field::Mark, "55.5").unwrap(),
            FieldValue::Mark(Mark::from_tenths(555).unwrap())
        );
    }

    #[test]
    fn test_validate_record_reports_first_bad_field() {
        let draft = RecordDraft::new("1000001", "Ann", "CS1", "88.5");
        match validate_record(&draft) {
            Err(CmsError::Validation { field, source }) => {
                assert_eq!(field, Field::Programme);
                assert_eq!(source, ValidationError::ContainsDigit('1'));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ValidationError::MissingFractionDigit.to_string(),
            "decimal point must be followed by a digit"
        );
        assert_eq!(
            ValidationError::WrongLength {
                expected: 7,
                found: 3
            }
            .to_string(),
            "must be exactly 7 digits, found 3"
        );
    }
}
