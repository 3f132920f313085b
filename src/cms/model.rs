//! Core data types: [`Record`] and the typed values it is made of.
//!
//! Values only reach these types through [`crate::validation`], so a `Record`
//! is always well-formed: a 7-digit id, a letters-and-spaces name and
//! programme, and a mark between 0.0 and 100.0 with one decimal.

use crate::error::CmsError;
use std::fmt;
use std::str::FromStr;

/// A student id. Always exactly seven decimal digits when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StudentId(u32);

impl StudentId {
    pub const DIGITS: usize = 7;
    const MAX: u32 = 9_999_999;

    pub fn new(value: u32) -> Option<Self> {
        (value <= Self::MAX).then_some(StudentId(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.0, width = Self::DIGITS)
    }
}

/// A mark stored as whole tenths (0..=1000), so equality and ordering are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Mark(u16);

impl Mark {
    pub const MAX_TENTHS: u16 = 1000;

    pub fn from_tenths(tenths: u16) -> Option<Self> {
        (tenths <= Self::MAX_TENTHS).then_some(Mark(tenths))
    }

    pub fn tenths(self) -> u16 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// The four columns of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Programme,
    Mark,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Programme => "programme",
            Field::Mark => "mark",
        };
        f.write_str(name)
    }
}

impl FromStr for Field {
    type Err = CmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(Field::Id),
            "name" => Ok(Field::Name),
            "programme" | "program" => Ok(Field::Programme),
            "mark" => Ok(Field::Mark),
            other => Err(CmsError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: StudentId,
    pub name: String,
    pub programme: String,
    pub mark: Mark,
}

impl Record {
    pub fn new(id: StudentId, name: String, programme: String, mark: Mark) -> Self {
        Self {
            id,
            name,
            programme,
            mark,
        }
    }
}

/// Unvalidated field values for a record that is about to be inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub id: String,
    pub name: String,
    pub programme: String,
    pub mark: String,
}

impl RecordDraft {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        programme: impl Into<String>,
        mark: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            programme: programme.into(),
            mark: mark.into(),
        }
    }
}
