use crate::model::{Field, StudentId};
use crate::validation::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmsError {
    #[error("No database is currently opened")]
    NotOpen,

    #[error("A database is already opened")]
    AlreadyOpen,

    #[error("Invalid {field}: {source}")]
    Validation {
        field: Field,
        #[source]
        source: ValidationError,
    },

    #[error("Student ID {0} already exists")]
    DuplicateId(StudentId),

    #[error("The record with ID={0} does not exist")]
    NotFound(StudentId),

    #[error("Database is full ({capacity} records)")]
    Full { capacity: usize },

    #[error("No data lines found in {}", .0.display())]
    NoData(PathBuf),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("No file name to save to")]
    NoFilename,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Please enter a {0} to search for")]
    EmptyQuery(Field),

    #[error("No records in the database")]
    NoRecords,

    #[error("The {0} field cannot be changed")]
    ImmutableField(Field),

    #[error("Unknown field: {0} (expected name, programme or mark)")]
    UnknownField(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl CmsError {
    pub fn invalid(field: Field, source: ValidationError) -> Self {
        CmsError::Validation { field, source }
    }
}

pub type Result<T> = std::result::Result<T, CmsError>;
