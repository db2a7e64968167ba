//! Error types for reading the constellation line CSV.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("CSV file not found: {path}")]
    MissingInput { path: PathBuf },

    #[error("CSV header is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error(
        "Row at line {line} for {constellation} expected {expected} stars but parsed {parsed}"
    )]
    CountMismatch {
        line: u64,
        constellation: String,
        expected: i64,
        parsed: usize,
    },

    #[error("Invalid integer '{value}' in column '{column}' at line {line}")]
    InvalidInteger {
        line: u64,
        column: String,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ParseError>;
