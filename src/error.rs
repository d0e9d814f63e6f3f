//! Error types for the calculator.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for calculator operations.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Unsupported operation: {0}")]
    UnknownOperation(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    DivisionByZero(String),

    #[error("{0}")]
    Domain(String),

    #[error("History file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("History CSV missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Invalid number in row {row}, column '{column}': {value:?}")]
    Parse {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Malformed history file: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CalcError {
    /// True for errors raised by the arithmetic itself.
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, CalcError::DivisionByZero(_) | CalcError::Domain(_))
    }
}

impl From<csv::Error> for CalcError {
    fn from(e: csv::Error) -> Self {
        if e.is_io_error() {
            match e.into_kind() {
                csv::ErrorKind::Io(io) => CalcError::Io(io),
                other => CalcError::Malformed(format!("{:?}", other)),
            }
        } else {
            CalcError::Malformed(e.to_string())
        }
    }
}

impl From<figment::Error> for CalcError {
    fn from(e: figment::Error) -> Self {
        CalcError::Config(e.to_string())
    }
}

/// Result type for calculator operations.
pub type Result<T> = std::result::Result<T, CalcError>;
