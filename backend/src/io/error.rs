//! Errors raised while loading the source sheet.
//!
//! Every variant is fatal: the dashboard refuses to start on a partially
//! readable file.

use std::path::PathBuf;

/// Result type for loading operations
pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to open workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    #[error("Workbook {0} has no worksheets")]
    NoWorksheet(PathBuf),

    #[error("Failed to read CSV file {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Unsupported file extension '.{0}' (expected xlsx, xlsm, xlsb, xls, ods or csv)")]
    UnsupportedFormat(String),

    #[error("Required column '{column}' not found in header")]
    MissingColumn { column: String },

    #[error("Row {row}: cannot parse timestamp '{value}' (expected month/day/year hour:minute)")]
    InvalidTimestamp { row: usize, value: String },

    #[error("Row {row}: column '{column}' holds non-numeric value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("No data rows found in {0}")]
    Empty(PathBuf),
}
