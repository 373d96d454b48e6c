//! Common error types for swinv

use thiserror::Error;

/// Common result type for swinv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the swinv tools
///
/// Metadata-lookup failures are deliberately absent: they degrade to empty
/// metadata at the call site and are logged, never propagated.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input file could not be opened or parsed as a tabular export
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Required column missing from the input file
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Cell value could not be interpreted
    #[error("Invalid value in column '{column}', row {row}: {value}")]
    InvalidCell {
        column: String,
        row: usize,
        value: String,
    },
}
