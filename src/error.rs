use std::path::PathBuf;

use thiserror::Error;

/// Failure to bring the source table into memory. Always fatal for a build.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Row {row}: empty transportation mode")]
    EmptyMode { row: usize },
}

/// Failure while aggregating an already loaded table.
#[derive(Error, Debug, PartialEq)]
pub enum AggregateError {
    #[error("Row {row}: unrecognized transportation mode '{label}'")]
    UnknownMode { row: usize, label: String },

    #[error("Missing column: {0}")]
    MissingColumn(String),
}
