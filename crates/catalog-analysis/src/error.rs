use polars::prelude::PolarsError;
use thiserror::Error;

/// Query failures. These indicate a table that does not have the
/// normalized layout, never bad catalog data.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("column '{column}' not found in normalized table")]
    ColumnNotFound { column: String },

    #[error("column '{column}' has type {actual}, expected {expected}")]
    ColumnType {
        column: String,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
