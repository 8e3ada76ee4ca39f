//! Error types for catalog normalization.

use catalog_model::ColumnType;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Fatal normalization failures. Any of these aborts the whole run.
#[derive(Debug, Error)]
pub enum NormalizationError {
    /// An input table lacks a column the pipeline needs.
    #[error("column '{column}' not found in {table} table")]
    MissingColumn { table: &'static str, column: String },

    /// A multi-valued reference cell is not an integer list literal.
    #[error("malformed list in column '{column}' at row {row}: {value:?}")]
    MalformedListEncoding {
        column: String,
        row: usize,
        value: String,
        #[source]
        source: ListLiteralError,
    },

    /// A cell cannot be converted to its declared type.
    #[error("cannot convert {value:?} in column '{column}' at row {row} to {target}")]
    TypeCoercionFailure {
        column: String,
        row: usize,
        value: String,
        target: ColumnType,
    },

    /// A lookup column would overwrite a column already on the book table.
    #[error("{lookup} lookup column '{column}' already exists on the book table")]
    DuplicateColumn { lookup: &'static str, column: String },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Why a single list literal could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListLiteralError {
    #[error("not a bracketed list or tuple literal")]
    Unparsable,

    /// A parenthesized single value without a comma, e.g. `(1)`.
    #[error("parenthesized value is a scalar, not a tuple")]
    NotASequence,

    #[error("element {element:?} is not an integer id")]
    InvalidElement { element: String },

    #[error("id {element} does not fit in 64 bits")]
    IdOutOfRange { element: String },
}

/// Result type for normalization operations.
pub type Result<T> = std::result::Result<T, NormalizationError>;
