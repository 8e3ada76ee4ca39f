use polars::prelude::{Column, DataFrame};

use crate::error::{NormalizationError, Result};

pub(crate) fn require_column<'a>(
    df: &'a DataFrame,
    table: &'static str,
    column: &str,
) -> Result<&'a Column> {
    df.column(column)
        .map_err(|_| NormalizationError::MissingColumn {
            table,
            column: column.to_string(),
        })
}

pub(crate) fn has_column(df: &DataFrame, column: &str) -> bool {
    df.column(column).is_ok()
}
