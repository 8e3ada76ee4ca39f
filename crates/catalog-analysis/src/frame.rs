//! Column validation and typed reads of collected query frames.

use catalog_normalize::any_to_date;
use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, DataType};

use crate::error::{AnalysisError, Result};

pub(crate) fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| AnalysisError::ColumnNotFound {
        column: name.to_string(),
    })
}

fn expect_dtype(column: &Column, expected: &DataType) -> Result<()> {
    if column.dtype() == expected {
        return Ok(());
    }
    Err(AnalysisError::ColumnType {
        column: column.name().to_string(),
        expected: expected.to_string(),
        actual: column.dtype().to_string(),
    })
}

/// Checks, in order, that every column exists with its expected type.
///
/// Queries call this before building a plan so a frame without the
/// normalized layout fails with a named column instead of a plan error.
pub(crate) fn require_columns(df: &DataFrame, expected: &[(&str, DataType)]) -> Result<()> {
    for (name, dtype) in expected {
        expect_dtype(column(df, name)?, dtype)?;
    }
    Ok(())
}

pub(crate) fn i64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let column = column(df, name)?;
    expect_dtype(column, &DataType::Int64)?;
    Ok(column.i64()?.into_iter().collect())
}

pub(crate) fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = column(df, name)?;
    expect_dtype(column, &DataType::Float64)?;
    Ok(column.f64()?.into_iter().collect())
}

pub(crate) fn str_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = column(df, name)?;
    expect_dtype(column, &DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

pub(crate) fn date_values(df: &DataFrame, name: &str) -> Result<Vec<Option<NaiveDate>>> {
    let column = column(df, name)?;
    expect_dtype(column, &DataType::Date)?;
    let mut dates = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        dates.push(any_to_date(column.get(idx)?));
    }
    Ok(dates)
}

/// Reads an aggregated count column (`len`, `n_unique`); nulls read as zero.
pub(crate) fn count_values(df: &DataFrame, name: &str) -> Result<Vec<usize>> {
    let counts = column(df, name)?.cast(&DataType::UInt64)?;
    Ok(counts
        .u64()?
        .into_iter()
        .map(|count| usize::try_from(count.unwrap_or_default()).unwrap_or(usize::MAX))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    #[test]
    fn wrong_dtype_is_reported_with_both_types() {
        let df = DataFrame::new(vec![Series::new("id".into(), vec!["1"]).into()]).unwrap();
        let err = i64_values(&df, "id").unwrap_err();
        match err {
            AnalysisError::ColumnType {
                column,
                expected,
                actual,
            } => {
                assert_eq!(column, "id");
                assert_eq!(expected, DataType::Int64.to_string());
                assert_eq!(actual, DataType::String.to_string());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn required_columns_are_checked_in_order() {
        let df = DataFrame::new(vec![Series::new("id".into(), vec![1i64]).into()]).unwrap();

        assert!(require_columns(&df, &[("id", DataType::Int64)]).is_ok());
        match require_columns(&df, &[("id", DataType::Int64), ("title", DataType::String)]) {
            Err(AnalysisError::ColumnNotFound { column }) => assert_eq!(column, "title"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn counts_read_from_any_unsigned_width() {
        let df = DataFrame::new(vec![
            Series::new("book_count".into(), vec![Some(3u32), None, Some(1)]).into(),
        ])
        .unwrap();
        assert_eq!(count_values(&df, "book_count").unwrap(), vec![3, 0, 1]);
    }
}
