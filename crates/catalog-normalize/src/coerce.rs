//! Schema coercion of scalar columns.
//!
//! Numeric columns are strict: blank becomes `0`, anything else must parse.
//! Date columns are lenient: anything that does not match
//! [`DATETIME_FORMAT`] becomes null.

use catalog_model::schema::DATETIME_FORMAT;
use catalog_model::{BookSchema, ColumnType};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::{Column, DataFrame, DataType, DateChunked, IntoSeries, NamedFrom, Series};
use tracing::debug;

use crate::error::{NormalizationError, Result};

#[derive(Debug, Clone)]
pub struct CoercionOutcome {
    pub frame: DataFrame,
    /// Numeric cells that were null or blank and became `0`.
    pub zero_filled: usize,
    /// Non-blank date cells that did not parse and became null.
    pub dates_nulled: usize,
}

/// Parses a date cell, keeping only the calendar date.
pub fn parse_catalog_date(raw: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(raw.trim(), DATETIME_FORMAT)
        .ok()
        .map(|value| value.date())
}

/// Casts every column the schema declares to its target type.
///
/// Columns declared in the schema but absent from `df` are skipped.
pub fn apply_schema(df: &DataFrame, schema: &BookSchema) -> Result<CoercionOutcome> {
    let mut frame = df.clone();
    let mut zero_filled = 0usize;
    let mut dates_nulled = 0usize;

    for (name, column_type) in schema.columns() {
        let Ok(column) = df.column(name) else {
            debug!(column = name, "schema column not present, skipping");
            continue;
        };
        let series = match column_type {
            ColumnType::Text => continue,
            ColumnType::Integer => {
                let (values, zeros) = coerce_numeric(column, column_type, |raw| {
                    raw.parse::<i64>().ok()
                })?;
                zero_filled += zeros;
                Series::new(name.into(), values)
            }
            ColumnType::Real => {
                let (values, zeros) = coerce_numeric(column, column_type, |raw| {
                    raw.parse::<f64>().ok()
                })?;
                zero_filled += zeros;
                Series::new(name.into(), values)
            }
            ColumnType::Date | ColumnType::Datetime => {
                if column.dtype() == &DataType::Date {
                    continue;
                }
                let text = column.cast(&DataType::String)?;
                let mut dates = Vec::with_capacity(text.len());
                for cell in text.str()?.into_iter() {
                    let date = cell.and_then(parse_catalog_date);
                    if date.is_none() && cell.is_some_and(|raw| !raw.trim().is_empty()) {
                        dates_nulled += 1;
                    }
                    dates.push(date);
                }
                DateChunked::from_naive_date_options(name.into(), dates).into_series()
            }
        };
        frame.with_column(series)?;
    }

    Ok(CoercionOutcome {
        frame,
        zero_filled,
        dates_nulled,
    })
}

fn coerce_numeric<T: Default>(
    column: &Column,
    column_type: ColumnType,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<(Vec<T>, usize)> {
    let text = column.cast(&DataType::String)?;
    let values = text.str()?;
    let mut out = Vec::with_capacity(values.len());
    let mut zeros = 0usize;
    for (row, cell) in values.into_iter().enumerate() {
        let raw = cell.map(str::trim).unwrap_or("");
        if raw.is_empty() {
            zeros += 1;
            out.push(T::default());
            continue;
        }
        let value = parse(raw).ok_or_else(|| NormalizationError::TypeCoercionFailure {
            column: column.name().to_string(),
            row,
            value: raw.to_string(),
            target: column_type,
        })?;
        out.push(value);
    }
    Ok((out, zeros))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polars_utils::any_to_date;

    fn frame(columns: Vec<Column>) -> DataFrame {
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn parses_catalog_dates() {
        assert_eq!(
            parse_catalog_date("2020-03-14 00:00:00"),
            NaiveDate::from_ymd_opt(2020, 3, 14)
        );
        assert_eq!(parse_catalog_date("2020-03-14"), None);
        assert_eq!(parse_catalog_date(""), None);
        assert_eq!(parse_catalog_date("14/03/2020 00:00:00"), None);
    }

    #[test]
    fn blank_numeric_cells_become_zero() {
        let df = frame(vec![
            Series::new("rating-avg".into(), vec![Some("4.5"), Some(""), None]).into(),
            Series::new("bestsellers-rank".into(), vec![Some("12"), Some(" "), Some("3")]).into(),
        ]);
        let schema = BookSchema::new()
            .with_column("rating-avg", ColumnType::Real)
            .with_column("bestsellers-rank", ColumnType::Integer);

        let outcome = apply_schema(&df, &schema).unwrap();

        assert_eq!(outcome.zero_filled, 3);
        let ratings = outcome.frame.column("rating-avg").unwrap().f64().unwrap();
        assert_eq!(ratings.get(0), Some(4.5));
        assert_eq!(ratings.get(1), Some(0.0));
        assert_eq!(ratings.get(2), Some(0.0));
        let ranks = outcome.frame.column("bestsellers-rank").unwrap().i64().unwrap();
        assert_eq!(ranks.get(1), Some(0));
        assert_eq!(ranks.get(2), Some(3));
    }

    #[test]
    fn invalid_numeric_cell_is_fatal() {
        let df = frame(vec![
            Series::new("bestsellers-rank".into(), vec!["1", "twelve"]).into(),
        ]);
        let schema = BookSchema::new().with_column("bestsellers-rank", ColumnType::Integer);

        let err = apply_schema(&df, &schema).unwrap_err();
        match err {
            NormalizationError::TypeCoercionFailure {
                column,
                row,
                value,
                target,
            } => {
                assert_eq!(column, "bestsellers-rank");
                assert_eq!(row, 1);
                assert_eq!(value, "twelve");
                assert_eq!(target, ColumnType::Integer);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unparsable_dates_become_null() {
        let df = frame(vec![
            Series::new(
                "publication-date".into(),
                vec![Some("2021-06-01 00:00:00"), Some("June 2021"), Some(""), None],
            )
            .into(),
        ]);
        let schema = BookSchema::new().with_column("publication-date", ColumnType::Datetime);

        let outcome = apply_schema(&df, &schema).unwrap();

        assert_eq!(outcome.dates_nulled, 1);
        let column = outcome.frame.column("publication-date").unwrap();
        assert_eq!(column.dtype(), &DataType::Date);
        assert_eq!(
            any_to_date(column.get(0).unwrap()),
            NaiveDate::from_ymd_opt(2021, 6, 1)
        );
        assert_eq!(column.null_count(), 3);
    }

    #[test]
    fn absent_and_text_columns_are_untouched() {
        let df = frame(vec![Series::new("isbn13".into(), vec!["0001"]).into()]);
        let schema = BookSchema::new()
            .with_column("isbn13", ColumnType::Text)
            .with_column("weight", ColumnType::Real);

        let outcome = apply_schema(&df, &schema).unwrap();

        assert!(outcome.frame.equals_missing(&df));
    }
}
