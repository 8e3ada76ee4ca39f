//! Left joins against the author, category and format lookup tables.

use std::collections::HashMap;

use catalog_model::ColumnType;
use polars::prelude::{
    Column, DataFrame, DataType, IdxCa, IdxSize, IntoColumn, NamedFrom, Series,
};

use crate::error::{NormalizationError, Result};
use crate::frame_utils::require_column;

/// A lookup table keyed by an integer id column.
#[derive(Debug, Clone, Copy)]
pub struct LookupTable<'a> {
    /// Table name used in logs and errors ("authors", "formats", ...).
    pub name: &'static str,
    pub frame: &'a DataFrame,
    /// Key column on the lookup side. It is consumed by the join.
    pub key: &'a str,
}

impl<'a> LookupTable<'a> {
    pub fn new(name: &'static str, frame: &'a DataFrame, key: &'a str) -> Self {
        Self { name, frame, key }
    }
}

#[derive(Debug, Clone)]
pub struct JoinOutcome {
    pub frame: DataFrame,
    /// Rows whose non-null key had no matching lookup row.
    pub misses: usize,
}

/// Reads an id column as integers.
///
/// Null and blank cells become null; any other value that is not an
/// integer is a [`NormalizationError::TypeCoercionFailure`].
pub fn integer_ids(column: &Column) -> Result<Vec<Option<i64>>> {
    if column.dtype() == &DataType::Int64 {
        return Ok(column.i64()?.into_iter().collect());
    }
    let text = column.cast(&DataType::String)?;
    let values = text.str()?;
    let mut ids = Vec::with_capacity(values.len());
    for (row, cell) in values.into_iter().enumerate() {
        let id = match cell.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
                NormalizationError::TypeCoercionFailure {
                    column: column.name().to_string(),
                    row,
                    value: raw.to_string(),
                    target: ColumnType::Integer,
                }
            })?),
        };
        ids.push(id);
    }
    Ok(ids)
}

/// Left-joins `df` on `left_on = lookup.key`.
///
/// Every left row is kept, in order. The left key column is rewritten as
/// Int64; the lookup key column is dropped and the remaining lookup
/// columns are appended, null where no lookup row matched. A key that
/// occurs several times in the lookup fans the left row out.
pub fn left_join_lookup(
    df: &DataFrame,
    left_on: &str,
    lookup: &LookupTable<'_>,
) -> Result<JoinOutcome> {
    let left_keys = integer_ids(require_column(df, "books", left_on)?)?;
    let right_keys = integer_ids(require_column(lookup.frame, lookup.name, lookup.key)?)?;

    let mut positions: HashMap<i64, Vec<IdxSize>> = HashMap::new();
    for (row, key) in right_keys.iter().enumerate() {
        if let Some(key) = key {
            positions.entry(*key).or_default().push(row as IdxSize);
        }
    }

    let mut left_take: Vec<IdxSize> = Vec::with_capacity(left_keys.len());
    let mut right_take: Vec<Option<IdxSize>> = Vec::with_capacity(left_keys.len());
    let mut misses = 0usize;
    for (row, key) in left_keys.iter().copied().enumerate() {
        let matches = key.and_then(|key| positions.get(&key));
        match matches {
            Some(rows) => {
                for right_row in rows {
                    left_take.push(row as IdxSize);
                    right_take.push(Some(*right_row));
                }
            }
            None => {
                if let Some(key) = key {
                    misses += 1;
                    tracing::trace!(lookup = lookup.name, key, "lookup miss");
                }
                left_take.push(row as IdxSize);
                right_take.push(None);
            }
        }
    }

    let mut left = df.clone();
    left.with_column(Series::new(left_on.into(), left_keys))?;
    let left = left.take(&IdxCa::from_vec("left".into(), left_take))?;

    let payload = lookup.frame.drop(lookup.key)?;
    for name in payload.get_column_names() {
        if left.column(name.as_str()).is_ok() {
            return Err(NormalizationError::DuplicateColumn {
                lookup: lookup.name,
                column: name.to_string(),
            });
        }
    }

    let right_columns: Vec<Column> = if right_take.iter().all(Option::is_none) {
        payload
            .get_columns()
            .iter()
            .map(|column| {
                Series::full_null(column.name().clone(), right_take.len(), column.dtype())
                    .into_column()
            })
            .collect()
    } else {
        let indices: IdxCa = right_take.into_iter().collect();
        payload.take(&indices)?.get_columns().to_vec()
    };

    let frame = left.hstack(&right_columns)?;
    Ok(JoinOutcome { frame, misses })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(columns: Vec<Column>) -> DataFrame {
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn keeps_unmatched_rows_with_null_names() {
        let books = frame(vec![
            Series::new("id".into(), vec![1i64, 2, 3]).into(),
            Series::new("authors".into(), vec![Some(1i64), Some(9), None]).into(),
        ]);
        let authors = frame(vec![
            Series::new("author_id".into(), vec!["1", "2"]).into(),
            Series::new("author_name".into(), vec!["A", "B"]).into(),
        ]);

        let outcome =
            left_join_lookup(&books, "authors", &LookupTable::new("authors", &authors, "author_id"))
                .unwrap();

        assert_eq!(outcome.misses, 1);
        assert_eq!(outcome.frame.height(), 3);
        assert!(outcome.frame.column("author_id").is_err());
        let names = outcome.frame.column("author_name").unwrap().str().unwrap();
        assert_eq!(names.get(0), Some("A"));
        assert_eq!(names.get(1), None);
        assert_eq!(names.get(2), None);
    }

    #[test]
    fn duplicate_lookup_keys_fan_out() {
        let books = frame(vec![Series::new("format".into(), vec!["5"]).into()]);
        let formats = frame(vec![
            Series::new("format_id".into(), vec!["5", "5"]).into(),
            Series::new("format_name".into(), vec!["Hardcover", "Hardback"]).into(),
        ]);

        let outcome =
            left_join_lookup(&books, "format", &LookupTable::new("formats", &formats, "format_id"))
                .unwrap();

        assert_eq!(outcome.frame.height(), 2);
        let keys = outcome.frame.column("format").unwrap().i64().unwrap();
        assert_eq!(keys.get(0), Some(5));
        assert_eq!(keys.get(1), Some(5));
    }

    #[test]
    fn all_misses_yield_typed_null_columns() {
        let books = frame(vec![Series::new("format".into(), vec![Some("7"), None]).into()]);
        let formats = frame(vec![
            Series::new("format_id".into(), vec!["5"]).into(),
            Series::new("format_name".into(), vec!["Hardcover"]).into(),
        ]);

        let outcome =
            left_join_lookup(&books, "format", &LookupTable::new("formats", &formats, "format_id"))
                .unwrap();

        assert_eq!(outcome.misses, 1);
        let names = outcome.frame.column("format_name").unwrap();
        assert_eq!(names.dtype(), &DataType::String);
        assert_eq!(names.null_count(), 2);
    }

    #[test]
    fn non_integer_key_is_a_coercion_failure() {
        let books = frame(vec![Series::new("format".into(), vec!["paperback"]).into()]);
        let formats = frame(vec![
            Series::new("format_id".into(), vec!["5"]).into(),
            Series::new("format_name".into(), vec!["Hardcover"]).into(),
        ]);

        let err =
            left_join_lookup(&books, "format", &LookupTable::new("formats", &formats, "format_id"))
                .unwrap_err();
        assert!(matches!(
            err,
            NormalizationError::TypeCoercionFailure { ref column, row: 0, .. } if column == "format"
        ));
    }
}
