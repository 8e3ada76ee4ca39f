//! Decoding of string-encoded id lists (`"[1, 2]"`) into List(Int64) columns.
//!
//! Cells hold Python-style sequence literals: a bracketed list or a
//! parenthesized tuple of integers, optionally with a trailing comma.
//! `None` marks a missing value, as the whole cell or as one element.

use std::sync::LazyLock;

use polars::prelude::{DataFrame, DataType, NamedFrom, PlSmallStr, Series};
use regex::Regex;

use crate::error::{ListLiteralError, NormalizationError, Result};
use crate::frame_utils::require_column;

/// Optionally signed decimal integer.
static INTEGER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+$").expect("Invalid integer id regex"));

const NONE_LITERAL: &str = "None";

/// Decodes one list literal.
///
/// Blank and `None` decode to an empty list. `[1, 2,]`, `(1, 2)` and
/// `(1,)` are accepted; `(1)` is a scalar and is rejected, as are floats,
/// quoted ids and unbalanced brackets. A `None` element decodes to a
/// missing id.
pub fn decode_id_list(raw: &str) -> std::result::Result<Vec<Option<i64>>, ListLiteralError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NONE_LITERAL {
        return Ok(Vec::new());
    }

    let (inner, is_tuple) = if let Some(inner) = enclosed(trimmed, '[', ']') {
        (inner, false)
    } else if let Some(inner) = enclosed(trimmed, '(', ')') {
        (inner, true)
    } else {
        return Err(ListLiteralError::Unparsable);
    };

    let inner = inner.trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    if is_tuple && !inner.contains(',') {
        return Err(ListLiteralError::NotASequence);
    }

    let body = inner.strip_suffix(',').unwrap_or(inner);
    body.split(',')
        .map(|element| decode_element(element.trim()))
        .collect()
}

fn enclosed(text: &str, open: char, close: char) -> Option<&str> {
    text.strip_prefix(open)?.strip_suffix(close)
}

fn decode_element(element: &str) -> std::result::Result<Option<i64>, ListLiteralError> {
    if element.is_empty() {
        return Err(ListLiteralError::Unparsable);
    }
    if element == NONE_LITERAL {
        return Ok(None);
    }
    if !INTEGER_ID.is_match(element) {
        return Err(ListLiteralError::InvalidElement {
            element: element.to_string(),
        });
    }
    element
        .parse::<i64>()
        .map(Some)
        .map_err(|_| ListLiteralError::IdOutOfRange {
            element: element.to_string(),
        })
}

/// Replaces a text column of list literals with a List(Int64) column.
///
/// Null cells become empty lists. The first malformed cell aborts with
/// [`NormalizationError::MalformedListEncoding`].
pub fn decode_list_column(df: &DataFrame, column: &str) -> Result<DataFrame> {
    let source = require_column(df, "books", column)?;
    let text = source.cast(&DataType::String)?;
    let values = text.str()?;

    let mut lists: Vec<Series> = Vec::with_capacity(values.len());
    for (row, cell) in values.into_iter().enumerate() {
        let ids = match cell {
            None => Vec::new(),
            Some(raw) => decode_id_list(raw).map_err(|source| {
                NormalizationError::MalformedListEncoding {
                    column: column.to_string(),
                    row,
                    value: raw.to_string(),
                    source,
                }
            })?,
        };
        lists.push(Series::new(PlSmallStr::EMPTY, ids));
    }

    let mut decoded = df.clone();
    decoded.with_column(Series::new(column.into(), lists))?;
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &str) -> Vec<Option<i64>> {
        decode_id_list(raw).unwrap()
    }

    #[test]
    fn decodes_list_literals() {
        assert_eq!(ids("[1, 2]"), vec![Some(1), Some(2)]);
        assert_eq!(ids("[42]"), vec![Some(42)]);
        assert_eq!(ids(" [ 3 ,4 ] "), vec![Some(3), Some(4)]);
        assert_eq!(ids("[-1, +7]"), vec![Some(-1), Some(7)]);
        assert!(ids("[]").is_empty());
        assert!(ids("").is_empty());
    }

    #[test]
    fn accepts_python_sequence_forms() {
        assert_eq!(ids("[1, 2,]"), vec![Some(1), Some(2)]);
        assert_eq!(ids("(1, 2)"), vec![Some(1), Some(2)]);
        assert_eq!(ids("(5,)"), vec![Some(5)]);
        assert!(ids("()").is_empty());
        assert!(ids("None").is_empty());
        assert_eq!(ids("[1, None]"), vec![Some(1), None]);
    }

    #[test]
    fn rejects_malformed_lists() {
        assert_eq!(decode_id_list("[x"), Err(ListLiteralError::Unparsable));
        assert_eq!(decode_id_list("[1, 2"), Err(ListLiteralError::Unparsable));
        assert_eq!(decode_id_list("[1, 2)"), Err(ListLiteralError::Unparsable));
        assert_eq!(decode_id_list("1, 2"), Err(ListLiteralError::Unparsable));
        assert_eq!(decode_id_list("7"), Err(ListLiteralError::Unparsable));
        assert_eq!(decode_id_list("[1,,2]"), Err(ListLiteralError::Unparsable));
        assert_eq!(decode_id_list("[,]"), Err(ListLiteralError::Unparsable));
        assert_eq!(decode_id_list("(1)"), Err(ListLiteralError::NotASequence));
        assert!(matches!(
            decode_id_list("[1.5]"),
            Err(ListLiteralError::InvalidElement { .. })
        ));
        assert!(matches!(
            decode_id_list("[\"1\"]"),
            Err(ListLiteralError::InvalidElement { .. })
        ));
        assert!(matches!(
            decode_id_list("[99999999999999999999]"),
            Err(ListLiteralError::IdOutOfRange { .. })
        ));
    }

    #[test]
    fn decode_column_reports_row_of_first_bad_cell() {
        let df = DataFrame::new(vec![
            Series::new("authors".into(), vec![Some("[1]"), None, Some("[x]")]).into(),
        ])
        .unwrap();

        let err = decode_list_column(&df, "authors").unwrap_err();
        match err {
            NormalizationError::MalformedListEncoding { column, row, value, .. } => {
                assert_eq!(column, "authors");
                assert_eq!(row, 2);
                assert_eq!(value, "[x]");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn decode_column_turns_nulls_into_empty_lists() {
        let df = DataFrame::new(vec![
            Series::new("authors".into(), vec![Some("[1, 2]"), None]).into(),
        ])
        .unwrap();

        let decoded = decode_list_column(&df, "authors").unwrap();
        let lists = decoded
            .column("authors")
            .unwrap()
            .as_materialized_series()
            .list()
            .unwrap();
        let first = lists.get_as_series(0).unwrap();
        let second = lists.get_as_series(1).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 0);
    }

    proptest::proptest! {
        #[test]
        fn prop_any_spacing_decodes_same_ids(
            values in proptest::collection::vec(proptest::num::i64::ANY, 0..12),
            pad in "[ ]{0,3}",
        ) {
            let joined: Vec<String> = values.iter().map(i64::to_string).collect();
            let literal = format!("[{pad}{}{pad}]", joined.join(&format!("{pad},{pad}")));
            let expected: Vec<Option<i64>> = values.into_iter().map(Some).collect();
            proptest::prop_assert_eq!(decode_id_list(&literal).unwrap(), expected);
        }

        #[test]
        fn prop_trailing_comma_decodes_same_ids(
            values in proptest::collection::vec(0i64..1000, 1..6),
            tuple in proptest::bool::ANY,
        ) {
            let joined: Vec<String> = values.iter().map(i64::to_string).collect();
            let (open, close) = if tuple { ('(', ')') } else { ('[', ']') };
            let literal = format!("{open}{},{close}", joined.join(", "));
            let expected: Vec<Option<i64>> = values.into_iter().map(Some).collect();
            proptest::prop_assert_eq!(decode_id_list(&literal).unwrap(), expected);
        }
    }
}
