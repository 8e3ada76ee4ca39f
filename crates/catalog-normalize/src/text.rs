//! Free-text cleanup.

use std::borrow::Cow;
use std::sync::LazyLock;

use polars::prelude::{DataFrame, NamedFrom, Series};
use regex::Regex;

use crate::error::Result;

/// Optional whitespace, a carriage return, optional whitespace.
static CARRIAGE_RETURN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\r\s*").expect("Invalid carriage return regex"));

/// Collapses every carriage-return run (with its surrounding whitespace)
/// into a single space.
pub fn collapse_carriage_returns(text: &str) -> Cow<'_, str> {
    CARRIAGE_RETURN_RUN.replace_all(text, " ")
}

/// Applies [`collapse_carriage_returns`] to every cell of a text column.
///
/// Returns the cleaned frame and the number of cells that changed.
pub fn clean_text_column(df: &DataFrame, column: &str) -> Result<(DataFrame, usize)> {
    let values = df.column(column)?.str()?;
    let mut changed = 0usize;
    let cleaned: Vec<Option<String>> = values
        .into_iter()
        .map(|cell| {
            cell.map(|text| match collapse_carriage_returns(text) {
                Cow::Borrowed(unchanged) => unchanged.to_string(),
                Cow::Owned(replaced) => {
                    changed += 1;
                    replaced
                }
            })
        })
        .collect();

    let mut out = df.clone();
    out.with_column(Series::new(column.into(), cleaned))?;
    Ok((out, changed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_runs_around_carriage_returns() {
        assert_eq!(collapse_carriage_returns("one\rtwo"), "one two");
        assert_eq!(collapse_carriage_returns("one \r\n two"), "one two");
        assert_eq!(collapse_carriage_returns("a\r\n\r\nb"), "a b");
        assert_eq!(collapse_carriage_returns("a\r b\rc"), "a b c");
    }

    #[test]
    fn leaves_text_without_carriage_returns_alone() {
        assert_eq!(collapse_carriage_returns("line\nbreak"), "line\nbreak");
        assert_eq!(collapse_carriage_returns("  spaced  "), "  spaced  ");
        assert!(matches!(
            collapse_carriage_returns("plain"),
            Cow::Borrowed("plain")
        ));
    }

    #[test]
    fn cleans_column_and_counts_changes() {
        let df = DataFrame::new(vec![
            Series::new(
                "description".into(),
                vec![Some("A\r\nB"), None, Some("clean")],
            )
            .into(),
        ])
        .unwrap();

        let (cleaned, changed) = clean_text_column(&df, "description").unwrap();
        let values = cleaned.column("description").unwrap().str().unwrap();
        assert_eq!(changed, 1);
        assert_eq!(values.get(0), Some("A B"));
        assert_eq!(values.get(1), None);
        assert_eq!(values.get(2), Some("clean"));
    }
}
