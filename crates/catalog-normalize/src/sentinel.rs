//! Null-sentinel fill for reference id columns.

use catalog_model::SENTINEL_ID;
use polars::prelude::{DataFrame, NamedFrom, Series};

use crate::error::Result;
use crate::frame_utils::require_column;
use crate::join::integer_ids;

/// Replaces nulls in each id column with [`SENTINEL_ID`].
///
/// Returns the filled frame and the number of cells replaced.
pub fn fill_null_ids(df: &DataFrame, columns: &[&str]) -> Result<(DataFrame, usize)> {
    let mut out = df.clone();
    let mut filled = 0usize;
    for column in columns {
        let ids = integer_ids(require_column(df, "books", column)?)?;
        let values: Vec<i64> = ids
            .into_iter()
            .map(|id| {
                id.unwrap_or_else(|| {
                    filled += 1;
                    SENTINEL_ID
                })
            })
            .collect();
        out.with_column(Series::new((*column).into(), values))?;
    }
    Ok((out, filled))
}
