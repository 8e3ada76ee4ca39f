//! Row explosion of decoded id lists.

use polars::prelude::{DataFrame, IdxCa, IdxSize, NamedFrom, Series};

use crate::error::Result;
use crate::frame_utils::require_column;

/// Expands each row once per element of its List(Int64) `column`,
/// replacing the list with the scalar id.
///
/// A row with an empty list is kept once with a null id, so a book
/// without authors (or categories) survives the explosion.
pub fn explode_id_column(df: &DataFrame, column: &str) -> Result<DataFrame> {
    let lists = require_column(df, "books", column)?
        .as_materialized_series()
        .list()?;

    let mut take: Vec<IdxSize> = Vec::with_capacity(df.height());
    let mut ids: Vec<Option<i64>> = Vec::with_capacity(df.height());
    for (row, cell) in lists.into_iter().enumerate() {
        let row = row as IdxSize;
        match cell {
            Some(list) if !list.is_empty() => {
                for id in list.i64()?.into_iter() {
                    take.push(row);
                    ids.push(id);
                }
            }
            _ => {
                take.push(row);
                ids.push(None);
            }
        }
    }

    let indices = IdxCa::from_vec("explode".into(), take);
    let mut exploded = df.take(&indices)?;
    exploded.with_column(Series::new(column.into(), ids))?;
    Ok(exploded)
}
