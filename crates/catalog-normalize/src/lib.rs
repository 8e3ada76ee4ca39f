//! Book catalog normalization.
//!
//! Turns the denormalized catalog export (one row per book, list-encoded
//! author and category references) into one row per (book, author,
//! category), enriched with lookup names and typed against a
//! [`BookSchema`](catalog_model::BookSchema).
//!
//! # Example
//!
//! ```ignore
//! use catalog_normalize::normalize;
//!
//! let table = normalize(&books, &authors, &categories, &formats)?;
//! println!("{} rows", table.row_count());
//! ```

mod coerce;
mod decode;
mod error;
mod explode;
mod frame_utils;
mod join;
mod pipeline;
pub mod polars_utils;
mod sentinel;
mod table;
mod text;

pub use coerce::{CoercionOutcome, apply_schema, parse_catalog_date};
pub use decode::{decode_id_list, decode_list_column};
pub use error::{ListLiteralError, NormalizationError, Result};
pub use explode::explode_id_column;
pub use join::{JoinOutcome, LookupTable, integer_ids, left_join_lookup};
pub use pipeline::{CatalogLookups, NormalizeStage, Normalizer, normalize};
pub use polars_utils::{any_to_date, date_from_days, days_from_date};
pub use sentinel::fill_null_ids;
pub use table::{NormalizationStats, NormalizedTable};
pub use text::{clean_text_column, collapse_carriage_returns};
