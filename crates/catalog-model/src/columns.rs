//! Column names shared by the raw catalog, the lookup tables, and the
//! normalized table.
//!
//! The raw book table carries `authors`, `categories` and `format`; after
//! normalization those three are renamed to their scalar id names.

/// Placeholder id for a book with no associated author, category or format.
pub const SENTINEL_ID: i64 = -1;

pub const ID: &str = "id";
pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const BESTSELLERS_RANK: &str = "bestsellers-rank";
pub const RATING_AVG: &str = "rating-avg";
pub const PUBLICATION_DATE: &str = "publication-date";

// Raw reference columns on the book table.
pub const AUTHORS: &str = "authors";
pub const CATEGORIES: &str = "categories";
pub const FORMAT: &str = "format";

// Lookup tables.
pub const AUTHOR_ID: &str = "author_id";
pub const AUTHOR_NAME: &str = "author_name";
pub const CATEGORY_ID: &str = "category_id";
pub const CATEGORY_NAME: &str = "category_name";
pub const FORMAT_ID: &str = "format_id";
pub const FORMAT_NAME: &str = "format_name";

/// Final names of the reference columns, in `(raw, normalized)` pairs.
pub const RENAMES: [(&str, &str); 3] = [
    (AUTHORS, AUTHOR_ID),
    (CATEGORIES, CATEGORY_ID),
    (FORMAT, FORMAT_ID),
];
