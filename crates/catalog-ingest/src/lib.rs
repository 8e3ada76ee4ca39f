//! Book catalog ingestion.
//!
//! Reads the catalog export (`dataset.csv`) and its three lookup tables
//! (`authors.csv`, `categories.csv`, `formats.csv`) into Polars
//! DataFrames. Every column is read as text; typing happens later, in the
//! normalizer, against an explicit schema.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use catalog_ingest::{CatalogSources, load_catalog};
//!
//! let sources = CatalogSources::discover(Path::new("data"))?;
//! let catalog = load_catalog(&sources)?;
//! println!("{} books", catalog.books.height());
//! ```

mod csv;
mod discovery;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::read_csv_table;

// === Source Discovery ===
pub use discovery::{
    AUTHORS_FILE, BOOKS_FILE, CATEGORIES_FILE, CatalogSources, FORMATS_FILE, RawCatalog,
    load_catalog,
};
