//! Locating and loading the four catalog source files.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::info;

use crate::csv::read_csv_table;
use crate::error::{IngestError, Result};

pub const BOOKS_FILE: &str = "dataset.csv";
pub const AUTHORS_FILE: &str = "authors.csv";
pub const CATEGORIES_FILE: &str = "categories.csv";
pub const FORMATS_FILE: &str = "formats.csv";

/// Paths of the catalog export and its lookup tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSources {
    pub books: PathBuf,
    pub authors: PathBuf,
    pub categories: PathBuf,
    pub formats: PathBuf,
}

impl CatalogSources {
    /// Conventional file names inside `dir`, without checking they exist.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            books: dir.join(BOOKS_FILE),
            authors: dir.join(AUTHORS_FILE),
            categories: dir.join(CATEGORIES_FILE),
            formats: dir.join(FORMATS_FILE),
        }
    }

    /// Like [`CatalogSources::in_dir`], but fails if the directory or any
    /// of the four files is missing.
    pub fn discover(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(IngestError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }
        let sources = Self::in_dir(dir);
        for (_, path) in sources.entries() {
            if !path.is_file() {
                return Err(IngestError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
        }
        Ok(sources)
    }

    pub fn entries(&self) -> [(&'static str, &Path); 4] {
        [
            ("books", self.books.as_path()),
            ("authors", self.authors.as_path()),
            ("categories", self.categories.as_path()),
            ("formats", self.formats.as_path()),
        ]
    }
}

/// The four raw tables, exactly as read from disk.
#[derive(Debug, Clone)]
pub struct RawCatalog {
    pub books: DataFrame,
    pub authors: DataFrame,
    pub categories: DataFrame,
    pub formats: DataFrame,
}

pub fn load_catalog(sources: &CatalogSources) -> Result<RawCatalog> {
    let books = read_csv_table(&sources.books)?;
    let authors = read_csv_table(&sources.authors)?;
    let categories = read_csv_table(&sources.categories)?;
    let formats = read_csv_table(&sources.formats)?;
    info!(
        books = books.height(),
        authors = authors.height(),
        categories = categories.height(),
        formats = formats.height(),
        "catalog loaded"
    );
    Ok(RawCatalog {
        books,
        authors,
        categories,
        formats,
    })
}
