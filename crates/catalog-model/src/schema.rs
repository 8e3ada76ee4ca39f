//! Target column types for the coercion stage of normalization.
//!
//! A schema maps column names to a [`ColumnType`]. Columns the schema does
//! not mention stay text. Schemas are usually the built-in
//! [`default_book_schema`], but can be supplied as a JSON object:
//!
//! ```json
//! { "rating-avg": "real", "publication-date": "datetime" }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::columns;
use crate::error::{Result, SchemaError};

/// Date and datetime cells are parsed with this format.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Real,
    Date,
    Datetime,
    Text,
}

impl ColumnType {
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Real)
    }

    pub fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::Datetime)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookSchema {
    columns: BTreeMap<String, ColumnType>,
}

impl BookSchema {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_column(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.columns.insert(name.into(), column_type);
        self
    }

    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.columns.get(name).copied()
    }

    /// Declared columns in name order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, ColumnType)> {
        self.columns.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn validate(self) -> Result<Self> {
        if self.columns.keys().any(|name| name.trim().is_empty()) {
            return Err(SchemaError::EmptyColumnName);
        }
        Ok(self)
    }
}

/// Schema of the Book Depository style catalog export.
pub fn default_book_schema() -> BookSchema {
    BookSchema::new()
        .with_column(columns::ID, ColumnType::Integer)
        .with_column(columns::BESTSELLERS_RANK, ColumnType::Integer)
        .with_column(columns::RATING_AVG, ColumnType::Real)
        .with_column("rating-count", ColumnType::Integer)
        .with_column("dimension-x", ColumnType::Real)
        .with_column("dimension-y", ColumnType::Real)
        .with_column("dimension-z", ColumnType::Real)
        .with_column("weight", ColumnType::Real)
        .with_column(columns::PUBLICATION_DATE, ColumnType::Datetime)
        .with_column("index-date", ColumnType::Datetime)
}

/// Load a schema from a JSON object of `column -> type`.
pub fn load_book_schema(path: &Path) -> Result<BookSchema> {
    let contents = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let schema: BookSchema =
        serde_json::from_str(&contents).map_err(|source| SchemaError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    schema.validate()
}
