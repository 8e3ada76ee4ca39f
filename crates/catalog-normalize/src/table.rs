//! The normalized catalog table handed to the analysis queries.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Counters collected while normalizing. None of these are errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationStats {
    pub input_books: usize,
    pub output_rows: usize,
    pub descriptions_cleaned: usize,
    pub author_misses: usize,
    pub category_misses: usize,
    pub format_misses: usize,
    pub sentinel_fills: usize,
    pub numeric_zero_fills: usize,
    pub dates_nulled: usize,
}

impl NormalizationStats {
    pub fn lookup_misses(&self) -> usize {
        self.author_misses + self.category_misses + self.format_misses
    }
}

/// One row per (book, author, category), fully materialized and read-only.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    data: DataFrame,
    stats: NormalizationStats,
}

impl NormalizedTable {
    pub(crate) fn new(data: DataFrame, stats: NormalizationStats) -> Self {
        Self { data, stats }
    }

    /// Wraps a frame that already has the normalized layout.
    pub fn from_frame(data: DataFrame) -> Self {
        let stats = NormalizationStats {
            output_rows: data.height(),
            ..NormalizationStats::default()
        };
        Self { data, stats }
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn stats(&self) -> &NormalizationStats {
        &self.stats
    }

    /// Number of exploded rows (not distinct books).
    pub fn row_count(&self) -> usize {
        self.data.height()
    }

    pub fn into_frame(self) -> DataFrame {
        self.data
    }
}
