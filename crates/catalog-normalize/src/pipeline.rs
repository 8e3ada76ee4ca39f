//! Catalog normalization pipeline with explicit, ordered stages.
//!
//! 1. **DecodeLists**: parse `authors`/`categories` list literals
//! 2. **CleanText**: collapse carriage-return runs in `description`
//! 3. **Explode**: one row per author, then per category
//! 4. **JoinLookups**: left-join authors, categories, formats
//! 5. **FillSentinels**: null reference ids become `-1`
//! 6. **ApplySchema**: numeric and date coercion
//! 7. **RenameFields**: `authors`/`categories`/`format` to `*_id`
//!
//! Each stage takes the whole table and returns a new one; the order is
//! fixed because explosion needs decoded lists and the joins need scalar
//! ids.

use std::fmt;
use std::time::Instant;

use catalog_model::columns::{
    AUTHOR_ID, AUTHORS, CATEGORIES, CATEGORY_ID, DESCRIPTION, FORMAT, FORMAT_ID, RENAMES,
};
use catalog_model::{BookSchema, default_book_schema};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use crate::coerce::apply_schema;
use crate::decode::decode_list_column;
use crate::error::Result;
use crate::explode::explode_id_column;
use crate::frame_utils::{has_column, require_column};
use crate::join::{LookupTable, left_join_lookup};
use crate::sentinel::fill_null_ids;
use crate::table::{NormalizationStats, NormalizedTable};
use crate::text::clean_text_column;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizeStage {
    DecodeLists,
    CleanText,
    Explode,
    JoinLookups,
    FillSentinels,
    ApplySchema,
    RenameFields,
}

impl NormalizeStage {
    /// Stages in execution order.
    pub const ORDERED: [Self; 7] = [
        Self::DecodeLists,
        Self::CleanText,
        Self::Explode,
        Self::JoinLookups,
        Self::FillSentinels,
        Self::ApplySchema,
        Self::RenameFields,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::DecodeLists => "decode_lists",
            Self::CleanText => "clean_text",
            Self::Explode => "explode",
            Self::JoinLookups => "join_lookups",
            Self::FillSentinels => "fill_sentinels",
            Self::ApplySchema => "apply_schema",
            Self::RenameFields => "rename_fields",
        }
    }
}

impl fmt::Display for NormalizeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The three lookup tables joined onto the book table.
#[derive(Debug, Clone, Copy)]
pub struct CatalogLookups<'a> {
    pub authors: &'a DataFrame,
    pub categories: &'a DataFrame,
    pub formats: &'a DataFrame,
}

/// Runs the normalization stages against a schema.
#[derive(Debug, Clone)]
pub struct Normalizer {
    schema: BookSchema,
    text_columns: Vec<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(default_book_schema())
    }
}

impl Normalizer {
    pub fn new(schema: BookSchema) -> Self {
        Self {
            schema,
            text_columns: vec![DESCRIPTION.to_string()],
        }
    }

    /// Columns whose carriage-return runs are collapsed (default: `description`).
    #[must_use]
    pub fn with_text_columns(mut self, columns: Vec<String>) -> Self {
        self.text_columns = columns;
        self
    }

    pub fn schema(&self) -> &BookSchema {
        &self.schema
    }

    /// Normalizes the book table against the lookups.
    ///
    /// All-or-nothing: the first fatal error aborts the run.
    pub fn normalize(
        &self,
        books: &DataFrame,
        lookups: &CatalogLookups<'_>,
    ) -> Result<NormalizedTable> {
        let span = info_span!("normalize", books = books.height());
        let _guard = span.enter();
        let started = Instant::now();

        for column in [AUTHORS, CATEGORIES, FORMAT] {
            require_column(books, "books", column)?;
        }
        require_column(lookups.authors, "authors", AUTHOR_ID)?;
        require_column(lookups.categories, "categories", CATEGORY_ID)?;
        require_column(lookups.formats, "formats", FORMAT_ID)?;

        let mut stats = NormalizationStats {
            input_books: books.height(),
            ..NormalizationStats::default()
        };
        let mut frame = books.clone();
        for stage in NormalizeStage::ORDERED {
            let stage_started = Instant::now();
            frame = self.run_stage(stage, &frame, lookups, &mut stats)?;
            debug!(
                stage = %stage,
                rows = frame.height(),
                duration_ms = stage_started.elapsed().as_millis(),
                "stage complete"
            );
        }
        stats.output_rows = frame.height();

        info!(
            input_books = stats.input_books,
            output_rows = stats.output_rows,
            lookup_misses = stats.lookup_misses(),
            dates_nulled = stats.dates_nulled,
            duration_ms = started.elapsed().as_millis(),
            "normalization complete"
        );
        Ok(NormalizedTable::new(frame, stats))
    }

    fn run_stage(
        &self,
        stage: NormalizeStage,
        frame: &DataFrame,
        lookups: &CatalogLookups<'_>,
        stats: &mut NormalizationStats,
    ) -> Result<DataFrame> {
        match stage {
            NormalizeStage::DecodeLists => {
                let decoded = decode_list_column(frame, AUTHORS)?;
                decode_list_column(&decoded, CATEGORIES)
            }
            NormalizeStage::CleanText => {
                let mut cleaned = frame.clone();
                for column in &self.text_columns {
                    if !has_column(&cleaned, column) {
                        debug!(column = %column, "text column not present, skipping");
                        continue;
                    }
                    let (next, changed) = clean_text_column(&cleaned, column)?;
                    stats.descriptions_cleaned += changed;
                    cleaned = next;
                }
                Ok(cleaned)
            }
            NormalizeStage::Explode => {
                let by_author = explode_id_column(frame, AUTHORS)?;
                explode_id_column(&by_author, CATEGORIES)
            }
            NormalizeStage::JoinLookups => {
                let authors = left_join_lookup(
                    frame,
                    AUTHORS,
                    &LookupTable::new("authors", lookups.authors, AUTHOR_ID),
                )?;
                let categories = left_join_lookup(
                    &authors.frame,
                    CATEGORIES,
                    &LookupTable::new("categories", lookups.categories, CATEGORY_ID),
                )?;
                let formats = left_join_lookup(
                    &categories.frame,
                    FORMAT,
                    &LookupTable::new("formats", lookups.formats, FORMAT_ID),
                )?;
                stats.author_misses += authors.misses;
                stats.category_misses += categories.misses;
                stats.format_misses += formats.misses;
                debug!(
                    authors = authors.misses,
                    categories = categories.misses,
                    formats = formats.misses,
                    "lookup misses"
                );
                Ok(formats.frame)
            }
            NormalizeStage::FillSentinels => {
                let (filled, count) = fill_null_ids(frame, &[AUTHORS, CATEGORIES, FORMAT])?;
                stats.sentinel_fills += count;
                Ok(filled)
            }
            NormalizeStage::ApplySchema => {
                let outcome = apply_schema(frame, &self.schema)?;
                stats.numeric_zero_fills += outcome.zero_filled;
                stats.dates_nulled += outcome.dates_nulled;
                Ok(outcome.frame)
            }
            NormalizeStage::RenameFields => {
                let mut renamed = frame.clone();
                for (from, to) in RENAMES {
                    renamed.rename(from, to.into())?;
                }
                Ok(renamed)
            }
        }
    }
}

/// Normalizes with the default book schema.
pub fn normalize(
    books: &DataFrame,
    authors: &DataFrame,
    categories: &DataFrame,
    formats: &DataFrame,
) -> Result<NormalizedTable> {
    Normalizer::default().normalize(
        books,
        &CatalogLookups {
            authors,
            categories,
            formats,
        },
    )
}
