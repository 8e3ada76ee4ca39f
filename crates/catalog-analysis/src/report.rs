//! Runs the full query battery into an [`AnalysisReport`].

use std::time::Instant;

use catalog_model::AnalysisReport;
use catalog_model::columns::ID;
use catalog_normalize::NormalizedTable;
use chrono::NaiveDate;
use tracing::{debug, info_span};

use crate::error::Result;
use crate::queries::CatalogAnalyzer;

/// Parameters of the report queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisOptions {
    pub rating_threshold: f64,
    pub published_after: NaiveDate,
    /// How many categories to keep in [`AnalysisReport::top_categories`].
    pub top_categories: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            rating_threshold: 3.5,
            published_after: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            top_categories: 5,
        }
    }
}

pub fn run_analysis(table: &NormalizedTable, options: &AnalysisOptions) -> Result<AnalysisReport> {
    let span = info_span!("analysis", rows = table.row_count());
    let _guard = span.enter();
    let started = Instant::now();
    let analyzer = CatalogAnalyzer::new(table);

    let books_by_category = analyzer.book_count_by_category()?;
    let top_categories = books_by_category
        .iter()
        .take(options.top_categories)
        .cloned()
        .collect();

    let report = AnalysisReport {
        distinct_book_count: analyzer.distinct_book_count(&[ID])?,
        single_author_book_count: analyzer.single_author_book_count()?,
        top_authors: analyzer.top_five_authors()?,
        books_by_category,
        top_categories,
        most_common_format: analyzer.most_common_book_format()?,
        top_bestsellers: analyzer.top_ten_bestsellers()?,
        top_rated: analyzer.top_ten_rating_avg()?,
        rating_threshold: options.rating_threshold,
        books_rated_above: analyzer.book_count_with_rating_above(options.rating_threshold)?,
        published_after: options.published_after,
        books_published_after: analyzer.book_count_after_date(options.published_after)?,
    };

    debug!(
        distinct_books = report.distinct_book_count,
        categories = report.books_by_category.len(),
        duration_ms = started.elapsed().as_millis(),
        "analysis complete"
    );
    Ok(report)
}
