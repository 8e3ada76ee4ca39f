//! The fixed query set over a normalized catalog.
//!
//! All queries are read-only and operate on the exploded table, so any
//! "distinct" count dedupes across the (book, author, category) fan-out.
//! Groups are formed in first-seen order and every ranking sort keeps
//! that order for ties.

use catalog_model::columns::{
    AUTHOR_ID, AUTHOR_NAME, BESTSELLERS_RANK, CATEGORY_NAME, FORMAT_ID, FORMAT_NAME, ID,
    PUBLICATION_DATE, RATING_AVG, TITLE,
};
use catalog_model::{
    AuthorBookCount, BestsellerEntry, CategoryBookCount, FormatBookCount, RatedBook, SENTINEL_ID,
};
use catalog_normalize::{NormalizedTable, days_from_date};
use chrono::NaiveDate;
use polars::prelude::{
    DataFrame, DataType, Expr, IdxSize, IntoLazy, LazyFrame, SortMultipleOptions,
    UniqueKeepStrategy, col, lit,
};

use crate::error::Result;
use crate::frame::{
    column, count_values, date_values, f64_values, i64_values, require_columns, str_values,
};

const TOP_AUTHORS: IdxSize = 5;
const TOP_BESTSELLERS: IdxSize = 10;
const TOP_RATED: IdxSize = 10;

/// Aggregated column holding distinct-id or row counts.
const BOOK_COUNT: &str = "book_count";
const AUTHOR_COUNT: &str = "author_count";

/// Descending, nulls first, ties in input order.
fn descending() -> SortMultipleOptions {
    SortMultipleOptions::default()
        .with_order_descending(true)
        .with_maintain_order(true)
}

/// Number of distinct rows of `plan` over `keys`.
fn distinct_rows(plan: LazyFrame, keys: Vec<Expr>) -> Result<usize> {
    Ok(plan
        .select(keys)
        .unique(None, UniqueKeepStrategy::Any)
        .collect()?
        .height())
}

/// Read-only view running the catalog statistics.
#[derive(Debug, Clone, Copy)]
pub struct CatalogAnalyzer<'a> {
    data: &'a DataFrame,
}

impl<'a> CatalogAnalyzer<'a> {
    pub fn new(table: &'a NormalizedTable) -> Self {
        Self {
            data: table.data(),
        }
    }

    /// Builds an analyzer over a frame that already has the normalized layout.
    pub fn from_frame(data: &'a DataFrame) -> Self {
        Self { data }
    }

    fn plan(&self) -> LazyFrame {
        self.data.clone().lazy()
    }

    /// Number of distinct value tuples over `columns`.
    ///
    /// With no columns every row is the same empty tuple.
    pub fn distinct_book_count(&self, columns: &[&str]) -> Result<usize> {
        for name in columns {
            column(self.data, name)?;
        }
        if columns.is_empty() {
            return Ok(usize::from(self.data.height() > 0));
        }
        let keys = columns.iter().map(|name| col(*name)).collect();
        distinct_rows(self.plan(), keys)
    }

    /// Books (by id and title) with at most one non-null author row.
    ///
    /// This counts exploded rows, so a single-author book listed in two
    /// categories has two author rows and is not counted.
    pub fn single_author_book_count(&self) -> Result<usize> {
        require_columns(
            self.data,
            &[
                (ID, DataType::Int64),
                (TITLE, DataType::String),
                (AUTHOR_ID, DataType::Int64),
            ],
        )?;
        let books = self
            .plan()
            .group_by([col(ID), col(TITLE)])
            .agg([col(AUTHOR_ID).count().alias(AUTHOR_COUNT)])
            .filter(col(AUTHOR_COUNT).lt_eq(lit(1)))
            .collect()?;
        Ok(books.height())
    }

    /// The five authors with the most distinct books, sentinel excluded.
    pub fn top_five_authors(&self) -> Result<Vec<AuthorBookCount>> {
        require_columns(
            self.data,
            &[
                (ID, DataType::Int64),
                (AUTHOR_ID, DataType::Int64),
                (AUTHOR_NAME, DataType::String),
            ],
        )?;
        let ranked = self
            .plan()
            .filter(col(AUTHOR_ID).neq(lit(SENTINEL_ID)))
            .group_by_stable([col(AUTHOR_ID), col(AUTHOR_NAME)])
            .agg([col(ID).n_unique().alias(BOOK_COUNT)])
            .sort([BOOK_COUNT], descending())
            .limit(TOP_AUTHORS)
            .collect()?;

        let author_ids = i64_values(&ranked, AUTHOR_ID)?;
        let author_names = str_values(&ranked, AUTHOR_NAME)?;
        let counts = count_values(&ranked, BOOK_COUNT)?;
        Ok(author_ids
            .into_iter()
            .zip(author_names)
            .zip(counts)
            .filter_map(|((author_id, author_name), book_count)| {
                Some(AuthorBookCount {
                    author_id: author_id?,
                    author_name,
                    book_count,
                })
            })
            .collect())
    }

    /// Distinct books per category name, largest first. Books whose
    /// category did not resolve are grouped under a null name.
    pub fn book_count_by_category(&self) -> Result<Vec<CategoryBookCount>> {
        require_columns(
            self.data,
            &[(ID, DataType::Int64), (CATEGORY_NAME, DataType::String)],
        )?;
        let ranked = self
            .plan()
            .group_by_stable([col(CATEGORY_NAME)])
            .agg([col(ID).n_unique().alias(BOOK_COUNT)])
            .sort([BOOK_COUNT], descending())
            .collect()?;

        let names = str_values(&ranked, CATEGORY_NAME)?;
        let counts = count_values(&ranked, BOOK_COUNT)?;
        Ok(names
            .into_iter()
            .zip(counts)
            .map(|(category_name, book_count)| CategoryBookCount {
                category_name,
                book_count,
            })
            .collect())
    }

    /// The format with the most distinct books. `None` on an empty table.
    pub fn most_common_book_format(&self) -> Result<Option<FormatBookCount>> {
        require_columns(
            self.data,
            &[
                (ID, DataType::Int64),
                (FORMAT_ID, DataType::Int64),
                (FORMAT_NAME, DataType::String),
            ],
        )?;
        let ranked = self
            .plan()
            .group_by_stable([col(FORMAT_ID), col(FORMAT_NAME)])
            .agg([col(ID).n_unique().alias(BOOK_COUNT)])
            .sort([BOOK_COUNT], descending())
            .limit(1)
            .collect()?;

        let format_ids = i64_values(&ranked, FORMAT_ID)?;
        let format_names = str_values(&ranked, FORMAT_NAME)?;
        let counts = count_values(&ranked, BOOK_COUNT)?;
        Ok(format_ids
            .into_iter()
            .zip(format_names)
            .zip(counts)
            .next()
            .map(|((format_id, format_name), book_count)| FormatBookCount {
                format_id: format_id.unwrap_or(SENTINEL_ID),
                format_name,
                book_count,
            }))
    }

    /// First row per id, sorted by `bestsellers-rank` descending, top ten.
    ///
    /// Descending means the *largest* rank numbers come first.
    pub fn top_ten_bestsellers(&self) -> Result<Vec<BestsellerEntry>> {
        require_columns(
            self.data,
            &[
                (ID, DataType::Int64),
                (TITLE, DataType::String),
                (BESTSELLERS_RANK, DataType::Int64),
            ],
        )?;
        let ranked = self
            .plan()
            .filter(col(ID).is_not_null())
            .group_by_stable([col(ID)])
            .agg([col(TITLE).first(), col(BESTSELLERS_RANK).first()])
            .sort([BESTSELLERS_RANK], descending())
            .limit(TOP_BESTSELLERS)
            .collect()?;

        let ids = i64_values(&ranked, ID)?;
        let titles = str_values(&ranked, TITLE)?;
        let ranks = i64_values(&ranked, BESTSELLERS_RANK)?;
        Ok(ids
            .into_iter()
            .zip(titles)
            .zip(ranks)
            .filter_map(|((id, title), bestsellers_rank)| {
                Some(BestsellerEntry {
                    id: id?,
                    title,
                    bestsellers_rank,
                })
            })
            .collect())
    }

    /// Best-rated row per title, sorted by rating then publication date
    /// (both descending), top ten.
    ///
    /// Within a title the first row carrying the highest rating wins.
    pub fn top_ten_rating_avg(&self) -> Result<Vec<RatedBook>> {
        require_columns(
            self.data,
            &[
                (ID, DataType::Int64),
                (TITLE, DataType::String),
                (RATING_AVG, DataType::Float64),
                (PUBLICATION_DATE, DataType::Date),
            ],
        )?;
        let best_row = |name: &str| {
            col(name)
                .sort_by([col(RATING_AVG)], descending())
                .first()
        };
        let ranked = self
            .plan()
            .filter(col(RATING_AVG).is_not_null())
            .group_by_stable([col(TITLE)])
            .agg([best_row(ID), best_row(RATING_AVG), best_row(PUBLICATION_DATE)])
            .sort(
                [RATING_AVG, PUBLICATION_DATE],
                SortMultipleOptions::default()
                    .with_order_descending_multi([true, true])
                    .with_maintain_order(true),
            )
            .limit(TOP_RATED)
            .collect()?;

        let ids = i64_values(&ranked, ID)?;
        let titles = str_values(&ranked, TITLE)?;
        let ratings = f64_values(&ranked, RATING_AVG)?;
        let dates = date_values(&ranked, PUBLICATION_DATE)?;
        Ok(ids
            .into_iter()
            .zip(titles)
            .zip(ratings)
            .zip(dates)
            .filter_map(|(((id, title), rating_avg), publication_date)| {
                Some(RatedBook {
                    id: id?,
                    title,
                    rating_avg: rating_avg?,
                    publication_date,
                })
            })
            .collect())
    }

    /// Distinct ids with `rating-avg` strictly above `threshold`.
    pub fn book_count_with_rating_above(&self, threshold: f64) -> Result<usize> {
        require_columns(
            self.data,
            &[(ID, DataType::Int64), (RATING_AVG, DataType::Float64)],
        )?;
        distinct_rows(
            self.plan().filter(col(RATING_AVG).gt(lit(threshold))),
            vec![col(ID)],
        )
    }

    /// Distinct (id, title, publication date) tuples published strictly
    /// after the given day. Rows without a date never match.
    pub fn book_count_after_date(&self, after: NaiveDate) -> Result<usize> {
        require_columns(
            self.data,
            &[
                (ID, DataType::Int64),
                (TITLE, DataType::String),
                (PUBLICATION_DATE, DataType::Date),
            ],
        )?;
        let cutoff = lit(days_from_date(after)).cast(DataType::Date);
        distinct_rows(
            self.plan().filter(col(PUBLICATION_DATE).gt(cutoff)),
            vec![col(ID), col(TITLE), col(PUBLICATION_DATE)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, NamedFrom, Series};

    fn frame(columns: Vec<Column>) -> DataFrame {
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn category_ties_keep_first_seen_order() {
        let df = frame(vec![
            Series::new("id".into(), vec![1i64, 2, 3, 4, 1]).into(),
            Series::new(
                "category_name".into(),
                vec![Some("b"), Some("a"), Some("c"), Some("c"), Some("b")],
            )
            .into(),
        ]);

        let ranked = CatalogAnalyzer::from_frame(&df)
            .book_count_by_category()
            .unwrap();
        let pairs: Vec<(Option<String>, usize)> = ranked
            .into_iter()
            .map(|row| (row.category_name, row.book_count))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (Some("c".to_string()), 2),
                (Some("b".to_string()), 1),
                (Some("a".to_string()), 1),
            ]
        );
    }

    #[test]
    fn null_ranks_sort_ahead_of_values() {
        let df = frame(vec![
            Series::new("id".into(), vec![1i64, 2, 3, 4]).into(),
            Series::new("title".into(), vec!["w", "x", "y", "z"]).into(),
            Series::new("bestsellers-rank".into(), vec![Some(2i64), None, Some(5), Some(1)])
                .into(),
        ]);

        let ranks: Vec<Option<i64>> = CatalogAnalyzer::from_frame(&df)
            .top_ten_bestsellers()
            .unwrap()
            .into_iter()
            .map(|entry| entry.bestsellers_rank)
            .collect();
        assert_eq!(ranks, vec![None, Some(5), Some(2), Some(1)]);
    }

    #[test]
    fn distinct_count_over_no_columns() {
        let df = frame(vec![Series::new("id".into(), vec![1i64, 2]).into()]);
        assert_eq!(CatalogAnalyzer::from_frame(&df).distinct_book_count(&[]).unwrap(), 1);
    }
}
