//! Result rows returned by the catalog analysis queries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorBookCount {
    pub author_id: i64,
    pub author_name: Option<String>,
    pub book_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBookCount {
    pub category_name: Option<String>,
    pub book_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatBookCount {
    pub format_id: i64,
    pub format_name: Option<String>,
    pub book_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestsellerEntry {
    pub id: i64,
    pub title: Option<String>,
    #[serde(rename = "bestsellers-rank")]
    pub bestsellers_rank: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedBook {
    pub id: i64,
    pub title: Option<String>,
    #[serde(rename = "rating-avg")]
    pub rating_avg: f64,
    #[serde(rename = "publication-date")]
    pub publication_date: Option<NaiveDate>,
}

/// Every statistic computed for one catalog run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub distinct_book_count: usize,
    pub single_author_book_count: usize,
    pub top_authors: Vec<AuthorBookCount>,
    pub books_by_category: Vec<CategoryBookCount>,
    pub top_categories: Vec<CategoryBookCount>,
    pub most_common_format: Option<FormatBookCount>,
    pub top_bestsellers: Vec<BestsellerEntry>,
    pub top_rated: Vec<RatedBook>,
    pub rating_threshold: f64,
    pub books_rated_above: usize,
    pub published_after: NaiveDate,
    pub books_published_after: usize,
}
