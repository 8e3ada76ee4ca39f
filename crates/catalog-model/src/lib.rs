pub mod columns;
pub mod error;
pub mod results;
pub mod schema;

pub use columns::SENTINEL_ID;
pub use error::{Result, SchemaError};
pub use results::{
    AnalysisReport, AuthorBookCount, BestsellerEntry, CategoryBookCount, FormatBookCount,
    RatedBook,
};
pub use schema::{BookSchema, ColumnType, default_book_schema, load_book_schema};
