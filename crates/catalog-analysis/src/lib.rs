//! Descriptive statistics over a normalized book catalog.
//!
//! [`CatalogAnalyzer`] exposes each query on its own; [`run_analysis`]
//! runs the whole set with [`AnalysisOptions`] and returns an
//! [`AnalysisReport`](catalog_model::AnalysisReport).

mod frame;
mod error;
mod queries;
mod report;

pub use error::{AnalysisError, Result};
pub use queries::CatalogAnalyzer;
pub use report::{AnalysisOptions, run_analysis};
