//! Library components of the catalog statistics CLI.

pub mod logging;
pub mod report;
pub mod types;
