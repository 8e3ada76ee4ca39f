use std::path::PathBuf;

use catalog_model::AnalysisReport;
use catalog_normalize::NormalizationStats;

/// Everything a `run` produced, for the terminal report.
#[derive(Debug)]
pub struct RunResult {
    pub data_dir: PathBuf,
    pub stats: NormalizationStats,
    pub report: AnalysisReport,
    /// Exported files; empty with `--no-export`.
    pub written: Vec<PathBuf>,
}
