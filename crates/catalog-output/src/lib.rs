//! Output generation for catalog runs.
//!
//! - [`write_normalized_csv`]: the normalized table as `normalized_books.csv`
//! - [`write_report_json`]: the analysis report as `analysis_report.json`

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use catalog_model::AnalysisReport;
use catalog_normalize::{NormalizationStats, NormalizedTable};
use chrono::Utc;
use polars::prelude::{CsvWriter, SerWriter};
use serde::Serialize;
use tracing::info;

pub const NORMALIZED_CSV_FILE: &str = "normalized_books.csv";
pub const REPORT_JSON_FILE: &str = "analysis_report.json";

const REPORT_SCHEMA: &str = "catalog.analysis-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

/// Which artifacts a run writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    pub normalized_csv: bool,
    pub report_json: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            normalized_csv: true,
            report_json: true,
        }
    }
}

#[derive(Debug, Serialize)]
struct ReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    normalization: &'a NormalizationStats,
    analysis: &'a AnalysisReport,
}

/// Create the output directory if needed.
pub fn ensure_output_dir(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir.to_path_buf())
}

/// Write the normalized table as CSV with a header row.
pub fn write_normalized_csv(output_dir: &Path, table: &NormalizedTable) -> Result<PathBuf> {
    let dir = ensure_output_dir(output_dir)?;
    let path = dir.join(NORMALIZED_CSV_FILE);
    let mut file =
        File::create(&path).with_context(|| format!("create {}", path.display()))?;
    // The writer needs a mutable frame; the table itself stays untouched.
    let mut data = table.data().clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut data)
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), rows = data.height(), "wrote normalized catalog");
    Ok(path)
}

/// Write the analysis report, with the normalization counters, as pretty JSON.
pub fn write_report_json(
    output_dir: &Path,
    report: &AnalysisReport,
    stats: &NormalizationStats,
) -> Result<PathBuf> {
    let dir = ensure_output_dir(output_dir)?;
    let path = dir.join(REPORT_JSON_FILE);
    let payload = ReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        normalization: stats,
        analysis: report,
    };
    let json = serde_json::to_string_pretty(&payload)?;
    fs::write(&path, format!("{json}\n")).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "wrote analysis report");
    Ok(path)
}

/// Write every artifact enabled in `options`, returning the written paths.
pub fn write_outputs(
    output_dir: &Path,
    table: &NormalizedTable,
    report: &AnalysisReport,
    options: OutputOptions,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    if options.normalized_csv {
        written.push(write_normalized_csv(output_dir, table)?);
    }
    if options.report_json {
        written.push(write_report_json(output_dir, report, table.stats())?);
    }
    Ok(written)
}
