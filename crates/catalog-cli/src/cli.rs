//! CLI argument definitions for the catalog statistics tool.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "catalog-stats",
    version,
    about = "Normalize a book catalog export and print catalog statistics",
    long_about = "Normalize a denormalized book catalog export against its author,\n\
                  category and format lookups, then print descriptive statistics.\n\n\
                  Optionally writes the normalized table (CSV) and the report (JSON)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize a catalog data folder and print its statistics.
    Run(RunArgs),

    /// Print the column schema used for type coercion.
    Schema(SchemaArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Folder containing dataset.csv, authors.csv, categories.csv and formats.csv.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// JSON schema file (column name to type) replacing the built-in book schema.
    #[arg(long = "schema", value_name = "JSON")]
    pub schema: Option<PathBuf>,

    /// Output directory for exported files (default: <DATA_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Count books whose average rating is strictly above this value.
    #[arg(long = "rating-threshold", value_name = "RATING", default_value_t = 3.5)]
    pub rating_threshold: f64,

    /// Count books published strictly after this day (YYYY-MM-DD).
    #[arg(
        long = "after-date",
        value_name = "DATE",
        default_value = "2020-01-01",
        value_parser = parse_day
    )]
    pub after_date: NaiveDate,

    /// Number of categories shown in the top categories table.
    #[arg(long = "top-categories", value_name = "N", default_value_t = 5)]
    pub top_categories: usize,

    /// Print statistics without writing the normalized CSV or the JSON report.
    #[arg(long = "no-export")]
    pub no_export: bool,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// JSON schema file to validate and print instead of the built-in schema.
    #[arg(long = "schema", value_name = "JSON")]
    pub schema: Option<PathBuf>,

    /// Print the schema as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_day(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|error| format!("expected YYYY-MM-DD: {error}"))
}
