use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use catalog_analysis::{AnalysisOptions, run_analysis};
use catalog_ingest::{CatalogSources, load_catalog};
use catalog_model::{BookSchema, default_book_schema, load_book_schema};
use catalog_normalize::{CatalogLookups, Normalizer};
use catalog_output::{OutputOptions, write_outputs};
use tracing::{info, info_span};

use catalog_cli::report::schema_table;
use catalog_cli::types::RunResult;

use crate::cli::{RunArgs, SchemaArgs};

fn resolve_schema(path: Option<&Path>) -> Result<BookSchema> {
    match path {
        Some(path) => load_book_schema(path)
            .with_context(|| format!("load schema {}", path.display())),
        None => Ok(default_book_schema()),
    }
}

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let schema = resolve_schema(args.schema.as_deref())?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&schema)?);
    } else {
        println!("{}", schema_table(&schema));
    }
    Ok(())
}

pub fn run_catalog(args: &RunArgs) -> Result<RunResult> {
    let data_dir = &args.data_dir;
    let run_span = info_span!("run", data_dir = %data_dir.display());
    let _run_guard = run_span.enter();
    let started = Instant::now();

    // Stage 1: ingest
    let sources = CatalogSources::discover(data_dir).context("discover catalog files")?;
    let catalog = load_catalog(&sources).context("load catalog")?;
    let schema = resolve_schema(args.schema.as_deref())?;

    // Stage 2: normalize
    let table = {
        let span = info_span!("normalize_stage");
        let _guard = span.enter();
        Normalizer::new(schema)
            .normalize(
                &catalog.books,
                &CatalogLookups {
                    authors: &catalog.authors,
                    categories: &catalog.categories,
                    formats: &catalog.formats,
                },
            )
            .context("normalize catalog")?
    };

    // Stage 3: analyze
    let options = AnalysisOptions {
        rating_threshold: args.rating_threshold,
        published_after: args.after_date,
        top_categories: args.top_categories,
    };
    let report = run_analysis(&table, &options).context("analyze catalog")?;

    // Stage 4: export
    let written = if args.no_export {
        Vec::new()
    } else {
        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| data_dir.join("output"));
        write_outputs(&output_dir, &table, &report, OutputOptions::default())
            .context("write outputs")?
    };

    info!(
        books = table.stats().input_books,
        rows = table.row_count(),
        files = written.len(),
        duration_ms = started.elapsed().as_millis(),
        "run complete"
    );
    Ok(RunResult {
        data_dir: data_dir.clone(),
        stats: *table.stats(),
        report,
        written,
    })
}
