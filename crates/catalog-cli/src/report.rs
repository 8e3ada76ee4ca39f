//! Terminal rendering of a catalog run.
//!
//! All presentation choices (table presets, widths, row limits and text
//! truncation) live here; the analysis results carry none.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use catalog_model::{BookSchema, SENTINEL_ID};

use crate::types::RunResult;

const TABLE_WIDTH: u16 = 120;
const MAX_TITLE_CHARS: usize = 60;
const MAX_CATEGORY_ROWS: usize = 25;

pub fn print_report(result: &RunResult) {
    println!("{}", render_report(result));
}

/// The full report as printed by `run`.
pub fn render_report(result: &RunResult) -> String {
    let report = &result.report;
    let mut sections = vec![format!("Catalog: {}", result.data_dir.display())];
    sections.push(summary_table(result).to_string());

    sections.push("Top authors".to_string());
    let mut authors = Table::new();
    authors.set_header(vec![header_cell("Author ID"), header_cell("Author"), header_cell("Books")]);
    apply_table_style(&mut authors);
    align_column(&mut authors, 2, CellAlignment::Right);
    for author in &report.top_authors {
        authors.add_row(vec![
            Cell::new(author.author_id),
            name_cell(author.author_name.as_deref()),
            Cell::new(author.book_count),
        ]);
    }
    sections.push(authors.to_string());

    sections.push(format!("Top {} categories", report.top_categories.len()));
    let mut top_categories = Table::new();
    top_categories.set_header(vec![header_cell("Category"), header_cell("Books")]);
    apply_table_style(&mut top_categories);
    align_column(&mut top_categories, 1, CellAlignment::Right);
    for category in &report.top_categories {
        top_categories.add_row(vec![
            name_cell(category.category_name.as_deref()),
            Cell::new(category.book_count),
        ]);
    }
    sections.push(top_categories.to_string());

    sections.push("Books by category".to_string());
    let mut categories = Table::new();
    categories.set_header(vec![header_cell("Category"), header_cell("Books")]);
    apply_table_style(&mut categories);
    align_column(&mut categories, 1, CellAlignment::Right);
    for category in report.books_by_category.iter().take(MAX_CATEGORY_ROWS) {
        categories.add_row(vec![
            name_cell(category.category_name.as_deref()),
            Cell::new(category.book_count),
        ]);
    }
    let hidden = report.books_by_category.len().saturating_sub(MAX_CATEGORY_ROWS);
    if hidden > 0 {
        categories.add_row(vec![dim_cell(format!("... {hidden} more")), dim_cell("")]);
    }
    sections.push(categories.to_string());

    sections.push("Most common format".to_string());
    let mut format = Table::new();
    format.set_header(vec![header_cell("Format ID"), header_cell("Format"), header_cell("Books")]);
    apply_table_style(&mut format);
    align_column(&mut format, 2, CellAlignment::Right);
    match &report.most_common_format {
        Some(entry) => {
            format.add_row(vec![
                id_cell(entry.format_id),
                name_cell(entry.format_name.as_deref()),
                Cell::new(entry.book_count),
            ]);
        }
        None => {
            format.add_row(vec![dim_cell("-"), dim_cell("no books"), dim_cell("-")]);
        }
    }
    sections.push(format.to_string());

    sections.push("Top 10 by bestsellers-rank".to_string());
    let mut bestsellers = Table::new();
    bestsellers.set_header(vec![header_cell("ID"), header_cell("Title"), header_cell("Rank")]);
    apply_table_style(&mut bestsellers);
    align_column(&mut bestsellers, 2, CellAlignment::Right);
    for entry in &report.top_bestsellers {
        bestsellers.add_row(vec![
            Cell::new(entry.id),
            title_cell(entry.title.as_deref()),
            optional_cell(entry.bestsellers_rank),
        ]);
    }
    sections.push(bestsellers.to_string());

    sections.push("Top 10 by rating-avg".to_string());
    let mut rated = Table::new();
    rated.set_header(vec![
        header_cell("ID"),
        header_cell("Title"),
        header_cell("Rating"),
        header_cell("Published"),
    ]);
    apply_table_style(&mut rated);
    align_column(&mut rated, 2, CellAlignment::Right);
    for book in &report.top_rated {
        rated.add_row(vec![
            Cell::new(book.id),
            title_cell(book.title.as_deref()),
            Cell::new(format!("{:.2}", book.rating_avg)),
            optional_cell(book.publication_date),
        ]);
    }
    sections.push(rated.to_string());

    if !result.written.is_empty() {
        let files: Vec<String> = result
            .written
            .iter()
            .map(|path| format!("- {}", path.display()))
            .collect();
        sections.push(format!("Written:\n{}", files.join("\n")));
    }
    sections.join("\n\n")
}

fn summary_table(result: &RunResult) -> Table {
    let stats = &result.stats;
    let report = &result.report;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TABLE_WIDTH);
    align_column(&mut table, 1, CellAlignment::Right);

    let rows: Vec<(String, Cell)> = vec![
        ("Input books".to_string(), Cell::new(stats.input_books)),
        ("Normalized rows".to_string(), Cell::new(stats.output_rows)),
        ("Lookup misses".to_string(), warn_count_cell(stats.lookup_misses())),
        ("Unparsable dates".to_string(), warn_count_cell(stats.dates_nulled)),
        (
            "Distinct books".to_string(),
            Cell::new(report.distinct_book_count).add_attribute(Attribute::Bold),
        ),
        (
            "Single-author books".to_string(),
            Cell::new(report.single_author_book_count),
        ),
        (
            format!("Books rated above {}", report.rating_threshold),
            Cell::new(report.books_rated_above),
        ),
        (
            format!("Books published after {}", report.published_after),
            Cell::new(report.books_published_after),
        ),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), value]);
    }
    table
}

/// The schema as a two-column table, one row per declared column.
pub fn schema_table(schema: &BookSchema) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Type")]);
    apply_table_style(&mut table);
    for (name, column_type) in schema.columns() {
        table.add_row(vec![Cell::new(name), Cell::new(column_type)]);
    }
    table
}

/// Shortens `text` to at most `max` characters, marking the cut with `…`.
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TABLE_WIDTH);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn name_cell(name: Option<&str>) -> Cell {
    match name {
        Some(name) => Cell::new(name),
        None => dim_cell("(unknown)"),
    }
}

fn title_cell(title: Option<&str>) -> Cell {
    match title {
        Some(title) => Cell::new(truncate_text(title, MAX_TITLE_CHARS)),
        None => dim_cell("-"),
    }
}

fn id_cell(id: i64) -> Cell {
    if id == SENTINEL_ID {
        dim_cell(id)
    } else {
        Cell::new(id)
    }
}

fn optional_cell<T: ToString>(value: Option<T>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn warn_count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}
