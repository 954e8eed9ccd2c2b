use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use amos_model::{DateRange, ValidationStatus};
use amos_report::FilterSummary;
use amos_validate::Decision;

use amos_cli::types::{BatchResult, RunResult};

pub fn print_summary(result: &RunResult) {
    let summary = &result.summary;
    println!("Work package: {}", summary.work_package);
    println!("Source: {}", summary.source.display());
    match &result.paths {
        Some(paths) => {
            println!("Annotated: {}", paths.annotated.display());
            println!("Summary: {}", paths.summary.display());
        }
        None => println!("Dry run: no files written"),
    }
    if let Some(entry) = &result.logbook {
        println!("Logbook: record {}", entry.order);
    }
    print_filter_table(&summary.filter);

    let stats = &summary.stats;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Status"),
        header_cell("Rows"),
        header_cell("Share"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for status in ValidationStatus::ALL {
        let count = stats.count(status);
        table.add_row(vec![
            status_cell(status),
            count_cell(count, status_color(status)),
            dim_cell(share(count, stats.out_rows)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.out_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");

    println!(
        "Errors: {} of {} rows ({:.2}%), {} auto-valid by sequence code",
        stats.total_errors, stats.out_rows, stats.error_rate, stats.seq_auto_valid
    );
}

/// One row per work package of a batch, failures last.
pub fn print_batch_summary(batch: &BatchResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows"),
        header_cell("Errors"),
        header_cell("Error rate"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 4, CellAlignment::Center);
    for run in &batch.runs {
        let stats = &run.summary.stats;
        table.add_row(vec![
            Cell::new(&run.summary.work_package),
            Cell::new(stats.out_rows),
            count_cell(stats.total_errors, Color::Red),
            Cell::new(format!("{:.2}%", stats.error_rate)),
            Cell::new("ok").fg(Color::Green),
        ]);
    }
    for failure in &batch.failures {
        let name = failure
            .path
            .file_name()
            .map_or_else(|| failure.path.display().to_string(), |name| {
                name.to_string_lossy().into_owned()
            });
        table.add_row(vec![
            Cell::new(name),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            Cell::new("failed")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        ]);
    }
    println!("{table}");

    let total = batch.runs.len() + batch.failures.len();
    println!(
        "Processed {total} work packages: {} succeeded, {} failed",
        batch.runs.len(),
        batch.failures.len()
    );
    for failure in &batch.failures {
        eprintln!("error: {:#}", failure.error);
    }
}

fn print_filter_table(filter: &FilterSummary) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Date filter"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("User range"), range_cell(filter.user_range)]);
    table.add_row(vec![Cell::new("File range"), range_cell(filter.file_range)]);
    let effective = match filter.effective_range {
        Some(range) if range.is_empty() => Cell::new(range).fg(Color::Yellow),
        Some(range) => Cell::new(range),
        None => dim_cell("-"),
    };
    table.add_row(vec![Cell::new("Effective range"), effective]);
    table.add_row(vec![Cell::new("Rows read"), Cell::new(filter.total)]);
    table.add_row(vec![Cell::new("Rows kept"), Cell::new(filter.kept)]);
    table.add_row(vec![
        Cell::new("Removed before"),
        count_cell(filter.removed_before, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Removed after"),
        count_cell(filter.removed_after, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Undated"),
        count_cell(filter.undated, Color::Yellow),
    ]);
    println!("{table}");
    if filter.range_disjoint {
        eprintln!("warning: requested date range does not overlap the work package");
    }
}

/// Print one explained classification.
pub fn print_decision(text: &str, normalized: &str, decision: &Decision) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Text"), Cell::new(text)]);
    table.add_row(vec![Cell::new("Normalized"), Cell::new(normalized)]);
    table.add_row(vec![Cell::new("Status"), status_cell(decision.status)]);
    table.add_row(vec![Cell::new("Step"), Cell::new(decision.step)]);
    table.add_row(vec![
        Cell::new("Rule"),
        match decision.rule.as_deref() {
            Some(rule) => Cell::new(rule),
            None => dim_cell("-"),
        },
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn status_cell(status: ValidationStatus) -> Cell {
    let cell = Cell::new(status).fg(status_color(status));
    if status.is_error() {
        cell.add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn status_color(status: ValidationStatus) -> Color {
    match status {
        ValidationStatus::Valid => Color::Green,
        ValidationStatus::NotApplicable => Color::DarkGrey,
        ValidationStatus::MissingReference => Color::Red,
        ValidationStatus::MissingReferenceType => Color::Magenta,
        ValidationStatus::MissingRevision => Color::Yellow,
    }
}

fn range_cell(range: Option<DateRange>) -> Cell {
    match range {
        Some(range) => Cell::new(range),
        None => dim_cell("-"),
    }
}

fn share(count: usize, total: usize) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", count as f64 / total as f64 * 100.0)
}
