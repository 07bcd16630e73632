//! Table and JSON rendering for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use dated_translator::{IntervalRecord, LookupSummary, RowDiagnostic, format_date};

/// Summary of a loaded dataset as a two-column table.
pub fn summary_table(summary: &LookupSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell(&summary.dataset.display().to_string()),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![Cell::new("Records"), Cell::new(summary.records)]);
    table.add_row(vec![
        Cell::new("Skipped rows"),
        count_cell(summary.skipped_rows, Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Unique terms"), Cell::new(summary.unique_terms)]);
    table.add_row(vec![
        Cell::new("Earliest start"),
        date_cell(summary.earliest.map(format_date)),
    ]);
    table.add_row(vec![
        Cell::new("Latest end"),
        date_cell(summary.latest.map(format_date)),
    ]);
    table
}

/// Rows excluded during a lenient build.
pub fn diagnostics_table(diagnostics: &[RowDiagnostic]) -> Option<Table> {
    if diagnostics.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Line"), header_cell("Issue")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for diagnostic in diagnostics {
        table.add_row(vec![
            Cell::new(diagnostic.line),
            Cell::new(diagnostic.issue.to_string()).fg(Color::Yellow),
        ]);
    }
    Some(table)
}

/// Interval records, one per row.
pub fn records_table<'a>(records: impl IntoIterator<Item = &'a IntervalRecord>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Line"),
        header_cell("Term 1"),
        header_cell("Term 2"),
        header_cell("Start"),
        header_cell("End"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for record in records {
        table.add_row(vec![
            Cell::new(record.line()),
            Cell::new(record.term_1()),
            Cell::new(record.term_2()),
            Cell::new(format_date(record.start_date())),
            Cell::new(format_date(record.end_date())),
        ]);
    }
    table
}

/// Pretty-printed JSON for any serializable output.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn date_cell(date: Option<String>) -> Cell {
    match date {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
