//! Report output.

use crate::types::ReportRow;
use tabled::Table;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

/// Index of the first numeric column.
const FIRST_NUMERIC_COLUMN: usize = 5;

/// Render rows as a text table with right-aligned numeric columns.
pub fn render_table(rows: &[ReportRow]) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::new(FIRST_NUMERIC_COLUMN..)).with(Alignment::right()));
    table.to_string()
}

/// Render rows as a pretty-printed JSON array.
pub fn render_json(rows: &[ReportRow]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rows)
}
