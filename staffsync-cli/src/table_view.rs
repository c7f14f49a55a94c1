//! The `table` command: load a JSON table, sort and search it, print it.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use staffsync_ui::table::{Table, TableSortFilter};

use crate::error::CliError;

const COLUMN_GAP: &str = "  ";

/// Options for rendering a table file.
#[derive(Debug, Default, Clone)]
pub struct TableOptions {
    pub filter: Option<String>,
    /// Column clicks, applied in order.
    pub sort: Vec<usize>,
    pub csv: bool,
}

pub fn load(path: &Path) -> Result<Table, CliError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Apply the sort clicks and search query, then render the visible rows.
pub fn render(mut table: Table, options: &TableOptions) -> Result<String, CliError> {
    let mut controls = TableSortFilter::new();
    controls.attach_sort(&table);
    controls.attach_search(&table);

    for &column in &options.sort {
        let direction = controls.sort(&mut table, column)?;
        log::debug!("Sorted column {} {:?}", column, direction);
    }

    let query = options.filter.as_deref().unwrap_or("");
    let visible = controls.filter(query, &table);
    let rows: Vec<&Vec<String>> = table
        .rows()
        .iter()
        .zip(&visible)
        .filter_map(|(row, shown)| shown.then_some(row))
        .collect();

    if options.csv {
        let filtered = Table::new(table.columns().to_vec(), rows.into_iter().cloned())?;
        return Ok(format!("{}\n", filtered.to_csv()));
    }

    let mut out = align(table.columns(), &rows);
    if table.needs_pagination() {
        let shown = visible.iter().filter(|v| **v).count();
        let _ = writeln!(out, "({} of {} rows shown)", shown, table.len());
    }
    Ok(out)
}

fn align(columns: &[String], rows: &[&Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        let _ = writeln!(out, "{}", padded.join(COLUMN_GAP).trim_end());
    };

    line(columns);
    for row in rows {
        line(row);
    }
    out
}
