//! The table value that sorting and filtering operate on.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Deserialize;

use super::TableError;

/// Tables with more rows than this (header included) are worth paginating.
pub const PAGINATION_THRESHOLD: usize = 20;

/// Unique identifier for a table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// A rectangular grid of text cells: one header row plus data rows.
///
/// The table is the single source of truth for its contents. Sorting permutes
/// `rows` in place; filtering never touches it and instead produces a
/// visibility vector (see [`filter_rows`](super::filter_rows)).
///
/// Every row has exactly as many cells as there are columns. Clones keep the
/// same [`TableId`] and therefore share sort state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    id: TableId,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

#[derive(Deserialize)]
struct RawTable {
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<String>>,
}

impl TryFrom<RawTable> for Table {
    type Error = TableError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        Table::new(raw.columns, raw.rows)
    }
}

impl Table {
    /// Create a table, checking that every row matches the header width.
    pub fn new<C, R, S>(columns: C, rows: R) -> Result<Self, TableError>
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != columns.len())
        {
            return Err(TableError::RaggedRow {
                row,
                expected: columns.len(),
                found: cells.len(),
            });
        }

        Ok(Self {
            id: TableId::new(),
            columns,
            rows,
        })
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows in their current display order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub(super) fn rows_mut(&mut self) -> &mut Vec<Vec<String>> {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell text at `column` of every data row, in display order.
    pub fn column_values(&self, column: usize) -> Option<Vec<&str>> {
        if column >= self.columns.len() {
            return None;
        }
        Some(self.rows.iter().map(|row| row[column].as_str()).collect())
    }

    /// Whether the table is long enough to warrant pagination.
    pub fn needs_pagination(&self) -> bool {
        self.rows.len() + 1 > PAGINATION_THRESHOLD
    }

    /// Export header and rows as comma-separated lines.
    ///
    /// Cells are trimmed but not quoted.
    pub fn to_csv(&self) -> String {
        std::iter::once(&self.columns)
            .chain(self.rows.iter())
            .map(|cells| {
                cells
                    .iter()
                    .map(|c| c.trim())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
