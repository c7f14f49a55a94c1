//! Client-side table search and sorting.

mod compare;
mod item;
mod state;

pub use compare::{compare_cells, merge_sort_by, parse_number};
pub use item::{PAGINATION_THRESHOLD, Table, TableId};
pub use state::{
    HeaderCell, SearchInput, SortDirection, SortState, TableSortFilter, filter_rows,
};

/// Errors reported by table construction and sorting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// A data row does not have one cell per column.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Sort requested on a column the table does not have.
    #[error("column {column} out of range (table has {columns} columns)")]
    ColumnOutOfRange { column: usize, columns: usize },
}
