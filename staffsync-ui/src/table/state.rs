//! Search and single-column sort bound to tables.

use std::collections::HashMap;

use super::compare::{compare_cells, merge_sort_by};
use super::item::{Table, TableId};
use super::TableError;

/// Direction of a column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Per-table sort state.
///
/// The direction is shared by all columns of a table: every sort flips it,
/// whichever column was clicked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub last_sorted_column: Option<usize>,
    pub direction: Option<SortDirection>,
}

impl SortState {
    /// Direction the next sort will use.
    pub fn next_direction(&self) -> SortDirection {
        match self.direction {
            Some(direction) => direction.toggled(),
            None => SortDirection::Ascending,
        }
    }
}

/// A search box mounted next to a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    pub placeholder: String,
    pub query: String,
}

/// A header cell after sorting has been attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub index: usize,
    pub label: String,
    /// Clicking this header sorts by its column.
    pub interactive: bool,
}

#[derive(Debug, Default)]
struct Attachment {
    sort: SortState,
    search: Option<SearchInput>,
    sortable: bool,
}

/// Compute row visibility for a search query.
///
/// A data row is visible when any of its cells contains `query`, ignoring
/// case. The empty query shows every row.
pub fn filter_rows(table: &Table, query: &str) -> Vec<bool> {
    let needle = query.to_lowercase();
    table
        .rows()
        .iter()
        .map(|row| row.iter().any(|cell| cell.to_lowercase().contains(&needle)))
        .collect()
}

/// Attaches search and sorting to tables.
///
/// Holds the per-table state in a side table keyed by [`TableId`]. The
/// tables themselves are only touched by [`sort`](Self::sort), which
/// reorders their rows.
#[derive(Debug, Default)]
pub struct TableSortFilter {
    attached: HashMap<TableId, Attachment>,
}

impl TableSortFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a search input for `table` and return it.
    ///
    /// Attaching twice returns the existing input.
    pub fn attach_search(&mut self, table: &Table) -> &mut SearchInput {
        log::debug!("Attaching search to {}", table.id());
        self.attached
            .entry(table.id())
            .or_default()
            .search
            .get_or_insert_with(|| SearchInput {
                placeholder: "Search...".to_string(),
                query: String::new(),
            })
    }

    /// The search input attached to a table, if any.
    pub fn search(&self, table_id: TableId) -> Option<&SearchInput> {
        self.attached.get(&table_id)?.search.as_ref()
    }

    /// Record `query` as the table's search text and return row visibility.
    pub fn filter(&mut self, query: &str, table: &Table) -> Vec<bool> {
        if let Some(search) = self
            .attached
            .get_mut(&table.id())
            .and_then(|a| a.search.as_mut())
        {
            search.query = query.to_string();
        }
        filter_rows(table, query)
    }

    /// Make every header of `table` trigger a sort on its column.
    pub fn attach_sort(&mut self, table: &Table) -> Vec<HeaderCell> {
        log::debug!("Attaching sort to {}", table.id());
        self.attached.entry(table.id()).or_default().sortable = true;
        table
            .columns()
            .iter()
            .enumerate()
            .map(|(index, label)| HeaderCell {
                index,
                label: label.clone(),
                interactive: true,
            })
            .collect()
    }

    pub fn is_sortable(&self, table_id: TableId) -> bool {
        self.attached.get(&table_id).is_some_and(|a| a.sortable)
    }

    /// Sort `table` by `column`, flipping the table's direction.
    ///
    /// The first sort of a table is ascending. Descending order is the exact
    /// reverse of the ascending order, so ties keep their relative order when
    /// ascending and reverse it when descending. A table with no data rows is
    /// left unchanged, but its direction still flips.
    pub fn sort(&mut self, table: &mut Table, column: usize) -> Result<SortDirection, TableError> {
        if column >= table.columns().len() {
            return Err(TableError::ColumnOutOfRange {
                column,
                columns: table.columns().len(),
            });
        }

        let state = &mut self.attached.entry(table.id()).or_default().sort;
        let direction = state.next_direction();

        let rows = std::mem::take(table.rows_mut());
        let mut sorted = merge_sort_by(rows, &mut |a: &Vec<String>, b: &Vec<String>| {
            compare_cells(&a[column], &b[column])
        });
        if direction == SortDirection::Descending {
            sorted.reverse();
        }
        *table.rows_mut() = sorted;

        state.last_sorted_column = Some(column);
        state.direction = Some(direction);
        log::debug!("Sorted {} by column {} {:?}", table.id(), column, direction);
        Ok(direction)
    }

    pub fn sort_state(&self, table_id: TableId) -> Option<SortState> {
        self.attached.get(&table_id).map(|a| a.sort)
    }

    /// Drop all state kept for a table.
    pub fn detach(&mut self, table_id: TableId) -> bool {
        self.attached.remove(&table_id).is_some()
    }
}
