//! FILENAME: core/table/src/table.rs
//! PURPOSE: The raw 2-D table handed to the engine by a data source.
//! CONTEXT: A table is an immutable snapshot: header rows plus data rows.
//! Nothing in the engine mutates it; every aggregation reads it afresh.

use serde::{Deserialize, Serialize};

use crate::cell::{CellValue, OrderedRow};
use crate::header::ColumnIndex;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Header rows plus data rows, as delivered by a source feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTable {
    /// Header block, top to bottom. Cells may be empty strings.
    pub header_rows: Vec<Vec<String>>,
    /// Data rows. Rows may be shorter than the header.
    pub rows: Vec<OrderedRow>,
}

impl RawTable {
    pub fn new(header_rows: Vec<Vec<String>>, rows: Vec<OrderedRow>) -> Self {
        RawTable { header_rows, rows }
    }

    /// Builds a table from a spreadsheet-style value grid, treating the first
    /// `header_rows_count` rows as the header block (at least one).
    pub fn from_grid(mut grid: Vec<OrderedRow>, header_rows_count: usize) -> Self {
        let count = header_rows_count.max(1).min(grid.len());
        let rows = grid.split_off(count);
        let header_rows = grid
            .into_iter()
            .map(|row| row.iter().map(CellValue::as_string).collect())
            .collect();
        RawTable { header_rows, rows }
    }

    /// True when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Reads a cell from a possibly ragged row. Out-of-range reads are empty.
pub fn cell_at(row: &[CellValue], column: ColumnIndex) -> &CellValue {
    row.get(column.0).unwrap_or(&EMPTY_CELL)
}
