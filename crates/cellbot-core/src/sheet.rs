//! Sheet type: one named grid plus per-sheet UI state

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellAddress, ChartKind, Scalar};
use crate::DEFAULT_GRID_COLS;

/// Lightweight chart descriptor kept alongside the grid for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    /// Chart kind
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// Chart title
    pub title: String,
}

/// A single sheet: a grid of cells plus active-cell and chart state
///
/// Rows are not required to be equal length at rest; every mutation that
/// addresses a cell goes through [`Sheet::grow_to`] first so the addressed
/// slot exists. The grid only shrinks when sort/filter replace the row
/// sequence wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name (the key in the document's sheet map)
    #[serde(skip)]
    pub name: String,
    /// The grid, as ordered rows of cells
    pub data: Vec<Vec<Cell>>,
    /// Most recently written cell, for the UI to focus
    #[serde(
        rename = "activeCell",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub active_cell: Option<CellAddress>,
    /// Chart descriptors for downstream rendering
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub charts: Vec<ChartDescriptor>,
}

impl Sheet {
    /// Create an empty sheet
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            data: Vec::new(),
            active_cell: None,
            charts: Vec::new(),
        }
    }

    /// Create a sheet from an existing grid
    pub fn with_grid<S: Into<String>>(name: S, data: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            data,
            active_cell: None,
            charts: Vec::new(),
        }
    }

    /// Number of rows in the grid
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Width of the widest row
    pub fn column_count(&self) -> usize {
        self.data.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Grow the grid so that `(row, col)` exists
    ///
    /// Missing rows are appended as blank rows of the standard width; the
    /// target row is padded with blanks through `col`. Existing cells are
    /// never touched and the grid never shrinks, so calling this twice with
    /// the same target is a no-op the second time.
    pub fn grow_to(&mut self, row: usize, col: usize) {
        while self.data.len() <= row {
            self.data.push(vec![Cell::blank(); DEFAULT_GRID_COLS]);
        }
        let target = &mut self.data[row];
        while target.len() <= col {
            target.push(Cell::blank());
        }
    }

    /// Get a cell, if present
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&Cell> {
        self.data.get(row).and_then(|r| r.get(col))
    }

    /// Resolved primitive at an address; blank when out of range
    pub fn value_at(&self, row: usize, col: usize) -> &Scalar {
        static EMPTY: Scalar = Scalar::Empty;
        self.cell_at(row, col).map_or(&EMPTY, Cell::resolved)
    }

    /// Display string at an address; empty when out of range
    pub fn display_at(&self, row: usize, col: usize) -> String {
        self.value_at(row, col).display()
    }

    /// Write a cell, growing the grid as needed
    pub fn set_cell<C: Into<Cell>>(&mut self, row: usize, col: usize, cell: C) {
        self.grow_to(row, col);
        self.data[row][col] = cell.into();
    }

    /// Flatten every cell to its display primitive, for the file codec
    pub fn export_rows(&self) -> Vec<Vec<Scalar>> {
        self.data
            .iter()
            .map(|row| row.iter().map(|cell| cell.resolved().clone()).collect())
            .collect()
    }
}
