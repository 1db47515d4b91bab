//! Sheet summarization for prompts
//!
//! Prompts carry a compact structural summary of the active sheet instead
//! of the whole grid: dimensions, the header row, a bounded sample, where
//! data ends per column, and a few empty regions a reply can safely write
//! into.

use serde::Serialize;

use cellbot_core::Document;

/// Sample rows included in a summary
pub const MAX_SAMPLE_ROWS: usize = 10;
/// Empty regions reported per summary
pub const MAX_EMPTY_REGIONS: usize = 3;
/// Empty-region scan window, rows
const SCAN_ROWS: usize = 30;
/// Empty-region scan window, columns
const SCAN_COLS: usize = 10;
/// Probe depth when measuring an empty region downward
const ROW_PROBE: usize = 10;
/// Probe width when measuring an empty region rightward
const COL_PROBE: usize = 5;
/// Smallest row/column span worth reporting
const MIN_EMPTY_SPAN: usize = 3;

/// A rectangular run of blank cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyRegion {
    pub start_row: usize,
    pub start_col: usize,
    pub row_span: usize,
    pub col_span: usize,
}

/// Structural summary of the active sheet, embedded into prompts as JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetContext {
    pub active_sheet: String,
    pub row_count: usize,
    pub column_count: usize,
    pub header_row: Vec<String>,
    pub sample_data: Vec<Vec<String>>,
    /// Last populated row index per column, `None` for all-blank columns
    pub last_data_row_by_column: Vec<Option<usize>>,
    pub empty_regions: Vec<EmptyRegion>,
}

impl SheetContext {
    /// Summarize the active sheet of a document
    pub fn summarize(doc: &Document) -> Self {
        let sheet = doc.active_sheet();
        let rows = sheet.row_count();
        let cols = sheet.column_count();

        let header_row = (0..cols).map(|c| sheet.display_at(0, c)).collect();

        let sample_data = (0..rows.min(MAX_SAMPLE_ROWS))
            .map(|r| (0..cols).map(|c| sheet.display_at(r, c)).collect())
            .collect();

        let last_data_row_by_column = (0..cols)
            .map(|c| (0..rows).rev().find(|&r| !sheet.value_at(r, c).is_blank()))
            .collect();

        SheetContext {
            active_sheet: doc.active_sheet_name().to_string(),
            row_count: rows,
            column_count: cols,
            header_row,
            sample_data,
            last_data_row_by_column,
            empty_regions: find_empty_regions(doc),
        }
    }

    /// JSON form for prompt embedding
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Scan a bounded window of the sheet for rectangular blank regions
///
/// Row and column spans are measured independently from each region's
/// top-left corner, so a reported region is a safe writing area only up
/// to `row_span` x 1 and 1 x `col_span`; that matches how the summaries
/// are used in prompts. The scan skips past a found region's columns to
/// avoid re-reporting overlapping corners.
fn find_empty_regions(doc: &Document) -> Vec<EmptyRegion> {
    let sheet = doc.active_sheet();
    let rows = sheet.row_count();
    let cols = sheet.column_count();
    let blank = |r: usize, c: usize| sheet.value_at(r, c).is_blank();

    let mut regions = Vec::new();

    for row in 0..rows.min(SCAN_ROWS) {
        let mut col = 0;
        while col < cols.min(SCAN_COLS) {
            if blank(row, col) {
                let row_span = (row..rows.min(row + ROW_PROBE))
                    .take_while(|&r| blank(r, col))
                    .count();
                let col_span = (col..cols.min(col + COL_PROBE))
                    .take_while(|&c| blank(row, c))
                    .count();

                if row_span >= MIN_EMPTY_SPAN && col_span >= MIN_EMPTY_SPAN {
                    regions.push(EmptyRegion {
                        start_row: row,
                        start_col: col,
                        row_span,
                        col_span,
                    });
                    if regions.len() == MAX_EMPTY_REGIONS {
                        return regions;
                    }
                    col += col_span;
                    continue;
                }
            }
            col += 1;
        }
    }

    regions
}
