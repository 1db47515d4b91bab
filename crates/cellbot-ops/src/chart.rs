//! Chart block layout
//!
//! A chart is represented in the grid itself: a marker cell carrying the
//! chart kind, a title cell beside it, and a two-column "Category | Value"
//! data table two rows below. The renderer picks the block up from the
//! cell flags; the grid stays a plain grid.

use rand::Rng;

use cellbot_core::{AnnotatedCell, Cell, ChartKind, Scalar, Sheet};

use crate::operation::ChartPoint;

/// Row of the chart marker cell (row 0 is the header row)
pub const CHART_ANCHOR_ROW: usize = 1;

/// Column of the chart marker cell
pub const CHART_ANCHOR_COL: usize = 0;

/// Cap on data points taken from an operation payload
pub const MAX_CHART_POINTS: usize = 10;

/// Number of synthesized rows when the payload carries no data
const PLACEHOLDER_POINTS: usize = 5;

/// Write a chart placeholder and its data block into the grid
///
/// When `data` is missing or empty, synthesizes labeled placeholder rows
/// with values in `[20, 120)` so the chart is always renderable. Provided
/// data is used verbatim, capped at [`MAX_CHART_POINTS`] entries.
pub fn write_chart_block(sheet: &mut Sheet, kind: ChartKind, title: &str, data: Option<&[ChartPoint]>) {
    let row = CHART_ANCHOR_ROW;
    let col = CHART_ANCHOR_COL;

    sheet.set_cell(
        row,
        col,
        AnnotatedCell {
            value: Scalar::text(format!("[{} Chart]", kind)),
            ai_generated: true,
            is_chart: true,
            chart_type: Some(kind),
            ..AnnotatedCell::default()
        },
    );
    sheet.set_cell(
        row,
        col + 1,
        AnnotatedCell {
            value: Scalar::text(title),
            ai_generated: true,
            is_chart: true,
            ..AnnotatedCell::default()
        },
    );

    sheet.set_cell(row + 1, col, AnnotatedCell::chart_data("Category"));
    sheet.set_cell(row + 1, col + 1, AnnotatedCell::chart_data("Value"));

    match data {
        Some(points) if !points.is_empty() => {
            for (i, point) in points.iter().take(MAX_CHART_POINTS).enumerate() {
                let name = if point.name.is_empty() {
                    format!("Item {}", i + 1)
                } else {
                    point.name.clone()
                };
                let value = point.value.as_number().unwrap_or(0.0);

                sheet.set_cell(row + 2 + i, col, AnnotatedCell::chart_data(name));
                sheet.set_cell(row + 2 + i, col + 1, AnnotatedCell::chart_data(value));
            }
        }
        _ => {
            let mut rng = rand::thread_rng();
            for i in 0..PLACEHOLDER_POINTS {
                let label = format!("Category {}", (b'A' + i as u8) as char);
                let value = rng.gen_range(20..120) as f64;

                sheet.set_cell(row + 2 + i, col, AnnotatedCell::chart_data(label));
                sheet.set_cell(row + 2 + i, col + 1, AnnotatedCell::chart_data(value));
            }
        }
    }
}

/// True when the cell belongs to a chart's data block
pub fn is_chart_data(cell: &Cell) -> bool {
    matches!(cell, Cell::Annotated(a) if a.is_chart_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_placeholder_block_layout() {
        let mut sheet = Sheet::new("s");
        write_chart_block(&mut sheet, ChartKind::Bar, "My Chart", None);

        assert!(sheet.cell_at(1, 0).unwrap().is_chart_marker());
        assert_eq!(sheet.display_at(1, 0), "[bar Chart]");
        assert_eq!(sheet.display_at(1, 1), "My Chart");
        assert_eq!(sheet.display_at(2, 0), "Category");
        assert_eq!(sheet.display_at(2, 1), "Value");

        for i in 0..5 {
            assert!(is_chart_data(sheet.cell_at(3 + i, 0).unwrap()));
            let value = sheet.value_at(3 + i, 1).as_number().unwrap();
            assert!((20.0..120.0).contains(&value));
        }
    }

    #[test]
    fn test_provided_data_capped_at_ten() {
        let points: Vec<ChartPoint> = (0..15)
            .map(|i| ChartPoint::new(format!("P{}", i), i as f64))
            .collect();

        let mut sheet = Sheet::new("s");
        write_chart_block(&mut sheet, ChartKind::Line, "Big", Some(&points));

        assert_eq!(sheet.display_at(3, 0), "P0");
        assert_eq!(sheet.display_at(12, 0), "P9");
        // Row 13 would be P10; the cap stops at 10 entries
        assert!(sheet.value_at(13, 0).is_blank());
    }

    #[test]
    fn test_missing_names_and_values_fill_in() {
        let points = vec![ChartPoint {
            name: String::new(),
            value: Scalar::Empty,
        }];

        let mut sheet = Sheet::new("s");
        write_chart_block(&mut sheet, ChartKind::Pie, "t", Some(&points));

        assert_eq!(sheet.display_at(3, 0), "Item 1");
        assert_eq!(sheet.value_at(3, 1).as_number(), Some(0.0));
    }
}
