//! The operation applier
//!
//! `(document, operation) -> new document`. The input document is never
//! mutated: the applier clones it, mutates the clone's active sheet, and
//! returns the clone. Callers holding the previous snapshot keep a
//! consistent view, which is the system's whole concurrency story.

use std::cmp::Ordering;

use cellbot_core::{AnnotatedCell, Cell, CellAddress, ChartKind, Document, Scalar, Sheet};
use cellbot_formula::calculate_formula;

use crate::chart::write_chart_block;
use crate::error::{OpError, OpResult};
use crate::operation::{ColumnRef, Operation};

/// Apply one operation to a document, returning a new snapshot
///
/// On error the input is untouched and no partial snapshot escapes; worst
/// case is "operation not applied, document unchanged".
///
/// # Example
/// ```rust
/// use cellbot_core::{Document, Scalar};
/// use cellbot_ops::{apply_operation, Operation};
///
/// let doc = Document::new();
/// let op = Operation::UpdateCell { row: 1, col: 0, value: Scalar::text("hi") };
///
/// let next = apply_operation(&doc, &op).unwrap();
/// assert_eq!(next.active_sheet().display_at(1, 0), "hi");
/// assert!(doc.active_sheet().value_at(1, 0).is_blank()); // original untouched
/// ```
pub fn apply_operation(doc: &Document, op: &Operation) -> OpResult<Document> {
    log::debug!("applying {} operation", op.kind());

    let mut next = doc.clone();

    match op {
        Operation::UpdateCell { row, col, value } => {
            write_value(next.active_sheet_mut(), *row, *col, value);
        }
        Operation::AddFormula { row, col, formula } => {
            if formula.trim().is_empty() {
                return Err(OpError::validation(
                    "add_formula",
                    "formula",
                    "must not be empty",
                ));
            }
            write_formula(next.active_sheet_mut(), *row, *col, formula);
        }
        Operation::CreateChart {
            chart_type,
            title,
            data,
        } => {
            let kind: ChartKind = chart_type
                .parse()
                .map_err(|e: cellbot_core::Error| {
                    OpError::validation("create_chart", "chartType", e.to_string())
                })?;
            let title = title.clone().unwrap_or_else(|| "Chart".to_string());

            let sheet = next.active_sheet_mut();
            write_chart_block(sheet, kind, &title, data.as_deref());
            sheet
                .charts
                .push(cellbot_core::ChartDescriptor { kind, title });
        }
        Operation::Sort { column } => {
            let col = resolve_column(column, "sort")?;
            sort_rows(next.active_sheet_mut(), col)?;
        }
        Operation::Filter { column, value } => {
            let col = resolve_column(column, "filter")?;
            filter_rows(next.active_sheet_mut(), col, value)?;
        }
    }

    Ok(next)
}

fn resolve_column(column: &ColumnRef, op: &'static str) -> OpResult<usize> {
    column.resolve().ok_or_else(|| {
        OpError::validation(op, "column", format!("unusable column reference {:?}", column))
    })
}

/// `update_cell`: values pass through; text starting with `=` is treated
/// as a formula and gets the evaluate-or-preserve handling
fn write_value(sheet: &mut Sheet, row: usize, col: usize, value: &Scalar) {
    match value {
        Scalar::Text(s) if s.starts_with('=') => write_formula(sheet, row, col, s),
        other => {
            sheet.set_cell(row, col, AnnotatedCell::ai_value(other.clone()));
            sheet.active_cell = Some(CellAddress::new(row, col));
        }
    }
}

/// Evaluate a formula into an annotated cell, preserving the raw text as
/// the value when evaluation fails (the user's intent is never dropped)
fn write_formula(sheet: &mut Sheet, row: usize, col: usize, formula: &str) {
    sheet.grow_to(row, col);

    let cell = if formula.starts_with('=') {
        match calculate_formula(formula, sheet) {
            Ok(result) => AnnotatedCell::ai_formula(result, formula),
            Err(err) => {
                log::warn!("formula '{}' failed to evaluate: {}", formula, err);
                AnnotatedCell::ai_formula(formula, formula)
            }
        }
    } else {
        // Not a formula after all; store it as plain text
        AnnotatedCell::ai_value(formula)
    };

    sheet.set_cell(row, col, cell);
    sheet.active_cell = Some(CellAddress::new(row, col));
}

/// Stable sort of data rows by one column, header row untouched
fn sort_rows(sheet: &mut Sheet, col: usize) -> OpResult<()> {
    if sheet.row_count() < 2 {
        return Err(OpError::validation(
            "sort",
            "data",
            "requires a header row and at least one data row",
        ));
    }

    let mut data_rows = sheet.data.split_off(1);
    data_rows.sort_by(|a, b| compare_cells(a.get(col), b.get(col)));
    sheet.data.append(&mut data_rows);

    Ok(())
}

/// Numeric ascending when both sides resolve to numbers, else by string
/// form; missing and blank cells compare as the empty string
fn compare_cells(a: Option<&Cell>, b: Option<&Cell>) -> Ordering {
    let a_num = a.and_then(Cell::as_number);
    let b_num = b.and_then(Cell::as_number);

    match (a_num, b_num) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => {
            let a_str = a.map(Cell::display).unwrap_or_default();
            let b_str = b.map(Cell::display).unwrap_or_default();
            a_str.cmp(&b_str)
        }
    }
}

/// Keep the header plus the data rows matching the filter
///
/// This replaces the sheet's rows wholesale; filtered-out rows are only
/// recoverable from a snapshot the caller retained.
fn filter_rows(sheet: &mut Sheet, col: usize, value: &Scalar) -> OpResult<()> {
    if sheet.row_count() < 2 {
        return Err(OpError::validation(
            "filter",
            "data",
            "requires a header row and at least one data row",
        ));
    }

    let kept: Vec<Vec<Cell>> = sheet
        .data
        .drain(1..)
        .filter(|row| {
            let cell = row.get(col).map(Cell::resolved);
            cell_matches(cell.unwrap_or(&Scalar::Empty), value)
        })
        .collect();
    sheet.data.extend(kept);

    Ok(())
}

/// Text targets match case-insensitively as a substring of text/blank
/// cells; any other combination requires exact equality
fn cell_matches(cell: &Scalar, target: &Scalar) -> bool {
    match (target, cell) {
        (Scalar::Text(t), Scalar::Text(_) | Scalar::Empty) => cell
            .display()
            .to_lowercase()
            .contains(&t.to_lowercase()),
        _ => cell == target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::ChartPoint;
    use pretty_assertions::assert_eq;

    fn people_doc() -> Document {
        let sheet = Sheet::with_grid(
            "People",
            vec![
                vec![Cell::from("Name"), Cell::from("Age")],
                vec![Cell::from("Bob"), Cell::from("30")],
                vec![Cell::from("Amy"), Cell::from("30")],
                vec![Cell::from("Cid"), Cell::from("25")],
            ],
        );
        Document::from_sheet(sheet)
    }

    #[test]
    fn test_update_cell_grows_grid_and_sets_active() {
        let sheet = Sheet::with_grid("s", vec![vec![Cell::blank(); 5]; 5]);
        let doc = Document::from_sheet(sheet);

        let next = apply_operation(
            &doc,
            &Operation::UpdateCell {
                row: 15,
                col: 20,
                value: Scalar::text("x"),
            },
        )
        .unwrap();

        let sheet = next.active_sheet();
        assert!(sheet.row_count() >= 16);
        assert!(sheet.data[15].len() >= 21);
        assert_eq!(sheet.display_at(15, 20), "x");
        assert_eq!(sheet.active_cell, Some(CellAddress::new(15, 20)));

        // Snapshot semantics: the input document is untouched
        assert_eq!(doc.active_sheet().row_count(), 5);
    }

    #[test]
    fn test_update_cell_with_formula_evaluates() {
        let sheet = Sheet::with_grid(
            "s",
            vec![vec![Cell::from(2.0)], vec![Cell::from(3.0)]],
        );
        let doc = Document::from_sheet(sheet);

        let next = apply_operation(
            &doc,
            &Operation::UpdateCell {
                row: 2,
                col: 0,
                value: Scalar::text("=SUM(A1:A2)"),
            },
        )
        .unwrap();

        let cell = next.active_sheet().cell_at(2, 0).unwrap();
        assert_eq!(cell.as_number(), Some(5.0));
        assert_eq!(cell.formula(), Some("=SUM(A1:A2)"));
    }

    #[test]
    fn test_add_formula_preserves_text_on_failure() {
        let doc = Document::new();

        let next = apply_operation(
            &doc,
            &Operation::AddFormula {
                row: 0,
                col: 0,
                formula: "=BOGUS(A1".to_string(),
            },
        )
        .unwrap();

        let cell = next.active_sheet().cell_at(0, 0).unwrap();
        assert_eq!(cell.formula(), Some("=BOGUS(A1"));
        assert_eq!(cell.display(), "=BOGUS(A1");
    }

    #[test]
    fn test_add_formula_rejects_empty() {
        let doc = Document::new();
        let err = apply_operation(
            &doc,
            &Operation::AddFormula {
                row: 0,
                col: 0,
                formula: "  ".to_string(),
            },
        )
        .unwrap_err();

        match err {
            OpError::Validation { op, field, .. } => {
                assert_eq!(op, "add_formula");
                assert_eq!(field, "formula");
            }
        }
    }

    #[test]
    fn test_create_chart_writes_block_and_descriptor() {
        let doc = Document::new();

        let next = apply_operation(
            &doc,
            &Operation::CreateChart {
                chart_type: "bar".to_string(),
                title: Some("Sales".to_string()),
                data: Some(vec![
                    ChartPoint::new("Q1", 100.0),
                    ChartPoint::new("Q2", 150.0),
                ]),
            },
        )
        .unwrap();

        let sheet = next.active_sheet();
        assert_eq!(sheet.display_at(1, 0), "[bar Chart]");
        assert_eq!(sheet.display_at(1, 1), "Sales");
        assert_eq!(sheet.display_at(3, 0), "Q1");
        assert_eq!(sheet.value_at(4, 1).as_number(), Some(150.0));
        assert_eq!(sheet.charts.len(), 1);
        assert_eq!(sheet.charts[0].kind, ChartKind::Bar);
        assert_eq!(sheet.charts[0].title, "Sales");
    }

    #[test]
    fn test_create_chart_rejects_unknown_kind() {
        let doc = Document::new();
        let err = apply_operation(
            &doc,
            &Operation::CreateChart {
                chart_type: "histogram".to_string(),
                title: None,
                data: None,
            },
        )
        .unwrap_err();

        match err {
            OpError::Validation { op, field, .. } => {
                assert_eq!(op, "create_chart");
                assert_eq!(field, "chartType");
            }
        }
    }

    #[test]
    fn test_sort_numeric_stable_header_preserved() {
        let doc = people_doc();

        let next = apply_operation(
            &doc,
            &Operation::Sort {
                column: ColumnRef::from("B"),
            },
        )
        .unwrap();

        let sheet = next.active_sheet();
        assert_eq!(sheet.display_at(0, 0), "Name"); // header untouched
        assert_eq!(sheet.display_at(1, 0), "Cid"); // 25 first
        assert_eq!(sheet.display_at(2, 0), "Bob"); // stable: Bob before Amy
        assert_eq!(sheet.display_at(3, 0), "Amy");
    }

    #[test]
    fn test_sort_string_fallback() {
        let sheet = Sheet::with_grid(
            "s",
            vec![
                vec![Cell::from("Name")],
                vec![Cell::from("banana")],
                vec![Cell::from("apple")],
            ],
        );
        let doc = Document::from_sheet(sheet);

        let next = apply_operation(&doc, &Operation::Sort { column: 0.into() }).unwrap();
        assert_eq!(next.active_sheet().display_at(1, 0), "apple");
    }

    #[test]
    fn test_sort_requires_data_rows() {
        let doc = Document::from_sheet(Sheet::with_grid("s", vec![vec![Cell::from("only")]]));
        assert!(apply_operation(&doc, &Operation::Sort { column: 0.into() }).is_err());
    }

    #[test]
    fn test_filter_substring_case_insensitive() {
        let doc = people_doc();

        let next = apply_operation(
            &doc,
            &Operation::Filter {
                column: ColumnRef::from("A"),
                value: Scalar::text("am"),
            },
        )
        .unwrap();

        let sheet = next.active_sheet();
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.display_at(0, 0), "Name");
        assert_eq!(sheet.display_at(1, 0), "Amy");

        // Destructive: the new snapshot lost Bob and Cid, the old one didn't
        assert_eq!(doc.active_sheet().row_count(), 4);
    }

    #[test]
    fn test_filter_exact_equality_for_numbers() {
        let sheet = Sheet::with_grid(
            "s",
            vec![
                vec![Cell::from("N")],
                vec![Cell::from(30.0)],
                vec![Cell::from(25.0)],
            ],
        );
        let doc = Document::from_sheet(sheet);

        let next = apply_operation(
            &doc,
            &Operation::Filter {
                column: 0.into(),
                value: Scalar::Number(30.0),
            },
        )
        .unwrap();

        assert_eq!(next.active_sheet().row_count(), 2);
        assert_eq!(next.active_sheet().value_at(1, 0).as_number(), Some(30.0));
    }

    #[test]
    fn test_unusable_column_is_validation_error() {
        let doc = people_doc();
        let err = apply_operation(
            &doc,
            &Operation::Sort {
                column: ColumnRef::Index(-3),
            },
        )
        .unwrap_err();

        match err {
            OpError::Validation { op, field, .. } => {
                assert_eq!(op, "sort");
                assert_eq!(field, "column");
            }
        }
    }
}
