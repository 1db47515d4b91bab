//! End-to-end tests: assistant text in, updated document out

use cellbot::prelude::*;
use pretty_assertions::assert_eq;

fn scores_doc() -> Document {
    let sheet = Sheet::with_grid(
        "Scores",
        vec![
            vec![Cell::from("Name"), Cell::from("Score")],
            vec![Cell::from("Amy"), Cell::from(10.0)],
            vec![Cell::from("Bob"), Cell::from(20.0)],
            vec![Cell::from("Cid"), Cell::from(30.0)],
        ],
    );
    Document::from_sheet(sheet)
}

#[test]
fn test_formula_block_applies_and_evaluates() {
    let doc = scores_doc();

    let reply = "Adding a total below the scores.\n\
                 EXCEL_OPERATION_START\n\
                 {\"type\": \"add_formula\", \"data\": {\"row\": 4, \"col\": 1, \"formula\": \"=SUM(B2:B4)\"}}\n\
                 EXCEL_OPERATION_END";

    let (next, applied) = doc.apply_assistant_text(reply).unwrap();

    assert!(matches!(applied, Some(Operation::AddFormula { .. })));
    let cell = next.active_sheet().cell_at(4, 1).unwrap();
    assert_eq!(cell.as_number(), Some(60.0));
    assert_eq!(cell.formula(), Some("=SUM(B2:B4)"));

    // The input snapshot is untouched
    assert_eq!(doc.active_sheet().row_count(), 4);
}

#[test]
fn test_chart_block_lays_out_cells_and_descriptor() {
    let doc = Document::new();

    let reply = "Here's your chart.\n\
                 EXCEL_OPERATION_START\n\
                 {\"type\": \"create_chart\", \"data\": {\n\
                   \"chartType\": \"pie\",\n\
                   \"title\": \"Share\",\n\
                   \"data\": [\n\
                     {\"name\": \"North\", \"value\": 40},\n\
                     {\"name\": \"South\", \"value\": 60}\n\
                   ]\n\
                 }}\n\
                 EXCEL_OPERATION_END";

    let (next, _) = doc.apply_assistant_text(reply).unwrap();
    let sheet = next.active_sheet();

    assert_eq!(sheet.display_at(1, 0), "[pie Chart]");
    assert_eq!(sheet.display_at(1, 1), "Share");
    assert_eq!(sheet.display_at(2, 0), "Category");
    assert_eq!(sheet.display_at(3, 0), "North");
    assert_eq!(sheet.value_at(4, 1).as_number(), Some(60.0));

    assert_eq!(sheet.charts.len(), 1);
    assert_eq!(sheet.charts[0].kind, ChartKind::Pie);
}

#[test]
fn test_sloppy_block_is_repaired_before_applying() {
    let doc = scores_doc();

    let reply = "EXCEL_OPERATION_START\n\
                 ```json\n\
                 {type: 'sort', data: {column: 'B',}}\n\
                 ```\n\
                 EXCEL_OPERATION_END";

    let (next, applied) = doc.apply_assistant_text(reply).unwrap();

    assert!(matches!(applied, Some(Operation::Sort { .. })));
    // Already ascending by score, so order is preserved
    assert_eq!(next.active_sheet().display_at(1, 0), "Amy");
    assert_eq!(next.active_sheet().display_at(3, 0), "Cid");
}

#[test]
fn test_heuristic_fallback_reaches_the_grid() {
    let doc = scores_doc();

    let (next, applied) = doc
        .apply_assistant_text("Of course. I'll set B2 to 99")
        .unwrap();

    assert!(matches!(applied, Some(Operation::UpdateCell { .. })));
    assert_eq!(next.active_sheet().value_at(1, 1).as_number(), Some(99.0));
}

#[test]
fn test_plain_prose_changes_nothing() {
    let doc = scores_doc();

    let (next, applied) = doc
        .apply_assistant_text("Your totals already look right to me.")
        .unwrap();

    assert_eq!(applied, None);
    assert_eq!(next, doc);
}

#[test]
fn test_unknown_chart_kind_is_rejected_not_defaulted() {
    let doc = Document::new();

    let reply = "EXCEL_OPERATION_START\n\
                 {\"type\": \"create_chart\", \"data\": {\"chartType\": \"histogram\"}}\n\
                 EXCEL_OPERATION_END";

    let err = doc.apply_assistant_text(reply).unwrap_err();
    let OpError::Validation { op, field, .. } = err;
    assert_eq!(op, "create_chart");
    assert_eq!(field, "chartType");
}

#[test]
fn test_parse_reply_then_filter() {
    let doc = scores_doc();

    let reply = parse_reply(
        "Filtering now.\n\
         EXCEL_OPERATION_START\n\
         {\"type\": \"filter\", \"data\": {\"column\": \"A\", \"value\": \"amy\"}}\n\
         EXCEL_OPERATION_END",
    )
    .unwrap();

    let op = reply.operation.expect("reply should carry an operation");
    let next = apply_operation(&doc, &op).unwrap();

    assert_eq!(next.active_sheet().row_count(), 2);
    assert_eq!(next.active_sheet().display_at(1, 0), "Amy");
}

#[test]
fn test_context_reflects_applied_operations() {
    let doc = scores_doc();

    let (next, _) = doc
        .apply_assistant_text("Please set A5 to Dee")
        .unwrap();

    let ctx = SheetContext::summarize(&next);
    assert_eq!(ctx.active_sheet, "Scores");
    assert_eq!(ctx.row_count, 5);
    assert_eq!(ctx.header_row[0], "Name");
    assert_eq!(ctx.last_data_row_by_column[0], Some(4));
}
