//! # cellbot
//!
//! A spreadsheet assistant engine.
//!
//! Cellbot turns free-form assistant text into typed spreadsheet
//! operations and applies them to an in-memory document: cell updates,
//! formulas (SUM, AVERAGE, COUNT, MAX, MIN and arithmetic), chart blocks,
//! sorting, and filtering.
//!
//! ## Example
//!
//! ```rust
//! use cellbot::prelude::*;
//!
//! let doc = Document::new();
//!
//! let reply = "Adding that up for you.\n\
//!              EXCEL_OPERATION_START\n\
//!              {\"type\": \"add_formula\", \"data\": {\"row\": 1, \"col\": 0, \"formula\": \"=1+2\"}}\n\
//!              EXCEL_OPERATION_END";
//!
//! let (next, applied) = doc.apply_assistant_text(reply).unwrap();
//! assert!(applied.is_some());
//! assert_eq!(next.active_sheet().display_at(1, 0), "3");
//! ```

pub mod prelude;

// Re-export core types
pub use cellbot_core::{
    column_to_letters, letters_to_column, AnnotatedCell, Cell, CellAddress, CellRange, ChartKind,
    Document, Error, Result, Scalar, Sheet, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS,
};

// Re-export formula types
pub use cellbot_formula::{
    calculate_formula, evaluate_expression, expand_range, FormulaError, FormulaResult,
};

// Re-export operation types
pub use cellbot_ops::{
    apply_operation, ChartPoint, ColumnRef, OpError, OpResult, Operation, MAX_CHART_POINTS,
};

// Re-export extraction entry points
pub use cellbot_extract::{extract_operation, fix_common_json_errors};

// Re-export assistant boundary types
pub use cellbot_assist::{
    build_prompt, parse_reply, system_preamble, AgentSession, AgentStatus, AgentStep, AssistError,
    AssistantReply, SheetContext,
};

/// Extension trait wiring extraction and application together
pub trait DocumentAssistExt {
    /// Extract an operation from assistant text and apply it
    ///
    /// Returns the next document snapshot plus the operation that was
    /// applied. Text without any operation leaves the document unchanged
    /// and returns `None` for the operation.
    fn apply_assistant_text(&self, text: &str) -> OpResult<(Document, Option<Operation>)>;
}

impl DocumentAssistExt for Document {
    fn apply_assistant_text(&self, text: &str) -> OpResult<(Document, Option<Operation>)> {
        match extract_operation(text) {
            Some(op) => {
                let next = apply_operation(self, &op)?;
                Ok((next, Some(op)))
            }
            None => Ok((self.clone(), None)),
        }
    }
}
