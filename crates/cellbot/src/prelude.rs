//! Prelude module - common imports for cellbot users
//!
//! ```rust
//! use cellbot::prelude::*;
//! ```

pub use crate::{
    // Assistant boundary
    AgentSession,
    AgentStatus,
    AnnotatedCell,
    AssistError,
    AssistantReply,

    // Cell types
    Cell,
    CellAddress,
    CellRange,
    ChartKind,
    ChartPoint,
    ColumnRef,

    // Main types
    Document,
    // Extension traits
    DocumentAssistExt,

    // Error types
    Error,
    FormulaError,
    OpError,
    OpResult,
    Operation,
    Result,
    Scalar,

    Sheet,
    SheetContext,

    // Pipeline entry points
    apply_operation,
    calculate_formula,
    extract_operation,
    parse_reply,
};
