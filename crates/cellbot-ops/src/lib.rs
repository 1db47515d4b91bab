//! # cellbot-ops
//!
//! Declarative operations and the applier state machine for cellbot.
//!
//! An [`Operation`] is a serializable instruction produced by the
//! assistant; [`apply_operation`] turns `(document, operation)` into a new
//! document snapshot without touching the input. Chart operations lay the
//! chart out as flagged cells in the grid plus a descriptor on the sheet.
//!
//! ## Example
//!
//! ```rust
//! use cellbot_core::{Document, Scalar};
//! use cellbot_ops::{apply_operation, Operation};
//!
//! let doc = Document::new();
//! let next = apply_operation(
//!     &doc,
//!     &Operation::AddFormula { row: 1, col: 0, formula: "=1+2".into() },
//! )
//! .unwrap();
//!
//! assert_eq!(next.active_sheet().display_at(1, 0), "3");
//! ```

pub mod apply;
pub mod chart;
pub mod error;
pub mod operation;

pub use apply::apply_operation;
pub use chart::{write_chart_block, CHART_ANCHOR_COL, CHART_ANCHOR_ROW, MAX_CHART_POINTS};
pub use error::{OpError, OpResult};
pub use operation::{ChartPoint, ColumnRef, Operation};
