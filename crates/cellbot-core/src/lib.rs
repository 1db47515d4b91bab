//! # cellbot-core
//!
//! Core data structures for the cellbot spreadsheet assistant engine.
//!
//! This crate provides the fundamental types used throughout cellbot:
//! - [`Scalar`] and [`Cell`] - primitive and annotated cell values
//! - [`CellAddress`] and [`CellRange`] - A1-style addressing and ranges
//! - [`Sheet`] and [`Document`] - the grid and the multi-sheet container
//!
//! ## Example
//!
//! ```rust
//! use cellbot_core::{CellAddress, Document};
//!
//! let mut doc = Document::new();
//! let sheet = doc.active_sheet_mut();
//!
//! sheet.set_cell(1, 0, "Widgets");
//! sheet.set_cell(1, 1, 42.0);
//!
//! assert_eq!(sheet.display_at(1, 1), "42");
//! assert_eq!(CellAddress::new(1, 1).to_a1(), "B2");
//! ```

pub mod cell;
pub mod document;
pub mod error;
pub mod sheet;

// Re-exports for convenience
pub use cell::{
    column_to_letters, letters_to_column, AnnotatedCell, Cell, CellAddress, CellRange,
    CellRangeIterator, ChartKind, Scalar,
};
pub use document::Document;
pub use error::{Error, Result};
pub use sheet::{ChartDescriptor, Sheet};

/// Standard width of padding rows added when the grid grows
pub const DEFAULT_GRID_COLS: usize = 15;

/// Number of blank rows in a freshly created document
pub const DEFAULT_GRID_ROWS: usize = 20;
