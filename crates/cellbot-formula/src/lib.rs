//! # cellbot-formula
//!
//! Formula evaluation for the cellbot spreadsheet assistant engine.
//!
//! The evaluator is intentionally small: aggregate functions (`SUM`,
//! `AVERAGE`, `COUNT`, `MAX`, `MIN`) over ranges, and general arithmetic
//! expressions with cell-reference substitution. Expressions are parsed by
//! a recursive descent parser over `+ - * / ( )` and numeric literals, so
//! model-supplied formula text can never execute anything.
//!
//! ## Example
//!
//! ```rust
//! use cellbot_core::Sheet;
//! use cellbot_formula::calculate_formula;
//!
//! let mut sheet = Sheet::new("s");
//! sheet.set_cell(0, 0, 10.0);
//! sheet.set_cell(1, 0, 20.0);
//!
//! assert_eq!(calculate_formula("=AVERAGE(A1:A2)", &sheet).unwrap(), 15.0);
//! ```

pub mod error;
pub mod eval;
pub mod expr;
pub mod range;

pub use error::{FormulaError, FormulaResult};
pub use eval::calculate_formula;
pub use expr::evaluate_expression;
pub use range::expand_range;
