//! Formula evaluation against a sheet snapshot
//!
//! Formulas are evaluated once, on demand, against a static grid. There is
//! no dependency graph and no recalculation: the caller decides when a
//! formula's cached value goes stale.

use lazy_regex::{lazy_regex, Lazy, Regex};

use cellbot_core::{letters_to_column, Sheet};

use crate::error::{FormulaError, FormulaResult};
use crate::expr::evaluate_expression;
use crate::range::expand_range;

/// Cell references inside a general arithmetic expression (e.g. "A1+B2*2")
static CELL_REF: Lazy<Regex> = lazy_regex!(r"([A-Za-z]+)(\d+)");

/// The aggregate functions the evaluator understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Aggregate {
    Sum,
    Average,
    Count,
    Max,
    Min,
}

const AGGREGATES: &[(&str, Aggregate)] = &[
    ("SUM(", Aggregate::Sum),
    ("AVERAGE(", Aggregate::Average),
    ("COUNT(", Aggregate::Count),
    ("MAX(", Aggregate::Max),
    ("MIN(", Aggregate::Min),
];

/// Evaluate a formula against a sheet's grid
///
/// The text must start with `=`. Aggregate calls (`SUM`, `AVERAGE`,
/// `COUNT`, `MAX`, `MIN`, case-insensitive) reduce over their expanded
/// range argument; anything else is treated as an arithmetic expression
/// with cell references substituted by their numeric values (blank,
/// out-of-range, and non-numeric cells substitute as 0).
///
/// # Examples
/// ```rust
/// use cellbot_core::Sheet;
/// use cellbot_formula::calculate_formula;
///
/// let mut sheet = Sheet::new("s");
/// sheet.set_cell(0, 0, 2.0);
/// sheet.set_cell(1, 0, 3.0);
///
/// assert_eq!(calculate_formula("=SUM(A1:A2)", &sheet).unwrap(), 5.0);
/// assert_eq!(calculate_formula("=A1*A2+1", &sheet).unwrap(), 7.0);
/// ```
pub fn calculate_formula(formula: &str, sheet: &Sheet) -> FormulaResult<f64> {
    let body = formula
        .trim()
        .strip_prefix('=')
        .ok_or_else(|| FormulaError::Parse("Formula must start with '='".into()))?
        .trim();

    let upper = body.to_ascii_uppercase();
    for (prefix, agg) in AGGREGATES {
        if upper.starts_with(prefix) && body.ends_with(')') {
            let inner = &body[prefix.len()..body.len() - 1];
            return Ok(reduce_aggregate(*agg, inner, sheet));
        }
    }

    evaluate_with_references(body, sheet)
}

/// Reduce an aggregate over the cells a range expression covers
///
/// A cell counts as numeric when its resolved value is a number or a string
/// that fully parses as one. AVERAGE, MAX, and MIN return 0 when the range
/// holds no numeric cells; COUNT counts every non-blank cell.
fn reduce_aggregate(agg: Aggregate, range: &str, sheet: &Sheet) -> f64 {
    let cells = expand_range(range);

    match agg {
        Aggregate::Sum => cells
            .iter()
            .filter_map(|a| sheet.value_at(a.row, a.col).as_number())
            .sum(),
        Aggregate::Average => {
            let numbers: Vec<f64> = cells
                .iter()
                .filter_map(|a| sheet.value_at(a.row, a.col).as_number())
                .collect();
            if numbers.is_empty() {
                0.0
            } else {
                numbers.iter().sum::<f64>() / numbers.len() as f64
            }
        }
        Aggregate::Count => cells
            .iter()
            .filter(|a| !sheet.value_at(a.row, a.col).is_blank())
            .count() as f64,
        Aggregate::Max => cells
            .iter()
            .filter_map(|a| sheet.value_at(a.row, a.col).as_number())
            .fold(None, |acc: Option<f64>, n| Some(acc.map_or(n, |m| m.max(n))))
            .unwrap_or(0.0),
        Aggregate::Min => cells
            .iter()
            .filter_map(|a| sheet.value_at(a.row, a.col).as_number())
            .fold(None, |acc: Option<f64>, n| Some(acc.map_or(n, |m| m.min(n))))
            .unwrap_or(0.0),
    }
}

/// Substitute cell references with their numeric values, then evaluate
fn evaluate_with_references(body: &str, sheet: &Sheet) -> FormulaResult<f64> {
    let substituted = CELL_REF.replace_all(body, |caps: &regex::Captures<'_>| {
        let col = letters_to_column(&caps[1]);
        let row = caps[2].parse::<usize>().unwrap_or(1).max(1) - 1;
        let value = sheet.value_at(row, col).as_number().unwrap_or(0.0);
        value.to_string()
    });

    evaluate_expression(&substituted)
}
