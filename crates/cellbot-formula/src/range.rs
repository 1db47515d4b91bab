//! Range expansion
//!
//! Formula arguments name cells three ways: a rectangular range ("A1:C3"),
//! a comma list ("A1, B2, C3"), or a single reference. Expansion flattens
//! all three into the list of addresses the aggregate functions walk.

use cellbot_core::{CellAddress, CellRange};

/// Expand a range expression into the flat list of addresses it covers
///
/// Rectangular ranges enumerate row-major and cover every address exactly
/// once; reversed ranges ("C3:A1") normalize rather than coming back empty.
///
/// # Examples
/// ```
/// use cellbot_formula::expand_range;
///
/// assert_eq!(expand_range("A1:B3").len(), 6);
/// assert_eq!(expand_range("A1,C7").len(), 2);
/// assert_eq!(expand_range("B2").len(), 1);
/// ```
pub fn expand_range(expr: &str) -> Vec<CellAddress> {
    let expr = expr.trim();

    if expr.contains(':') {
        return CellRange::parse(expr).cells().collect();
    }

    if expr.contains(',') {
        return expr
            .split(',')
            .map(|cell| CellAddress::parse(cell.trim()))
            .collect();
    }

    vec![CellAddress::parse(expr)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_expand_rectangular_range() {
        let cells = expand_range("A1:B3");

        assert_eq!(cells.len(), 6);
        let distinct: HashSet<_> = cells.iter().copied().collect();
        assert_eq!(distinct.len(), 6);
        for addr in &cells {
            assert!(addr.row < 3);
            assert!(addr.col < 2);
        }
    }

    #[test]
    fn test_expand_reversed_range_normalizes() {
        assert_eq!(expand_range("B3:A1"), expand_range("A1:B3"));
    }

    #[test]
    fn test_expand_comma_list() {
        let cells = expand_range("A1, B2 ,C3");
        assert_eq!(
            cells,
            vec![
                CellAddress::new(0, 0),
                CellAddress::new(1, 1),
                CellAddress::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_expand_single_cell() {
        assert_eq!(expand_range("D4"), vec![CellAddress::new(3, 3)]);
    }
}
