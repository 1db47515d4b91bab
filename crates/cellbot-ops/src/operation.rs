//! Declarative operations
//!
//! An [`Operation`] is one serializable instruction against the active
//! sheet, in the wire shape the assistant emits:
//!
//! ```json
//! { "type": "update_cell", "data": { "row": 2, "col": 1, "value": "x" } }
//! ```

use serde::{Deserialize, Serialize};

use cellbot_core::{letters_to_column, Scalar};

/// One data point of a chart operation
///
/// Both fields default so a sloppy payload ({"name": "Q1"} with no value)
/// still parses; the chart layout fills the gaps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Category label
    #[serde(default)]
    pub name: String,
    /// Numeric value (anything non-numeric lays out as 0)
    #[serde(default)]
    pub value: Scalar,
}

impl ChartPoint {
    /// Create a data point
    pub fn new<S: Into<String>>(name: S, value: f64) -> Self {
        Self {
            name: name.into(),
            value: Scalar::Number(value),
        }
    }
}

/// A column referenced either by letter ("A") or zero-based index (0)
///
/// Both forms resolve into the same index space as cell addresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    /// Zero-based numeric index
    Index(i64),
    /// Column letters
    Letter(String),
}

impl ColumnRef {
    /// Resolve to a zero-based column index; `None` for a negative index
    /// or a letter form with no letters in it
    pub fn resolve(&self) -> Option<usize> {
        match self {
            ColumnRef::Index(i) => usize::try_from(*i).ok(),
            ColumnRef::Letter(s) => {
                if s.chars().any(|c| c.is_ascii_alphabetic()) {
                    Some(letters_to_column(s))
                } else {
                    // Numeric text still means an index ("column 2")
                    s.trim().parse::<i64>().ok().and_then(|i| usize::try_from(i).ok())
                }
            }
        }
    }
}

impl From<usize> for ColumnRef {
    fn from(i: usize) -> Self {
        ColumnRef::Index(i as i64)
    }
}

impl From<&str> for ColumnRef {
    fn from(s: &str) -> Self {
        ColumnRef::Letter(s.to_string())
    }
}

/// A declarative instruction to mutate the active sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Operation {
    /// Write a value (or a formula, when the text starts with `=`) to a cell
    UpdateCell {
        row: usize,
        col: usize,
        value: Scalar,
    },
    /// Insert a formula at a cell
    AddFormula {
        row: usize,
        col: usize,
        formula: String,
    },
    /// Lay out a chart placeholder plus its data block
    CreateChart {
        /// Requested chart kind; validated against the known kinds on apply
        #[serde(rename = "chartType")]
        chart_type: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        data: Option<Vec<ChartPoint>>,
    },
    /// Stable-sort data rows by a column, keeping the header in place
    Sort { column: ColumnRef },
    /// Keep only data rows whose cell in `column` matches `value`
    Filter { column: ColumnRef, value: Scalar },
}

impl Operation {
    /// Wire name of the operation kind
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::UpdateCell { .. } => "update_cell",
            Operation::AddFormula { .. } => "add_formula",
            Operation::CreateChart { .. } => "create_chart",
            Operation::Sort { .. } => "sort",
            Operation::Filter { .. } => "filter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wire_shape_update_cell() {
        let json = r#"{"type":"update_cell","data":{"row":2,"col":1,"value":"hello"}}"#;
        let op: Operation = serde_json::from_str(json).unwrap();
        assert_eq!(
            op,
            Operation::UpdateCell {
                row: 2,
                col: 1,
                value: Scalar::text("hello"),
            }
        );
    }

    #[test]
    fn test_wire_shape_create_chart() {
        let json = r#"{
            "type": "create_chart",
            "data": {
                "chartType": "pie",
                "title": "Sales",
                "data": [{"name": "Q1", "value": 100}, {"name": "Q2"}]
            }
        }"#;
        let op: Operation = serde_json::from_str(json).unwrap();
        match op {
            Operation::CreateChart {
                chart_type,
                title,
                data,
            } => {
                assert_eq!(chart_type, "pie");
                assert_eq!(title.as_deref(), Some("Sales"));
                let data = data.unwrap();
                assert_eq!(data[0], ChartPoint::new("Q1", 100.0));
                assert_eq!(data[1].value, Scalar::Empty);
            }
            other => panic!("wrong operation: {:?}", other),
        }
    }

    #[test]
    fn test_column_ref_both_forms() {
        let sort: Operation = serde_json::from_str(
            r#"{"type":"sort","data":{"column":"C"}}"#,
        )
        .unwrap();
        match sort {
            Operation::Sort { column } => assert_eq!(column.resolve(), Some(2)),
            other => panic!("wrong operation: {:?}", other),
        }

        let sort: Operation = serde_json::from_str(
            r#"{"type":"sort","data":{"column":2}}"#,
        )
        .unwrap();
        match sort {
            Operation::Sort { column } => assert_eq!(column.resolve(), Some(2)),
            other => panic!("wrong operation: {:?}", other),
        }
    }

    #[test]
    fn test_column_ref_resolution() {
        assert_eq!(ColumnRef::from("AA").resolve(), Some(26));
        assert_eq!(ColumnRef::from("3").resolve(), Some(3));
        assert_eq!(ColumnRef::Index(-1).resolve(), None);
        assert_eq!(ColumnRef::from("").resolve(), None);
    }

    #[test]
    fn test_operation_round_trip() {
        let op = Operation::Filter {
            column: ColumnRef::from("B"),
            value: Scalar::text("am"),
        };
        let json = serde_json::to_string(&op).unwrap();
        let back: Operation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, op);
        assert!(json.contains(r#""type":"filter""#));
    }
}
