//! Cell value types
//!
//! A grid slot is either a plain primitive or an annotated record carrying
//! the primitive plus assistant metadata (original formula text, the
//! AI-generated flag, chart markers). Both shapes serialize to the external
//! JSON form consumed by the rendering and file-codec collaborators.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// A primitive cell value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Scalar {
    /// Blank cell; serializes as the empty string
    #[default]
    Empty,
    /// Numeric value (all numbers stored as f64)
    Number(f64),
    /// Text value
    Text(String),
}

impl Scalar {
    /// Create a text scalar
    pub fn text<S: Into<String>>(s: S) -> Self {
        Scalar::Text(s.into())
    }

    /// True for `Empty` and for the empty string
    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Empty => true,
            Scalar::Text(s) => s.is_empty(),
            Scalar::Number(_) => false,
        }
    }

    /// Numeric view of the value
    ///
    /// Numbers pass through; text that fully parses as a number counts as
    /// numeric (the grid is seeded from untyped imports, so "3" and 3 are
    /// interchangeable). Everything else is `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(s) => {
                let t = s.trim();
                if t.is_empty() {
                    None
                } else {
                    t.parse::<f64>().ok()
                }
            }
            Scalar::Empty => None,
        }
    }

    /// Canonical display string (the single stringification used everywhere)
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Empty => Ok(()),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n as f64)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(n as f64)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Scalar::Empty
        } else {
            Scalar::Text(s.to_string())
        }
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Scalar::Empty
        } else {
            Scalar::Text(s)
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Scalar::Empty => serializer.serialize_str(""),
            Scalar::Number(n) => serializer.serialize_f64(*n),
            Scalar::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number, boolean, or null")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Scalar, E> {
                Ok(Scalar::from(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Scalar, E> {
                Ok(Scalar::from(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Scalar, E> {
                Ok(Scalar::Number(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Scalar, E> {
                Ok(Scalar::Number(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Scalar, E> {
                Ok(Scalar::Number(v as f64))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Scalar, E> {
                Ok(Scalar::Text(if v { "TRUE" } else { "FALSE" }.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Scalar, E> {
                Ok(Scalar::Empty)
            }

            fn visit_none<E: de::Error>(self) -> std::result::Result<Scalar, E> {
                Ok(Scalar::Empty)
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// Chart kinds the renderer understands
///
/// Anything else is a validation error rather than a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Radar,
}

impl ChartKind {
    /// Renderer-facing name
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Radar => "radar",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartKind::Bar),
            "line" => Ok(ChartKind::Line),
            "pie" => Ok(ChartKind::Pie),
            "radar" => Ok(ChartKind::Radar),
            other => Err(Error::UnknownChartKind(other.to_string())),
        }
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// An annotated cell: a displayed value plus assistant metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatedCell {
    /// The displayed/computed primitive
    pub value: Scalar,
    /// Original formula text (with the `=` prefix), when the cell holds one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    /// Set when the assistant wrote this cell
    #[serde(rename = "isAIGenerated", skip_serializing_if = "is_false")]
    pub ai_generated: bool,
    /// Marks a chart placeholder cell
    #[serde(rename = "isChart", skip_serializing_if = "is_false")]
    pub is_chart: bool,
    /// Chart kind, on the placeholder marker cell
    #[serde(rename = "chartType", skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartKind>,
    /// Marks a cell belonging to a chart's data block
    #[serde(rename = "isChartData", skip_serializing_if = "is_false")]
    pub is_chart_data: bool,
}

impl AnnotatedCell {
    /// Create an AI-generated cell with just a value
    pub fn ai_value<V: Into<Scalar>>(value: V) -> Self {
        Self {
            value: value.into(),
            ai_generated: true,
            ..Self::default()
        }
    }

    /// Create an AI-generated cell carrying a formula and its computed value
    pub fn ai_formula<V: Into<Scalar>>(value: V, formula: &str) -> Self {
        Self {
            value: value.into(),
            formula: Some(formula.to_string()),
            ai_generated: true,
            ..Self::default()
        }
    }

    /// Create a chart-data cell
    pub fn chart_data<V: Into<Scalar>>(value: V) -> Self {
        Self {
            value: value.into(),
            ai_generated: true,
            is_chart_data: true,
            ..Self::default()
        }
    }
}

/// One addressable grid slot
///
/// `Plain` cells are bare primitives (imported data passes through
/// untouched); `Annotated` cells carry metadata alongside the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Annotated record (tried first so JSON objects land here)
    Annotated(AnnotatedCell),
    /// Bare primitive
    Plain(Scalar),
}

impl Cell {
    /// A blank cell, used for grid padding
    pub fn blank() -> Self {
        Cell::Plain(Scalar::Empty)
    }

    /// Resolve to the underlying primitive (unwraps annotations)
    pub fn resolved(&self) -> &Scalar {
        match self {
            Cell::Plain(s) => s,
            Cell::Annotated(a) => &a.value,
        }
    }

    /// Canonical display string
    ///
    /// Annotated cells display their value; presentation layers that want
    /// to show the formula text instead read [`Cell::formula`].
    pub fn display(&self) -> String {
        self.resolved().display()
    }

    /// Numeric view of the resolved value
    pub fn as_number(&self) -> Option<f64> {
        self.resolved().as_number()
    }

    /// True when the resolved value is blank
    pub fn is_blank(&self) -> bool {
        self.resolved().is_blank()
    }

    /// Formula text, if the cell carries one
    pub fn formula(&self) -> Option<&str> {
        match self {
            Cell::Annotated(a) => a.formula.as_deref(),
            Cell::Plain(_) => None,
        }
    }

    /// True when this cell is a chart placeholder marker
    pub fn is_chart_marker(&self) -> bool {
        matches!(self, Cell::Annotated(a) if a.is_chart)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::blank()
    }
}

impl From<Scalar> for Cell {
    fn from(s: Scalar) -> Self {
        Cell::Plain(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Plain(Scalar::Number(n))
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Plain(Scalar::Number(n as f64))
    }
}

impl From<i32> for Cell {
    fn from(n: i32) -> Self {
        Cell::Plain(Scalar::Number(n as f64))
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Plain(Scalar::from(s))
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Plain(Scalar::from(s))
    }
}

impl From<AnnotatedCell> for Cell {
    fn from(a: AnnotatedCell) -> Self {
        Cell::Annotated(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scalar_as_number() {
        assert_eq!(Scalar::Number(42.0).as_number(), Some(42.0));
        assert_eq!(Scalar::text("3").as_number(), Some(3.0));
        assert_eq!(Scalar::text(" 2.5 ").as_number(), Some(2.5));
        assert_eq!(Scalar::text("abc").as_number(), None);
        assert_eq!(Scalar::Empty.as_number(), None);
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Empty.display(), "");
        assert_eq!(Scalar::Number(3.0).display(), "3");
        assert_eq!(Scalar::Number(3.5).display(), "3.5");
        assert_eq!(Scalar::text("hi").display(), "hi");
    }

    #[test]
    fn test_scalar_json_round_trip() {
        let json = r#"["", 2, "x", null, true]"#;
        let scalars: Vec<Scalar> = serde_json::from_str(json).unwrap();
        assert_eq!(
            scalars,
            vec![
                Scalar::Empty,
                Scalar::Number(2.0),
                Scalar::text("x"),
                Scalar::Empty,
                Scalar::text("TRUE"),
            ]
        );

        assert_eq!(serde_json::to_string(&Scalar::Empty).unwrap(), "\"\"");
        assert_eq!(serde_json::to_string(&Scalar::Number(2.0)).unwrap(), "2.0");
    }

    #[test]
    fn test_chart_kind_parse() {
        assert_eq!("bar".parse::<ChartKind>().unwrap(), ChartKind::Bar);
        assert_eq!(" PIE ".parse::<ChartKind>().unwrap(), ChartKind::Pie);
        assert!("histogram".parse::<ChartKind>().is_err());
    }

    #[test]
    fn test_cell_resolved_and_display() {
        let plain = Cell::from("hello");
        assert_eq!(plain.display(), "hello");
        assert_eq!(plain.formula(), None);

        let annotated = Cell::Annotated(AnnotatedCell::ai_formula(6.0, "=SUM(A1:B3)"));
        assert_eq!(annotated.resolved(), &Scalar::Number(6.0));
        assert_eq!(annotated.display(), "6");
        assert_eq!(annotated.formula(), Some("=SUM(A1:B3)"));
    }

    #[test]
    fn test_cell_json_shapes() {
        // Plain cells serialize as bare primitives
        let plain = Cell::from(5.0);
        assert_eq!(serde_json::to_string(&plain).unwrap(), "5.0");

        // Annotated cells serialize as objects with camelCase flags
        let annotated = Cell::Annotated(AnnotatedCell::ai_formula(6.0, "=A1+B1"));
        let json = serde_json::to_value(&annotated).unwrap();
        assert_eq!(json["value"], 6.0);
        assert_eq!(json["formula"], "=A1+B1");
        assert_eq!(json["isAIGenerated"], true);
        assert!(json.get("isChart").is_none());

        // Objects deserialize back into Annotated, primitives into Plain
        let back: Cell = serde_json::from_value(json).unwrap();
        assert_eq!(back, annotated);
        let plain_back: Cell = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(plain_back, Cell::from("text"));
    }
}
