//! Heuristic intent detection
//!
//! The fallback when no structured operation block parses: an ordered
//! chain of pure matchers, each turning one phrasing pattern into an
//! operation. The first match wins; later patterns in the same text are
//! ignored.

use lazy_regex::{lazy_regex, Lazy, Regex};

use cellbot_core::{CellAddress, Scalar};
use cellbot_ops::{ChartPoint, ColumnRef, Operation};

static CHART_INTENT: Lazy<Regex> = lazy_regex!(r"(?i)create\s+(?:a|an)\s+(bar|line|pie|radar)\s+chart");
static CHART_TITLE: Lazy<Regex> = lazy_regex!(r#"(?i)title\s*[:=]\s*["']?([^"'\n]+)["']?"#);
static CHART_ITEM: Lazy<Regex> =
    lazy_regex!(r#"\{\s*["']?name["']?\s*:\s*["']?([^"',}]+?)["']?\s*,\s*["']?value["']?\s*:\s*(\d+)"#);
static CHART_LINE: Lazy<Regex> = lazy_regex!(r"^([A-Za-z0-9 ]+?)\s*[-:|]\s*(\d+)\s*$");

static FORMULA: Lazy<Regex> = lazy_regex!(r"=\s*[A-Za-z]+\s*\([^)]*\)");
static FORMULA_TARGET: Lazy<Regex> = lazy_regex!(r"(?i)(?:in|to)\s+cell\s+([A-Za-z]+\d+)");

static CELL_UPDATE: Lazy<Regex> = lazy_regex!(
    r#"(?i)(?:set|put|update)\s+(?:cell\s+)?([A-Za-z]+\d+)\s+(?:to|with|as|=)\s+["']?([^"'\n]+)["']?"#
);

static SORT: Lazy<Regex> = lazy_regex!(r"(?i)sort\s+(?:by\s+)?(?:column\s+)?([A-Za-z]\b|[0-9]+)");

static FILTER: Lazy<Regex> = lazy_regex!(
    r#"(?i)filter\s+(?:by|where)\s+(?:column\s+)?([A-Za-z]\b|[0-9]+)\s+(?:is|=|contains)\s+["']?([^"'\n]+)["']?"#
);

/// A single intent matcher: text in, maybe an operation out
pub type Matcher = fn(&str) -> Option<Operation>;

/// The matcher chain, in precedence order
pub const MATCHERS: &[Matcher] = &[
    chart_intent,
    formula_intent,
    cell_update_intent,
    sort_intent,
    filter_intent,
];

/// Run the matcher chain; first match wins
pub fn detect_operation(text: &str) -> Option<Operation> {
    MATCHERS.iter().find_map(|matcher| matcher(text))
}

/// Numeric-looking strings become numbers; everything else stays text
fn coerce_value(raw: &str) -> Scalar {
    let raw = raw.trim();
    match raw.parse::<f64>() {
        Ok(n) => Scalar::Number(n),
        Err(_) => Scalar::text(raw),
    }
}

/// "create a bar chart", optional title, optional inline data lines
fn chart_intent(text: &str) -> Option<Operation> {
    let caps = CHART_INTENT.captures(text)?;
    let chart_type = caps[1].to_lowercase();

    let title = CHART_TITLE
        .captures(text)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_else(|| "Chart".to_string());

    let mut points = extract_chart_points(text);
    if points.is_empty() {
        points = vec![
            ChartPoint::new("Sample 1", 30.0),
            ChartPoint::new("Sample 2", 50.0),
            ChartPoint::new("Sample 3", 70.0),
            ChartPoint::new("Sample 4", 90.0),
            ChartPoint::new("Sample 5", 40.0),
        ];
    }

    Some(Operation::CreateChart {
        chart_type,
        title: Some(title),
        data: Some(points),
    })
}

/// Data points appear either as JSON-ish `{name: ..., value: ...}` pairs
/// or as plain `Label - 42` / `Label: 42` lines
fn extract_chart_points(text: &str) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = CHART_ITEM
        .captures_iter(text)
        .filter_map(|c| {
            let name = c[1].trim().to_string();
            let value = c[2].parse::<f64>().ok()?;
            if name.is_empty() {
                None
            } else {
                Some(ChartPoint::new(name, value))
            }
        })
        .collect();

    if points.is_empty() {
        points = text
            .lines()
            .filter_map(|line| {
                let c = CHART_LINE.captures(line.trim())?;
                let name = c[1].trim().to_string();
                let value = c[2].parse::<f64>().ok()?;
                if name.is_empty() {
                    None
                } else {
                    Some(ChartPoint::new(name, value))
                }
            })
            .collect();
    }

    points
}

/// A formula-like substring (`=FUNC(...)`), optionally targeted at a cell
fn formula_intent(text: &str) -> Option<Operation> {
    let formula = FORMULA.find(text)?.as_str().trim().to_string();

    let target = FORMULA_TARGET
        .captures(text)
        .map(|c| CellAddress::parse(&c[1]))
        .unwrap_or(CellAddress::new(0, 0));

    Some(Operation::AddFormula {
        row: target.row,
        col: target.col,
        formula,
    })
}

/// "set/put/update B2 to 42" phrasing
fn cell_update_intent(text: &str) -> Option<Operation> {
    let caps = CELL_UPDATE.captures(text)?;
    let addr = CellAddress::parse(&caps[1]);

    Some(Operation::UpdateCell {
        row: addr.row,
        col: addr.col,
        value: coerce_value(&caps[2]),
    })
}

/// "sort by column X" phrasing
fn sort_intent(text: &str) -> Option<Operation> {
    let caps = SORT.captures(text)?;
    Some(Operation::Sort {
        column: ColumnRef::Letter(caps[1].to_string()),
    })
}

/// "filter by/where column X is/contains Y" phrasing
fn filter_intent(text: &str) -> Option<Operation> {
    let caps = FILTER.captures(text)?;
    Some(Operation::Filter {
        column: ColumnRef::Letter(caps[1].to_string()),
        value: coerce_value(&caps[2]),
    })
}
