//! # cellbot-extract
//!
//! Pulls a spreadsheet [`Operation`] out of free-form assistant text.
//!
//! The extractor runs a fixed pipeline: a delimited operation block is
//! tried first (strict JSON, then a repaired reparse), then any embedded
//! JSON object, and finally the phrasing heuristics. The first stage that
//! produces an operation wins, so a structured block always beats an
//! incidental "create a chart" mention later in the same reply.
//!
//! ## Example
//!
//! ```rust
//! use cellbot_extract::extract_operation;
//! use cellbot_ops::Operation;
//!
//! let reply = "Done! EXCEL_OPERATION_START\n\
//!              {\"type\": \"update_cell\", \"data\": {\"row\": 1, \"col\": 0, \"value\": 42}}\n\
//!              EXCEL_OPERATION_END";
//!
//! match extract_operation(reply) {
//!     Some(Operation::UpdateCell { row, col, .. }) => assert_eq!((row, col), (1, 0)),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

pub mod heuristics;
pub mod repair;

pub use heuristics::detect_operation;
pub use repair::fix_common_json_errors;

use lazy_regex::{lazy_regex, Lazy, Regex};

use cellbot_ops::Operation;

/// Delimiter the assistant is prompted to open operation blocks with
pub const OPERATION_START: &str = "EXCEL_OPERATION_START";
/// Delimiter the assistant is prompted to close operation blocks with
pub const OPERATION_END: &str = "EXCEL_OPERATION_END";

static MARKER_BLOCK: Lazy<Regex> =
    lazy_regex!(r"(?s)EXCEL_OPERATION_START\s*(.*?)\s*EXCEL_OPERATION_END");
static FENCE_LINE: Lazy<Regex> = lazy_regex!(r"(?m)^\s*```[A-Za-z]*\s*$");
static LINE_NUMBERS: Lazy<Regex> = lazy_regex!(r"(?m)^\s*\d+[\s:]*");

/// Extract the first operation the text carries, if any
///
/// Precedence is structural, not positional: a delimited block is always
/// preferred, an embedded JSON object comes next, and the phrasing
/// heuristics are the last resort. A block that fails to parse even after
/// repair does not abort extraction; the text falls through to the later
/// stages.
pub fn extract_operation(text: &str) -> Option<Operation> {
    if let Some(caps) = MARKER_BLOCK.captures(text) {
        let body = clean_block(&caps[1]);
        if let Some(op) = parse_operation(&body) {
            log::debug!("extracted {} operation from delimited block", op.kind());
            return Some(op);
        }
        log::warn!("delimited operation block did not parse, trying weaker extraction");
    }

    if let Some(op) = embedded_operation(text) {
        log::debug!("extracted {} operation from embedded JSON", op.kind());
        return Some(op);
    }

    detect_operation(text)
}

/// Strip code fences and leading line numbers from a block body
fn clean_block(body: &str) -> String {
    let body = FENCE_LINE.replace_all(body, "");
    let body = LINE_NUMBERS.replace_all(&body, "");
    body.trim().trim_matches('`').trim().to_string()
}

/// Strict parse first, one repair pass second
fn parse_operation(json: &str) -> Option<Operation> {
    match serde_json::from_str(json) {
        Ok(op) => Some(op),
        Err(strict_err) => {
            let repaired = fix_common_json_errors(json);
            match serde_json::from_str(&repaired) {
                Ok(op) => {
                    log::debug!("operation JSON needed repair: {}", strict_err);
                    Some(op)
                }
                Err(repaired_err) => {
                    log::debug!(
                        "operation JSON unusable (strict: {}; repaired: {})",
                        strict_err,
                        repaired_err
                    );
                    None
                }
            }
        }
    }
}

/// Try every brace-balanced object in the text that mentions a type tag
fn embedded_operation(text: &str) -> Option<Operation> {
    json_candidates(text)
        .into_iter()
        .filter(|candidate| candidate.contains("type"))
        .find_map(parse_operation)
}

/// Top-level `{...}` spans found by brace counting
///
/// Braces inside string literals will confuse the count; that only makes
/// a candidate fail to parse, which the caller already tolerates.
fn json_candidates(text: &str) -> Vec<&str> {
    let mut candidates = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, ch) in text.char_indices() {
        match ch {
            '{' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    candidates.push(&text[start..=i]);
                }
            }
            _ => {}
        }
    }

    candidates
}
