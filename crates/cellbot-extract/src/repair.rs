//! Forgiving JSON repair
//!
//! Model output is almost-JSON often enough that a strict parse failure
//! is worth one repair pass before giving up: bare object keys, single
//! quotes, and trailing commas cover the common malformations.

use lazy_regex::{lazy_regex, Lazy, Regex};

static BARE_KEYS: Lazy<Regex> = lazy_regex!(r"(\s*)(\w+)(\s*):");
static TRAILING_COMMAS: Lazy<Regex> = lazy_regex!(r",(\s*[\]}])");

/// Repair the common JSON mistakes model output makes
///
/// Quotes bare object keys, normalizes single quotes to double quotes,
/// and strips trailing commas before closing brackets. The result is not
/// guaranteed to parse; it is just a second chance.
///
/// # Example
/// ```rust
/// use cellbot_extract::fix_common_json_errors;
///
/// let fixed = fix_common_json_errors("{type: 'sort', data: {column: 'A',}}");
/// assert_eq!(fixed, r#"{"type": "sort", "data": {"column": "A"}}"#);
/// ```
pub fn fix_common_json_errors(json: &str) -> String {
    let fixed = BARE_KEYS.replace_all(json, "${1}\"${2}\"${3}:");
    let fixed = fixed.replace('\'', "\"");
    TRAILING_COMMAS.replace_all(&fixed, "${1}").into_owned()
}
