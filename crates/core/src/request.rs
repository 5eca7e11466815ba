//! Request body decoding and syntactic validation
//!
//! Pure functions that turn the raw bytes of an incoming request into a
//! [`ConversionRequest`]. Anything that is not a JSON object carrying a
//! non-falsy `date` key is treated as "no date provided".

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Day 01-31, month 01-12, four ASCII digits for the year, slash separated.
///
/// Calendar validity (e.g. 31/02) is not checked here.
pub const DATE_PATTERN: &str = r"^(0[1-9]|[12][0-9]|3[01])/(0[1-9]|1[0-2])/[0-9]{4}$";

static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DATE_PATTERN).expect("DATE_PATTERN is a valid regex"));

/// A decoded conversion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub date: String,
}

/// Extract the `date` value from a raw request body
///
/// Returns `None` when the body is not valid JSON, is not a JSON object, has
/// no `date` key, or the value is falsy (see [`is_falsy`]). Non-string values
/// are kept in their textual form so they fail the pattern check later on.
pub fn extract_date(body: &[u8]) -> Option<ConversionRequest> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let date = value.as_object()?.get("date")?;

    if is_falsy(date) {
        return None;
    }

    Some(ConversionRequest {
        date: as_text(date),
    })
}

/// Loose "empty" check for a JSON value
///
/// `null`, `false`, `0`, `0.0`, `""`, `"0"`, `[]` and `{}` count as empty.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "1".to_string(),
        other => other.to_string(),
    }
}

/// Check a date string against [`DATE_PATTERN`]
pub fn is_valid_format(date: &str) -> bool {
    DATE_REGEX.is_match(date)
}
