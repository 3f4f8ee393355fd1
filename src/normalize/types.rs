use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key used when a top-level item is itself an array and has no field name.
pub const LIST_KEY: &str = "lista";

/// Key used when a top-level item is a bare scalar and has no field name.
pub const VALUE_KEY: &str = "valor";

// Date-times that arrive with a space separator ("2024-01-02 03:04:05").
// Anything already in ISO-8601 form passes through untouched.
static SPACED_DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}(\.\d+)?$").unwrap()
});

/// A finished tabular view of one entity collection: an ordered column set
/// and a row matrix aligned positionally to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Ordered, deduplicated column names. Row 1 of the worksheet.
    pub columns: Vec<String>,

    /// One row per dataset item, cells aligned to `columns`.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Table { columns, rows }
    }

    /// True when the table has neither columns nor rows.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }
}

/// The classified shape of an API payload. Normalization dispatches on this
/// instead of re-inspecting item types at every step.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    /// The payload already carries explicit `headers` and `rows` arrays;
    /// both are passed through verbatim.
    PreTabulated {
        headers: Vec<Value>,
        rows: Vec<Vec<Value>>,
    },

    /// Every item is an object; items are flattened into dotted-path records.
    Objects(Vec<Map<String, Value>>),

    /// Every item is an array; columns are synthesized as `col_1..col_N`.
    Arrays(Vec<Vec<Value>>),

    /// Mixed item types or bare scalars; single `valor` column.
    Scalars(Vec<Value>),
}

/// Reduce a JSON value to a spreadsheet-safe scalar.
///
/// Numbers that are not exactly representable as `f64` fall back to their
/// string form; date-time strings with a space separator are canonicalized
/// to ISO-8601; containers (reachable only via the pre-tabulated path, which
/// bypasses the flattener) are serialized to compact JSON text.
pub fn to_cell_scalar(value: &Value) -> Value {
    match value {
        Value::Null | Value::Bool(_) => value.clone(),
        Value::Number(n) => {
            if is_f64_exact(n) {
                value.clone()
            } else {
                Value::String(n.to_string())
            }
        }
        Value::String(s) => match canonicalize_datetime(s) {
            Some(iso) => Value::String(iso),
            None => value.clone(),
        },
        container => Value::String(container.to_string()),
    }
}

/// Whether a JSON number survives a round trip through `f64` unchanged.
fn is_f64_exact(n: &serde_json::Number) -> bool {
    if n.is_f64() {
        return true;
    }
    // round-trip through i128/u128: a saturating cast back to the source
    // width would make values near the type boundary look exact
    if let Some(i) = n.as_i64() {
        return (i as f64) as i128 == i as i128;
    }
    if let Some(u) = n.as_u64() {
        return (u as f64) as u128 == u as u128;
    }
    false
}

/// Rewrite `"YYYY-MM-DD HH:MM:SS[.frac]"` as ISO-8601 with a `T` separator.
///
/// Returns `None` when the string is not a valid date-time in that shape,
/// leaving the original value untouched.
fn canonicalize_datetime(s: &str) -> Option<String> {
    if !SPACED_DATETIME_REGEX.is_match(s) {
        return None;
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok()?;
    Some(s.replacen(' ', "T", 1))
}
