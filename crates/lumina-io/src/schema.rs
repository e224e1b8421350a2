//! Cell values, records, and parsed grids

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single cell value
///
/// Serializes untagged, so a record round-trips as a plain JSON object of
/// numbers, strings, booleans and nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Number(f64),
    Text(String),
}

/// Runtime kind of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    Text,
}

impl Value {
    /// Get the value kind
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::Text(_) => ValueKind::Text,
        }
    }

    /// Check if this is the null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Coerce to a finite number
    ///
    /// Numbers pass through when finite, text is parsed after trimming,
    /// booleans map to 1 and 0, and null is missing.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Value::Number(n) => *n,
            Value::Text(s) => parse_number(s)?,
            Value::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Null => return None,
        };
        n.is_finite().then_some(n)
    }

    /// Get the text content, if this is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render for display and substring matching, `None` for null
    pub fn render(&self) -> Option<String> {
        match self {
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Coerce a raw delimited-text cell
    ///
    /// Blank cells become null, `true`/`false` (any case) become booleans,
    /// finite numeric literals become numbers, everything else stays text.
    pub fn from_cell(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Null;
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Value::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Value::Boolean(false);
        }
        match parse_number(trimmed) {
            Some(n) => Value::Number(n),
            None => Value::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Parse a finite decimal number, rejecting `inf`/`nan` spellings
fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// A row: column name to cell value
///
/// A column absent from the map reads the same as an explicit null.
pub type Record = BTreeMap<String, Value>;

/// Build a record from `(column, value)` pairs
pub fn record<K, V, I>(cells: I) -> Record
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    cells
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Header list plus rows, as handed to type inference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedGrid {
    /// Column names in source order
    pub headers: Vec<String>,

    /// Rows in source order
    pub rows: Vec<Record>,
}

impl ParsedGrid {
    /// Create a new grid
    pub fn new(headers: Vec<String>, rows: Vec<Record>) -> Self {
        Self { headers, rows }
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Check if the grid has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_number_coercion() {
        assert_eq!(Value::Number(2.5).as_number(), Some(2.5));
        assert_eq!(Value::Number(f64::NAN).as_number(), None);
        assert_eq!(Value::from(" 12 ").as_number(), Some(12.0));
        assert_eq!(Value::from("abc").as_number(), None);
        assert_eq!(Value::from("").as_number(), None);
        assert_eq!(Value::from("inf").as_number(), None);
        assert_eq!(Value::Boolean(true).as_number(), Some(1.0));
        assert_eq!(Value::Null.as_number(), None);
    }

    #[test]
    fn test_from_cell() {
        assert_eq!(Value::from_cell(""), Value::Null);
        assert_eq!(Value::from_cell("  "), Value::Null);
        assert_eq!(Value::from_cell("TRUE"), Value::Boolean(true));
        assert_eq!(Value::from_cell("false"), Value::Boolean(false));
        assert_eq!(Value::from_cell("3.25"), Value::Number(3.25));
        assert_eq!(Value::from_cell("-1e3"), Value::Number(-1000.0));
        assert_eq!(Value::from_cell("NaN"), Value::Text("NaN".to_string()));
        assert_eq!(Value::from_cell("Boston"), Value::Text("Boston".to_string()));
    }

    #[test]
    fn test_render() {
        assert_eq!(Value::Number(2.0).render().as_deref(), Some("2"));
        assert_eq!(Value::Number(1.5).render().as_deref(), Some("1.5"));
        assert_eq!(Value::Boolean(false).render().as_deref(), Some("false"));
        assert_eq!(Value::Null.render(), None);
    }

    #[test]
    fn test_render_never_uses_exponents() {
        assert_eq!(Value::Number(1e-7).render().as_deref(), Some("0.0000001"));
        assert_eq!(
            Value::Number(1e21).render().as_deref(),
            Some("1000000000000000000000")
        );
        assert_eq!(Value::Number(-2.5e-3).render().as_deref(), Some("-0.0025"));
    }

    #[test]
    fn test_untagged_json() {
        let row = record([
            ("x", Value::from(1.5)),
            ("city", Value::from("Boston")),
            ("ok", Value::from(true)),
            ("gap", Value::Null),
        ]);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"city":"Boston","gap":null,"ok":true,"x":1.5}"#);

        let back: Record = serde_json::from_str(r#"{"x":3,"city":"NYC","gap":null}"#).unwrap();
        assert_eq!(back["x"], Value::Number(3.0));
        assert_eq!(back["city"].kind(), ValueKind::Text);
        assert!(back["gap"].is_null());
    }

    #[test]
    fn test_grid_lookup() {
        let grid = ParsedGrid::new(vec!["a".into(), "b".into()], vec![]);
        assert_eq!(grid.column_index("b"), Some(1));
        assert_eq!(grid.column_index("z"), None);
        assert!(grid.is_empty());
    }
}
