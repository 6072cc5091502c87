//! Loosely typed cell values.
//!
//! Rows hand the engine their fields as [`CellValue`]s. The coercion helpers
//! here are deliberately permissive: text that looks like a number compares as
//! a number in a numeric column, a number in a date column is read as epoch
//! milliseconds, and anything that cannot be coerced degrades to `NaN` instead
//! of failing. Callers rely on this, so the rules are kept exact.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// A dynamically typed field value read from a row.
///
/// # Example
///
/// ```
/// use horizon_tabular::model::CellValue;
///
/// let stock = CellValue::from("42");
/// assert_eq!(stock.to_number(), 42.0);
/// assert_eq!(CellValue::from(0.5).to_text().as_deref(), Some("0.5"));
/// assert!(CellValue::Null.to_text().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Missing or null value.
    #[default]
    Null,
    /// Text value.
    Text(String),
    /// Numeric value. Integers are stored as `f64` as well.
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// Point in time.
    Date(DateTime<Utc>),
}

impl CellValue {
    /// Returns `true` if this is `CellValue::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns the text if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a numeric value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String coercion. `Null` has no string form and yields `None`.
    ///
    /// Numbers print in their shortest form (`5`, `0.25`, `1e+21`), dates as
    /// RFC 3339.
    pub fn to_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(number_to_text(*n)),
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Date(d) => Some(d.to_rfc3339()),
        }
    }

    /// Numeric coercion. Anything that is not a number yields `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            CellValue::Null => f64::NAN,
            CellValue::Text(s) => text_to_number(s),
            CellValue::Number(n) => *n,
            CellValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            CellValue::Date(d) => d.timestamp_millis() as f64,
        }
    }

    /// Date coercion to epoch milliseconds. Unparsable values yield `NaN`.
    pub fn to_timestamp_millis(&self) -> f64 {
        match self {
            CellValue::Date(d) => d.timestamp_millis() as f64,
            CellValue::Number(n) => *n,
            CellValue::Text(s) => parse_date_text(s)
                .map(|d| d.timestamp_millis() as f64)
                .unwrap_or(f64::NAN),
            CellValue::Bool(_) | CellValue::Null => f64::NAN,
        }
    }

    /// Date coercion. Returns `None` when the value does not name a valid date.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::Number(n) if n.is_finite() => DateTime::from_timestamp_millis(*n as i64),
            CellValue::Text(s) => parse_date_text(s),
            _ => None,
        }
    }

    /// Truthiness: `Null`, `false`, `0`, `NaN` and the empty string are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Null => false,
            CellValue::Text(s) => !s.is_empty(),
            CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
            CellValue::Bool(b) => *b,
            CellValue::Date(_) => true,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

/// Prints a number the way a script engine's `String(n)` does.
fn number_to_text(n: f64) -> String {
    if n.is_nan() {
        return "NaN".into();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    if n == 0.0 {
        // Covers -0 as well.
        return "0".into();
    }

    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exp = format!("{n:e}");
        match exp.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => exp,
        }
    } else {
        format!("{n}")
    }
}

/// Parses text the way a script engine's `Number(s)` does.
fn text_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|v| v as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // `f64::from_str` also accepts "inf" and "nan", which are not numbers here.
    let plain_decimal = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'));
    if !plain_decimal {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Parses the date formats rows commonly carry. Times without an offset are
/// read as UTC.
fn parse_date_text(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim();
    if let Ok(d) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(d.with_timezone(&Utc));
    }
    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Some(dt.and_utc());
        }
    }
    None
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&String> for CellValue {
    fn from(s: &String) -> Self {
        CellValue::Text(s.clone())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<f32> for CellValue {
    fn from(n: f32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(d: DateTime<Utc>) -> Self {
        CellValue::Date(d)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

/// Arrays and objects become their compact JSON text, so `[1,2]` stays
/// `"[1,2]"` and `{"a":1}` stays `"{\"a\":1}"`. Search therefore matches
/// nested values against that text, brackets and quotes included.
impl From<&serde_json::Value> for CellValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or(CellValue::Null),
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => CellValue::Text(value.to_string()),
        }
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        CellValue::from(&value)
    }
}

/// Horizontal alignment hint for a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Align to the left edge.
    #[default]
    Left,
    /// Align to the center.
    Center,
    /// Align to the right edge.
    Right,
}

/// Check state of a tri-state checkbox, such as a "select all" header box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckState {
    /// Nothing is checked.
    #[default]
    Unchecked,
    /// Some, but not all, items are checked.
    PartiallyChecked,
    /// Everything is checked.
    Checked,
}

impl CheckState {
    /// Returns `true` if the item is checked (fully or partially).
    pub fn is_checked(&self) -> bool {
        !matches!(self, CheckState::Unchecked)
    }

    /// Returns `true` if the item is fully checked.
    pub fn is_fully_checked(&self) -> bool {
        matches!(self, CheckState::Checked)
    }
}
