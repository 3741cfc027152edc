//! Value enum for dynamic field values

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A dynamic value held by a row field or a filter.
///
/// | Source | Variant |
/// |--------|---------|
/// | missing field, `null` | `Null` |
/// | boolean | `Bool` |
/// | any number | `Number` |
/// | RFC 3339 timestamp | `Date` |
/// | other string | `Text` |
///
/// # Example
///
/// ```
/// use tablekit::model::Value;
///
/// let name = Value::from("Ann");
/// let age = Value::from(25);
/// let active = Value::from(true);
/// let empty = Value::Null;
/// assert!(!empty.is_active());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null or missing value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Date and time in UTC.
    Date(DateTime<Utc>),
    /// String value.
    Text(String),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` unless the value is null or an empty string.
    ///
    /// This is the emptiness rule for filter values: `0` and `false` are
    /// active.
    pub fn is_active(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Text(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Date(_) => "date",
            Value::Text(_) => "text",
        }
    }

    /// Returns the text if this is a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Coerces the value to a number.
    ///
    /// Text is trimmed and parsed (empty text is `0`), booleans map to `1`/`0`
    /// and dates to epoch milliseconds. Unparseable text yields `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::Date(d) => d.timestamp_millis() as f64,
            Value::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
        }
    }

    /// Coerces the value to a boolean (truthiness).
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Date(_) => true,
            Value::Text(s) => !s.is_empty(),
        }
    }

    /// Coerces the value to a date.
    ///
    /// Accepts `Date` values, RFC 3339 text, `YYYY-MM-DD` text (midnight UTC)
    /// and numbers as epoch milliseconds.
    pub fn to_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(*d),
            Value::Text(s) => parse_date(s),
            Value::Number(n) if n.is_finite() => Utc.timestamp_millis_opt(*n as i64).single(),
            _ => None,
        }
    }

    /// Builds a value from a JSON value.
    ///
    /// Arrays and objects have no direct variant and are kept as their JSON
    /// text.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            serde_json::Value::String(s) => match DateTime::parse_from_rfc3339(&s) {
                Ok(d) => Value::Date(d.with_timezone(&Utc)),
                Err(_) => Value::Text(s),
            },
            other => Value::Text(other.to_string()),
        }
    }

    /// Compares two values of the same variant, `None` across variants.
    pub(crate) fn partial_cmp_same_kind(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Some(a.partial_cmp(b).unwrap_or(Ordering::Equal)),
            (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Deserializes through [`Value::from_json`], so every serde format maps
/// values the same way.
impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from_json)
    }
}

/// Parses RFC 3339 or a bare `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Some(d.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            // -0 prints as 0
            Value::Number(n) if *n == 0.0 => write!(f, "0"),
            Value::Number(n) if n.is_nan() => write!(f, "NaN"),
            Value::Number(n) if n.is_infinite() => {
                write!(f, "{}Infinity", if *n < 0.0 { "-" } else { "" })
            }
            Value::Number(n) => write!(f, "{n}"),
            Value::Date(d) => write!(f, "{}", d.to_rfc3339()),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Date(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
