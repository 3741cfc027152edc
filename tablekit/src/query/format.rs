//! Default display formatting of cell values.

use crate::model::Value;

/// Formats a value for display in a cell.
///
/// Null is blank, booleans read `Yes`/`No`, dates show the calendar day and
/// numbers get thousands separators with at most three decimals.
///
/// # Example
///
/// ```
/// use tablekit::model::Value;
/// use tablekit::query::format_cell_value;
///
/// assert_eq!(format_cell_value(&Value::from(true)), "Yes");
/// assert_eq!(format_cell_value(&Value::from(1234567.891)), "1,234,567.891");
/// assert_eq!(format_cell_value(&Value::Null), "");
/// ```
pub fn format_cell_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        Value::Number(n) => format_number(*n),
        Value::Text(s) => s.clone(),
    }
}

/// Formats a number with thousands separators and up to three decimals.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return Value::Number(n).to_string();
    }

    let rounded = format!("{:.3}", n.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let negative = n < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}
