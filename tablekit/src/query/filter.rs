//! Filter definitions, value coercion and row matching.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::error::FieldValidationError;
use crate::error::FilterValueError;
use crate::model::DataItem;
use crate::model::Value;
use crate::model::parse_date;

/// Input kind of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Free text, matched as a case-insensitive substring.
    #[default]
    Text,
    /// One value from an enumerated option list.
    Select,
    /// Calendar date.
    Date,
    /// Exact number.
    Number,
    /// Yes / no.
    Boolean,
}

/// One entry of a select filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOption {
    pub label: String,
    pub value: Value,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Describes one filterable field.
///
/// The runtime value of the filter is held by
/// [`FilterState`](crate::engine::FilterState), not here.
///
/// # Example
///
/// ```
/// use tablekit::query::{FilterDef, FilterKind, FilterOption};
///
/// let name = FilterDef::text("name", "Name");
/// let status = FilterDef::select("status", "Status", [
///     FilterOption::new("Active", "active"),
///     FilterOption::new("Inactive", "inactive"),
/// ]);
/// assert_eq!(status.kind, FilterKind::Select);
/// assert_eq!(name.placeholder_text(), "Filter by Name");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDef {
    /// Column key this filter applies to.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Input kind.
    pub kind: FilterKind,
    /// Options for select filters.
    #[serde(default)]
    pub options: Vec<FilterOption>,
    /// Placeholder text for the input.
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Initial value applied when the table is created or filters are reset.
    #[serde(default)]
    pub default_value: Option<Value>,
}

impl FilterDef {
    /// Creates a filter of the given kind.
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FilterKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            options: Vec::new(),
            placeholder: None,
            default_value: None,
        }
    }

    /// Creates a free-text filter.
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FilterKind::Text)
    }

    /// Creates a select filter with the given options.
    pub fn select(
        key: impl Into<String>,
        label: impl Into<String>,
        options: impl IntoIterator<Item = FilterOption>,
    ) -> Self {
        let mut filter = Self::new(key, label, FilterKind::Select);
        filter.options = options.into_iter().collect();
        filter
    }

    /// Creates a date filter.
    pub fn date(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FilterKind::Date)
    }

    /// Creates a numeric filter.
    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FilterKind::Number)
    }

    /// Creates a boolean filter.
    pub fn boolean(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FilterKind::Boolean)
    }

    /// Sets the placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Placeholder to show, falling back to one derived from the label.
    pub fn placeholder_text(&self) -> String {
        if let Some(placeholder) = &self.placeholder {
            return placeholder.clone();
        }
        match self.kind {
            FilterKind::Select | FilterKind::Boolean => format!("Select {}", self.label),
            _ => format!("Filter by {}", self.label),
        }
    }

    /// Label of the option whose value equals `value`.
    pub fn option_label(&self, value: &Value) -> Option<&str> {
        self.options
            .iter()
            .find(|o| &o.value == value)
            .map(|o| o.label.as_str())
    }
}

/// Coerces a raw input value to the type a filter kind expects.
///
/// Inactive values pass through untouched so that clearing an input never
/// fails validation.
pub fn coerce_filter_value(kind: FilterKind, value: &Value) -> Result<Value, FilterValueError> {
    if !value.is_active() {
        return Ok(value.clone());
    }

    match kind {
        FilterKind::Select => Ok(value.clone()),
        FilterKind::Text => match value {
            Value::Text(_) => Ok(value.clone()),
            other => Ok(Value::Text(other.to_string())),
        },
        FilterKind::Number => match value {
            Value::Number(_) => Ok(value.clone()),
            Value::Bool(b) => Ok(Value::from(i32::from(*b))),
            Value::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Value::Number)
                .ok_or(FilterValueError::NotANumber),
            _ => Err(FilterValueError::NotANumber),
        },
        FilterKind::Date => match value {
            Value::Date(_) => Ok(value.clone()),
            Value::Text(s) => parse_date(s)
                .map(Value::Date)
                .ok_or(FilterValueError::NotADate),
            Value::Number(_) => value.to_date().map(Value::Date).ok_or(FilterValueError::NotADate),
            _ => Err(FilterValueError::NotADate),
        },
        FilterKind::Boolean => match value {
            Value::Bool(_) => Ok(value.clone()),
            Value::Number(n) => Ok(Value::Bool(*n != 0.0)),
            Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(Value::Bool(true)),
                "false" | "no" | "0" => Ok(Value::Bool(false)),
                _ => Err(FilterValueError::NotABoolean),
            },
            _ => Err(FilterValueError::NotABoolean),
        },
    }
}

/// Validates filter values against their definitions.
///
/// Returns one error per filter whose active value cannot be coerced.
pub fn validate_filter_values(
    defs: &[FilterDef],
    values: &BTreeMap<String, Value>,
) -> Vec<FieldValidationError> {
    defs.iter()
        .filter_map(|def| {
            let value = values.get(&def.key)?;
            coerce_filter_value(def.kind, value)
                .err()
                .map(|e| e.for_field(&def.key))
        })
        .collect()
}

/// Tests one field value against one filter value.
///
/// The filter value's variant picks the comparison: text is a
/// case-insensitive substring match, booleans and numbers compare after
/// coercing the field, dates compare by calendar day. An inactive filter
/// matches everything; a null field never matches an active filter.
pub fn matches_filter(field: &Value, filter: &Value) -> bool {
    if !filter.is_active() {
        return true;
    }
    if field.is_null() {
        return false;
    }

    match filter {
        Value::Text(needle) => field
            .to_string()
            .to_lowercase()
            .contains(&needle.to_lowercase()),
        Value::Bool(b) => field.to_bool() == *b,
        Value::Number(n) => field.to_number() == *n,
        Value::Date(d) => field
            .to_date()
            .is_some_and(|f| f.date_naive() == d.date_naive()),
        Value::Null => true,
    }
}

/// Tests a field against a filter of a known kind.
///
/// Select filters compare for equality: the field must equal the chosen
/// option value, or render to exactly the same text. Every other kind
/// falls back to [`matches_filter`].
pub fn matches_filter_kind(kind: FilterKind, field: &Value, filter: &Value) -> bool {
    if kind != FilterKind::Select || !filter.is_active() {
        return matches_filter(field, filter);
    }
    if field.is_null() {
        return false;
    }
    field == filter || field.to_string() == filter.to_string()
}

/// Returns the indices of rows matching every active filter.
///
/// Filters are matched by the variant of their value. Use
/// [`filter_indices_with_kinds`] when the declared filter kinds are known.
pub fn filter_indices<T: DataItem>(data: &[T], filters: &BTreeMap<String, Value>) -> Vec<usize> {
    filter_indices_with_kinds(data, filters, &BTreeMap::new())
}

/// Returns the indices of rows matching every active filter, matching
/// each filter by its entry in `kinds` when it has one.
pub fn filter_indices_with_kinds<T: DataItem>(
    data: &[T],
    filters: &BTreeMap<String, Value>,
    kinds: &BTreeMap<String, FilterKind>,
) -> Vec<usize> {
    let active: Vec<(&String, &Value, Option<FilterKind>)> = filters
        .iter()
        .filter(|(_, v)| v.is_active())
        .map(|(k, v)| (k, v, kinds.get(k).copied()))
        .collect();

    data.iter()
        .enumerate()
        .filter(|(_, row)| {
            active.iter().all(|(key, value, kind)| {
                let field = row.field(key);
                match kind {
                    Some(kind) => matches_filter_kind(*kind, &field, value),
                    None => matches_filter(&field, value),
                }
            })
        })
        .map(|(i, _)| i)
        .collect()
}

/// Returns the rows matching every active filter.
pub fn filter_data<T: DataItem>(data: &[T], filters: &BTreeMap<String, Value>) -> Vec<T> {
    filter_indices(data, filters)
        .into_iter()
        .map(|i| data[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DataItem, Record};

    fn people() -> Vec<Record> {
        vec![
            Record::new(1).with("name", "Bob").with("age", 30).with("active", true),
            Record::new(2).with("name", "Ann").with("age", 25).with("active", false),
        ]
    }

    fn values(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_substring_is_case_insensitive() {
        let rows = filter_data(&people(), &values(&[("name", "an".into())]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id().to_string(), "2");
    }

    #[test]
    fn test_inactive_filters_pass_everything() {
        let rows = filter_data(
            &people(),
            &values(&[("name", "".into()), ("age", Value::Null)]),
        );
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_number_and_boolean_filters() {
        assert_eq!(filter_data(&people(), &values(&[("age", 25.into())])).len(), 1);
        assert_eq!(filter_data(&people(), &values(&[("active", false.into())])).len(), 1);
        assert_eq!(filter_data(&people(), &values(&[("age", 0.into())])).len(), 0);
    }

    #[test]
    fn test_null_field_fails_active_filter() {
        let rows = filter_data(&people(), &values(&[("email", "x".into())]));
        assert!(rows.is_empty());
    }

    #[test]
    fn test_date_filter_ignores_time_of_day() {
        let field = Value::from("2024-05-01T18:45:00Z").to_date().map(Value::Date).unwrap();
        let filter = Value::from("2024-05-01").to_date().map(Value::Date).unwrap();
        assert!(matches_filter(&field, &filter));
        let other = Value::from("2024-05-02").to_date().map(Value::Date).unwrap();
        assert!(!matches_filter(&field, &other));
    }

    #[test]
    fn test_coercion() {
        assert_eq!(
            coerce_filter_value(FilterKind::Number, &"42".into()),
            Ok(Value::Number(42.0))
        );
        assert_eq!(
            coerce_filter_value(FilterKind::Number, &"abc".into()),
            Err(FilterValueError::NotANumber)
        );
        assert_eq!(
            coerce_filter_value(FilterKind::Boolean, &"Yes".into()),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            coerce_filter_value(FilterKind::Date, &"yesterday".into()),
            Err(FilterValueError::NotADate)
        );
        assert_eq!(
            coerce_filter_value(FilterKind::Text, &42.into()),
            Ok(Value::from("42"))
        );
        assert_eq!(
            coerce_filter_value(FilterKind::Number, &"".into()),
            Ok(Value::from(""))
        );
    }

    #[test]
    fn test_validate_filter_values() {
        let defs = vec![FilterDef::number("age", "Age"), FilterDef::date("joined", "Joined")];
        let errors = validate_filter_values(
            &defs,
            &values(&[("age", "old".into()), ("joined", "2024-01-01".into())]),
        );
        assert_eq!(errors, vec![FieldValidationError::new("age", "Must be a valid number")]);
    }

    #[test]
    fn test_select_filter_matches_whole_value() {
        let rows = vec![
            Record::new(1).with("status", "active"),
            Record::new(2).with("status", "inactive"),
            Record::new(3).with("status", "Active"),
        ];
        let filters = values(&[("status", "active".into())]);
        let kinds: BTreeMap<String, FilterKind> =
            [("status".to_string(), FilterKind::Select)].into_iter().collect();

        assert_eq!(filter_indices_with_kinds(&rows, &filters, &kinds), vec![0]);
        assert_eq!(filter_indices(&rows, &filters), vec![0, 1, 2]);
    }

    #[test]
    fn test_select_filter_compares_numbers_by_text() {
        assert!(matches_filter_kind(FilterKind::Select, &Value::from(3), &Value::from("3")));
        assert!(!matches_filter_kind(FilterKind::Select, &Value::from(30), &Value::from("3")));
        assert!(!matches_filter_kind(FilterKind::Select, &Value::Null, &Value::from("3")));
        assert!(matches_filter_kind(FilterKind::Select, &Value::Null, &Value::Null));
    }

    #[test]
    fn test_placeholder_text() {
        assert_eq!(FilterDef::select("s", "Status", []).placeholder_text(), "Select Status");
        assert_eq!(
            FilterDef::text("n", "Name").with_placeholder("Search").placeholder_text(),
            "Search"
        );
    }
}
