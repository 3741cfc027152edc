//! Per-column filter values.

use std::collections::BTreeMap;

use log::trace;

use crate::model::Value;
use crate::query::FilterDef;

/// Holds the runtime value of every filter, keyed by column.
///
/// A value is active unless it is null or empty text; only active values
/// count and only active values become predicates.
///
/// # Example
///
/// ```
/// use tablekit::engine::FilterState;
///
/// let mut filters = FilterState::new();
/// filters.set_value("name", "an");
/// filters.set_value("age", 0);
/// filters.set_value("email", "");
/// assert_eq!(filters.active_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    values: BTreeMap<String, Value>,
    initial: BTreeMap<String, Value>,
}

impl FilterState {
    /// Creates an empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state seeded from the definitions' default values.
    ///
    /// [`reset`](Self::reset) returns to these values.
    pub fn from_defs(defs: &[FilterDef]) -> Self {
        let initial: BTreeMap<String, Value> = defs
            .iter()
            .filter_map(|d| d.default_value.clone().map(|v| (d.key.clone(), v)))
            .collect();
        Self {
            values: initial.clone(),
            initial,
        }
    }

    /// Sets the value of one filter.
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        trace!("Filter {key} = {value:?}");
        self.values.insert(key, value);
    }

    /// Removes the value of one filter.
    pub fn clear(&mut self, key: &str) {
        self.values.remove(key);
    }

    /// Removes every filter value.
    pub fn clear_all(&mut self) {
        self.values.clear();
    }

    /// Restores the initial values.
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
    }

    /// Value of one filter, `Null` when unset.
    pub fn value(&self, key: &str) -> Value {
        self.values.get(key).cloned().unwrap_or_default()
    }

    /// All stored values, active or not.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Iterates over the active values.
    pub fn active(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values
            .iter()
            .filter(|(_, v)| v.is_active())
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Check if any filter is active.
    pub fn has_active_filters(&self) -> bool {
        self.active().next().is_some()
    }

    /// Number of active filters.
    pub fn active_count(&self) -> usize {
        self.active().count()
    }
}
