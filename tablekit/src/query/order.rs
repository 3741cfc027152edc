//! Ordering types and the row comparison used for sorting.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::model::DataItem;
use crate::model::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Applies this direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    /// Short lowercase name (`asc` / `desc`).
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single active sort of a table.
///
/// # Example
///
/// ```
/// use tablekit::query::{Direction, SortConfig};
///
/// let sort = SortConfig::desc("age");
/// assert_eq!(sort.direction, Direction::Desc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Column key being sorted.
    pub key: String,
    /// Sort direction.
    pub direction: Direction,
}

impl SortConfig {
    /// Creates a sort config.
    pub fn new(key: impl Into<String>, direction: Direction) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    /// Creates an ascending sort on a field.
    pub fn asc(key: impl Into<String>) -> Self {
        Self::new(key, Direction::Asc)
    }

    /// Creates a descending sort on a field.
    pub fn desc(key: impl Into<String>) -> Self {
        Self::new(key, Direction::Desc)
    }
}

/// Locale-style string ordering.
///
/// Letters compare case-insensitively first; on a tie lowercase sorts before
/// uppercase, then raw code points break any remaining tie.
///
/// This is not collation: lowercased code points are compared as-is, so
/// accented letters sort after `z` ("Díaz" comes after "Dz") and digits
/// compare one at a time ("10" before "9").
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

/// Ascending comparison of two field values.
///
/// Nulls sort after every defined value. Text uses [`locale_compare`],
/// numbers and dates compare by magnitude, and any other pairing compares
/// the display strings.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    if let (Value::Text(a), Value::Text(b)) = (a, b) {
        return locale_compare(a, b);
    }

    a.partial_cmp_same_kind(b)
        .unwrap_or_else(|| locale_compare(&a.to_string(), &b.to_string()))
}

/// Sorts row indices into `data` by the given config.
///
/// The sort is stable: rows with equal keys keep their relative order.
pub fn sort_indices<T: DataItem>(data: &[T], indices: &mut [usize], config: &SortConfig) {
    let keys: Vec<Value> = data.iter().map(|row| row.field(&config.key)).collect();
    indices.sort_by(|&a, &b| config.direction.apply(compare_values(&keys[a], &keys[b])));
}

/// Returns a sorted copy of `data`; `None` returns the data unchanged.
pub fn sort_data<T: DataItem>(data: &[T], config: Option<&SortConfig>) -> Vec<T> {
    let Some(config) = config else {
        return data.to_vec();
    };
    let mut indices: Vec<usize> = (0..data.len()).collect();
    sort_indices(data, &mut indices, config);
    indices.into_iter().map(|i| data[i].clone()).collect()
}
