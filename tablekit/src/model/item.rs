//! Row identity and the DataItem trait.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use super::Value;
use crate::error::TableError;

/// Stable identifier of a row.
///
/// Selection and row keys use this id, so it must be unique across the data
/// handed to a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    /// Integer id.
    Number(i64),
    /// String id.
    Text(String),
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowId::Number(n) => write!(f, "{n}"),
            RowId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for RowId {
    fn from(v: i64) -> Self {
        RowId::Number(v)
    }
}

impl From<i32> for RowId {
    fn from(v: i32) -> Self {
        RowId::Number(i64::from(v))
    }
}

impl From<u32> for RowId {
    fn from(v: u32) -> Self {
        RowId::Number(i64::from(v))
    }
}

impl From<&str> for RowId {
    fn from(v: &str) -> Self {
        RowId::Text(v.to_string())
    }
}

impl From<String> for RowId {
    fn from(v: String) -> Self {
        RowId::Text(v)
    }
}

impl From<RowId> for Value {
    fn from(id: RowId) -> Self {
        match id {
            RowId::Number(n) => Value::from(n),
            RowId::Text(s) => Value::Text(s),
        }
    }
}

/// Trait for items that can be displayed as rows in a table.
///
/// # Example
///
/// ```
/// use tablekit::model::{DataItem, RowId, Value};
///
/// #[derive(Clone)]
/// struct User {
///     id: u32,
///     name: String,
///     age: u32,
/// }
///
/// impl DataItem for User {
///     fn id(&self) -> RowId {
///         self.id.into()
///     }
///
///     fn field(&self, key: &str) -> Value {
///         match key {
///             "id" => self.id.into(),
///             "name" => self.name.as_str().into(),
///             "age" => self.age.into(),
///             _ => Value::Null,
///         }
///     }
/// }
/// ```
pub trait DataItem: Clone + Send + Sync + 'static {
    /// Unique identifier for this row.
    fn id(&self) -> RowId;

    /// Value of the named field, `Value::Null` when absent.
    fn field(&self, key: &str) -> Value;
}

/// A generic row: an id plus named field values.
///
/// # Example
///
/// ```
/// use tablekit::model::{DataItem, Record, Value};
///
/// let bob = Record::new(1).with("name", "Bob").with("age", 30);
/// assert_eq!(bob.field("name"), Value::from("Bob"));
/// assert_eq!(bob.field("missing"), Value::Null);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: RowId,
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record with the given id.
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Sets a field, returning the record.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a field.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Returns a reference to a field value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the field names in key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Builds a record from a JSON object.
    ///
    /// Same rules as deserializing a `Record` with serde; `index` only adds
    /// context to the error.
    pub fn from_json(index: usize, json: serde_json::Value) -> Result<Self, TableError> {
        if !json.is_object() {
            return Err(TableError::invalid_record(
                index,
                format!("expected a JSON object, got {}", json_type_name(&json)),
            ));
        }
        serde_json::from_value(json).map_err(|e| TableError::invalid_record(index, e.to_string()))
    }
}

impl DataItem for Record {
    fn id(&self) -> RowId {
        self.id.clone()
    }

    fn field(&self, key: &str) -> Value {
        if key == "id" {
            return self.id.clone().into();
        }
        self.fields.get(key).cloned().unwrap_or_default()
    }
}

/// Parses a JSON array of objects into records.
///
/// # Example
///
/// ```
/// use tablekit::model::records_from_json;
///
/// let rows = records_from_json(r#"[{"id": 1, "name": "Bob"}, {"id": 2, "name": "Ann"}]"#)?;
/// assert_eq!(rows.len(), 2);
/// # Ok::<(), tablekit::error::TableError>(())
/// ```
pub fn records_from_json(json: &str) -> Result<Vec<Record>, TableError> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Array(items) = parsed else {
        return Err(TableError::InvalidDataset {
            actual: json_type_name(&parsed),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| Record::from_json(index, item))
        .collect()
}

fn json_type_name(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
