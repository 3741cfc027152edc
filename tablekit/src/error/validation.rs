//! Filter value validation errors

use std::collections::BTreeMap;

/// Error information for a filter field whose value failed coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidationError {
    /// The filter key that failed validation.
    pub field: String,
    /// Human-readable validation error message.
    pub message: String,
}

impl FieldValidationError {
    /// Creates a new field validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Reason a raw filter value could not be coerced to its declared kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FilterValueError {
    #[error("Must be a valid number")]
    NotANumber,
    #[error("Must be a valid date")]
    NotADate,
    #[error("Must be true or false")]
    NotABoolean,
}

impl FilterValueError {
    /// Attaches the offending field to this error.
    pub fn for_field(self, field: impl Into<String>) -> FieldValidationError {
        FieldValidationError::new(field, self.to_string())
    }
}

/// Collects validation errors into the `{field -> message}` map consumed by
/// filter inputs.
pub fn validation_map<'a>(
    errors: impl IntoIterator<Item = &'a FieldValidationError>,
) -> BTreeMap<String, String> {
    errors
        .into_iter()
        .map(|e| (e.field.clone(), e.message.clone()))
        .collect()
}
