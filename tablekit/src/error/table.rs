//! Errors raised at the fallible boundaries of the crate

/// Errors produced while loading data or applying external configuration.
///
/// The engines themselves never fail: invalid interactions degrade to
/// no-ops. This type only covers parsing and deserialization at the edges.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A record could not be built from the supplied JSON.
    #[error("Invalid record at position {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// The dataset was not a JSON array of objects.
    #[error("Dataset must be a JSON array of objects, got {actual}")]
    InvalidDataset { actual: &'static str },

    /// Theme overrides did not match the theme shape.
    #[error("Invalid theme override: {0}")]
    InvalidTheme(String),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TableError {
    /// Creates a new invalid record error.
    pub fn invalid_record(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            index,
            reason: reason.into(),
        }
    }
}
