//! Configuration warnings

/// A caller contract violation found in a [`TableConfig`](crate::table::TableConfig).
///
/// Warnings never abort: the table resolves each one deterministically
/// (the last registration of a key wins) and logs it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigWarning {
    /// Two columns share the same key.
    #[error("Duplicate column key '{key}'")]
    DuplicateColumn { key: String },

    /// Two filters share the same key.
    #[error("Duplicate filter key '{key}'")]
    DuplicateFilter { key: String },

    /// A filter targets a key no column declares.
    #[error("Filter '{key}' does not reference a known column")]
    UnknownFilterColumn { key: String },

    /// The mobile layout names a field no column declares.
    #[error("Mobile field '{key}' does not reference a known column")]
    UnknownMobileField { key: String },

    /// Pagination was enabled with a zero page size.
    #[error("Pagination page size must be greater than zero")]
    ZeroPageSize,
}
