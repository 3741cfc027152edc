//! Fluent construction of a [`TableConfig`].

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use log::warn;

use crate::engine::SelectionMode;
use crate::model::{DataItem, RowId, Value};
use crate::query::{Direction, FilterDef};

use super::column::{Action, Column};
use super::config::{EmptyState, MobileConfig, PaginationConfig, SelectionConfig, TableConfig};

/// Builds a [`TableConfig`]. Each call consumes and returns the builder.
///
/// # Example
///
/// ```
/// use tablekit::engine::SelectionMode;
/// use tablekit::model::Record;
/// use tablekit::query::FilterDef;
/// use tablekit::table::{PaginationConfig, TableBuilder};
///
/// let config = TableBuilder::<Record>::new()
///     .add_column_with("name", "Name", |c| c.sortable())
///     .add_column("email", "Email")
///     .enable_sorting()
///     .add_filter(FilterDef::text("name", "Name"))
///     .enable_selection(SelectionMode::Multiple)
///     .enable_pagination(PaginationConfig::default().with_page_size(25))
///     .build();
///
/// assert!(config.filterable);
/// assert_eq!(config.columns.len(), 2);
/// ```
pub struct TableBuilder<T> {
    config: TableConfig<T>,
}

impl<T: DataItem> Default for TableBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DataItem> TableBuilder<T> {
    pub fn new() -> Self {
        Self {
            config: TableConfig::default(),
        }
    }

    pub fn add_column(self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.add_column_def(Column::new(key, label))
    }

    /// Adds a column customised by `f`.
    pub fn add_column_with(
        self,
        key: impl Into<String>,
        label: impl Into<String>,
        f: impl FnOnce(Column<T>) -> Column<T>,
    ) -> Self {
        self.add_column_def(f(Column::new(key, label)))
    }

    pub fn add_column_def(mut self, column: Column<T>) -> Self {
        self.config.columns.push(column);
        self
    }

    pub fn add_columns(mut self, columns: impl IntoIterator<Item = Column<T>>) -> Self {
        self.config.columns.extend(columns);
        self
    }

    pub fn add_action(mut self, action: Action<T>) -> Self {
        self.config.actions.push(action);
        self
    }

    pub fn add_actions(mut self, actions: impl IntoIterator<Item = Action<T>>) -> Self {
        self.config.actions.extend(actions);
        self
    }

    /// Enables selection in `mode` with default options.
    pub fn enable_selection(self, mode: SelectionMode) -> Self {
        self.enable_selection_with(SelectionConfig::new(mode))
    }

    pub fn enable_selection_with(mut self, selection: SelectionConfig) -> Self {
        self.config.selection = Some(selection);
        self
    }

    /// Sets the selection callback. Selection must already be enabled.
    pub fn on_selection_change(mut self, f: impl Fn(&HashSet<RowId>) + Send + Sync + 'static) -> Self {
        match self.config.selection.as_mut() {
            Some(selection) => selection.on_selection_change = Some(Arc::new(f)),
            None => warn!("on_selection_change ignored: selection is not enabled"),
        }
        self
    }

    pub fn enable_sorting(mut self) -> Self {
        self.config.sortable = true;
        self
    }

    pub fn enable_filtering(mut self) -> Self {
        self.config.filterable = true;
        self
    }

    pub fn add_filter(mut self, filter: FilterDef) -> Self {
        self.config.filters.push(filter);
        self.config.filterable = true;
        self
    }

    pub fn add_filters(mut self, filters: impl IntoIterator<Item = FilterDef>) -> Self {
        self.config.filters.extend(filters);
        self.config.filterable = true;
        self
    }

    pub fn enable_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.config.pagination = Some(pagination);
        self
    }

    pub fn configure_mobile(mut self, mobile: MobileConfig<T>) -> Self {
        self.config.mobile = Some(mobile);
        self
    }

    /// Partial theme merged over the default theme.
    pub fn set_theme(mut self, theme: serde_json::Value) -> Self {
        self.config.theme = Some(theme);
        self
    }

    pub fn set_loading(mut self, loading: bool) -> Self {
        self.config.loading = loading;
        self
    }

    pub fn empty_state(mut self, empty: EmptyState) -> Self {
        self.config.empty = empty;
        self
    }

    pub fn sticky_header(mut self) -> Self {
        self.config.sticky_header = true;
        self
    }

    pub fn full_screen(mut self) -> Self {
        self.config.full_screen = true;
        self
    }

    /// Debounces free-text filter input by `delay`.
    pub fn filter_debounce(mut self, delay: Duration) -> Self {
        self.config.filter_debounce = Some(delay);
        self
    }

    pub fn on_row_click(mut self, f: impl Fn(&T, usize) + Send + Sync + 'static) -> Self {
        self.config.on_row_click = Some(Arc::new(f));
        self
    }

    pub fn on_row_double_click(mut self, f: impl Fn(&T, usize) + Send + Sync + 'static) -> Self {
        self.config.on_row_double_click = Some(Arc::new(f));
        self
    }

    pub fn row_class(mut self, f: impl Fn(&T, usize) -> String + Send + Sync + 'static) -> Self {
        self.config.row_class = Some(Arc::new(f));
        self
    }

    pub fn on_sort(mut self, f: impl Fn(&str, Option<Direction>) + Send + Sync + 'static) -> Self {
        self.config.on_sort = Some(Arc::new(f));
        self
    }

    pub fn on_filter_change(mut self, f: impl Fn(&str, &Value) + Send + Sync + 'static) -> Self {
        self.config.on_filter_change = Some(Arc::new(f));
        self
    }

    pub fn on_page_change(mut self, f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.config.on_page_change = Some(Arc::new(f));
        self
    }

    pub fn on_page_size_change(mut self, f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.config.on_page_size_change = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> TableConfig<T> {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn test_defaults() {
        let config = TableBuilder::<Record>::new().build();
        assert!(config.columns.is_empty());
        assert!(!config.sortable && !config.filterable);
        assert!(config.pagination.is_none());
        assert_eq!(config.selection_mode(), SelectionMode::None);
        assert_eq!(config.empty.message, "No data available");
    }

    #[test]
    fn test_add_filters_enables_filtering() {
        let config = TableBuilder::<Record>::new()
            .add_filters([FilterDef::text("a", "A"), FilterDef::number("b", "B")])
            .build();
        assert!(config.filterable);
        assert_eq!(config.filters.len(), 2);
    }

    #[test]
    fn test_enable_pagination_defaults() {
        let config = TableBuilder::<Record>::new()
            .enable_pagination(PaginationConfig::default())
            .build();
        let pagination = config.pagination.unwrap();
        assert_eq!((pagination.page, pagination.page_size, pagination.total), (1, 10, 0));
    }

    #[test]
    fn test_flags_and_callbacks() {
        let config = TableBuilder::<Record>::new()
            .sticky_header()
            .full_screen()
            .filter_debounce(Duration::from_millis(300))
            .enable_selection(SelectionMode::Single)
            .on_selection_change(|_| {})
            .on_row_click(|_, _| {})
            .build();
        assert!(config.sticky_header && config.full_screen);
        assert_eq!(config.filter_debounce, Some(Duration::from_millis(300)));
        assert!(config.selection.unwrap().on_selection_change.is_some());
        assert!(config.on_row_click.is_some());
    }
}
