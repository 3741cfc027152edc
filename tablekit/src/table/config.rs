//! Table configuration.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use crate::engine::{DEFAULT_PAGE_SIZE_OPTIONS, SelectionMode};
use crate::error::ConfigWarning;
use crate::model::{RowId, Value};
use crate::query::{Direction, FilterDef};

use super::column::{Action, Column};

/// Message shown when the table has no data.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";

pub type RowHandler<T> = Arc<dyn Fn(&T, usize) + Send + Sync>;
pub type RowClassFn<T> = Arc<dyn Fn(&T, usize) -> String + Send + Sync>;
pub type CardRenderer<T> = Arc<dyn Fn(&T, usize) -> String + Send + Sync>;
pub type SelectionHandler = Arc<dyn Fn(&HashSet<RowId>) + Send + Sync>;
pub type SortHandler = Arc<dyn Fn(&str, Option<Direction>) + Send + Sync>;
pub type FilterHandler = Arc<dyn Fn(&str, &Value) + Send + Sync>;
pub type PageHandler = Arc<dyn Fn(usize) + Send + Sync>;
pub type EmptyActionHandler = Arc<dyn Fn() + Send + Sync>;

// =============================================================================
// Selection
// =============================================================================

/// Row selection settings.
#[derive(Clone)]
pub struct SelectionConfig {
    pub mode: SelectionMode,
    /// Ids selected when the table is created.
    pub selected_ids: HashSet<RowId>,
    /// Only these ids may be selected when set.
    pub selectable_ids: Option<HashSet<RowId>>,
    pub show_select_all: bool,
    pub on_selection_change: Option<SelectionHandler>,
}

impl std::fmt::Debug for SelectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionConfig")
            .field("mode", &self.mode)
            .field("selected_ids", &self.selected_ids)
            .field("selectable_ids", &self.selectable_ids)
            .field("show_select_all", &self.show_select_all)
            .finish_non_exhaustive()
    }
}

impl SelectionConfig {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected_ids: HashSet::new(),
            selectable_ids: None,
            show_select_all: true,
            on_selection_change: None,
        }
    }

    pub fn with_selected(mut self, ids: impl IntoIterator<Item = RowId>) -> Self {
        self.selected_ids = ids.into_iter().collect();
        self
    }

    pub fn with_selectable(mut self, ids: impl IntoIterator<Item = RowId>) -> Self {
        self.selectable_ids = Some(ids.into_iter().collect());
        self
    }

    pub fn with_select_all(mut self, show: bool) -> Self {
        self.show_select_all = show;
        self
    }

    pub fn on_change(mut self, f: impl Fn(&HashSet<RowId>) + Send + Sync + 'static) -> Self {
        self.on_selection_change = Some(Arc::new(f));
        self
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Pagination settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Initial 1-based page.
    pub page: usize,
    /// Initial page size.
    pub page_size: usize,
    /// Ignored on input; the table derives the total from filtered data.
    pub total: usize,
    pub page_size_options: Vec<usize>,
    pub show_page_size_selector: bool,
    pub show_first_last: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            total: 0,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            show_page_size_selector: true,
            show_first_last: true,
        }
    }
}

impl PaginationConfig {
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_page_size_options(mut self, options: impl Into<Vec<usize>>) -> Self {
        self.page_size_options = options.into();
        self
    }

    pub fn with_page_size_selector(mut self, show: bool) -> Self {
        self.show_page_size_selector = show;
        self
    }

    pub fn with_first_last(mut self, show: bool) -> Self {
        self.show_first_last = show;
        self
    }
}

// =============================================================================
// Mobile
// =============================================================================

/// Card layout used on mobile widths.
pub struct MobileConfig<T> {
    pub primary_field: String,
    pub secondary_field: Option<String>,
    pub tertiary_field: Option<String>,
    pub show_actions: bool,
    /// Replaces the field lines of a card when set.
    pub custom_renderer: Option<CardRenderer<T>>,
}

impl<T> Clone for MobileConfig<T> {
    fn clone(&self) -> Self {
        Self {
            primary_field: self.primary_field.clone(),
            secondary_field: self.secondary_field.clone(),
            tertiary_field: self.tertiary_field.clone(),
            show_actions: self.show_actions,
            custom_renderer: self.custom_renderer.clone(),
        }
    }
}

impl<T> std::fmt::Debug for MobileConfig<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MobileConfig")
            .field("primary_field", &self.primary_field)
            .field("secondary_field", &self.secondary_field)
            .field("tertiary_field", &self.tertiary_field)
            .field("show_actions", &self.show_actions)
            .finish_non_exhaustive()
    }
}

impl<T> MobileConfig<T> {
    pub fn new(primary_field: impl Into<String>) -> Self {
        Self {
            primary_field: primary_field.into(),
            secondary_field: None,
            tertiary_field: None,
            show_actions: false,
            custom_renderer: None,
        }
    }

    pub fn secondary(mut self, field: impl Into<String>) -> Self {
        self.secondary_field = Some(field.into());
        self
    }

    pub fn tertiary(mut self, field: impl Into<String>) -> Self {
        self.tertiary_field = Some(field.into());
        self
    }

    pub fn show_actions(mut self) -> Self {
        self.show_actions = true;
        self
    }

    pub fn custom_renderer(mut self, f: impl Fn(&T, usize) -> String + Send + Sync + 'static) -> Self {
        self.custom_renderer = Some(Arc::new(f));
        self
    }

    /// The configured fields, primary first.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary_field.as_str())
            .chain(self.secondary_field.as_deref())
            .chain(self.tertiary_field.as_deref())
    }
}

// =============================================================================
// Empty state
// =============================================================================

#[derive(Clone)]
pub struct EmptyAction {
    pub label: String,
    pub on_click: EmptyActionHandler,
}

impl std::fmt::Debug for EmptyAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmptyAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// What to show when there is no data.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub icon: Option<String>,
    pub action: Option<EmptyAction>,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self::new(DEFAULT_EMPTY_MESSAGE)
    }
}

impl EmptyState {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            icon: None,
            action: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn action(mut self, label: impl Into<String>, on_click: impl Fn() + Send + Sync + 'static) -> Self {
        self.action = Some(EmptyAction {
            label: label.into(),
            on_click: Arc::new(on_click),
        });
        self
    }
}

// =============================================================================
// TableConfig
// =============================================================================

/// Full configuration of a table.
///
/// Usually produced by [`TableBuilder`](super::TableBuilder).
pub struct TableConfig<T> {
    pub columns: Vec<Column<T>>,
    pub actions: Vec<Action<T>>,
    pub selection: Option<SelectionConfig>,
    pub sortable: bool,
    pub filterable: bool,
    pub filters: Vec<FilterDef>,
    pub pagination: Option<PaginationConfig>,
    pub mobile: Option<MobileConfig<T>>,
    pub loading: bool,
    pub empty: EmptyState,
    pub sticky_header: bool,
    pub full_screen: bool,
    pub on_row_click: Option<RowHandler<T>>,
    pub on_row_double_click: Option<RowHandler<T>>,
    pub row_class: Option<RowClassFn<T>>,
    /// Partial theme object merged over the default theme.
    pub theme: Option<serde_json::Value>,
    /// Quiet interval applied to free-text filter input.
    pub filter_debounce: Option<Duration>,
    pub on_sort: Option<SortHandler>,
    pub on_filter_change: Option<FilterHandler>,
    pub on_page_change: Option<PageHandler>,
    pub on_page_size_change: Option<PageHandler>,
}

impl<T> Default for TableConfig<T> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            actions: Vec::new(),
            selection: None,
            sortable: false,
            filterable: false,
            filters: Vec::new(),
            pagination: None,
            mobile: None,
            loading: false,
            empty: EmptyState::default(),
            sticky_header: false,
            full_screen: false,
            on_row_click: None,
            on_row_double_click: None,
            row_class: None,
            theme: None,
            filter_debounce: None,
            on_sort: None,
            on_filter_change: None,
            on_page_change: None,
            on_page_size_change: None,
        }
    }
}

impl<T> Clone for TableConfig<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            actions: self.actions.clone(),
            selection: self.selection.clone(),
            sortable: self.sortable,
            filterable: self.filterable,
            filters: self.filters.clone(),
            pagination: self.pagination.clone(),
            mobile: self.mobile.clone(),
            loading: self.loading,
            empty: self.empty.clone(),
            sticky_header: self.sticky_header,
            full_screen: self.full_screen,
            on_row_click: self.on_row_click.clone(),
            on_row_double_click: self.on_row_double_click.clone(),
            row_class: self.row_class.clone(),
            theme: self.theme.clone(),
            filter_debounce: self.filter_debounce,
            on_sort: self.on_sort.clone(),
            on_filter_change: self.on_filter_change.clone(),
            on_page_change: self.on_page_change.clone(),
            on_page_size_change: self.on_page_size_change.clone(),
        }
    }
}

impl<T> std::fmt::Debug for TableConfig<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableConfig")
            .field("columns", &self.columns)
            .field("actions", &self.actions)
            .field("selection", &self.selection)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("filters", &self.filters)
            .field("pagination", &self.pagination)
            .field("mobile", &self.mobile)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

impl<T> TableConfig<T> {
    /// Selection mode, `None` when selection is not configured.
    pub fn selection_mode(&self) -> SelectionMode {
        self.selection
            .as_ref()
            .map_or(SelectionMode::None, |s| s.mode)
    }

    /// Checks the configuration for caller mistakes.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        for key in duplicates(self.columns.iter().map(|c| c.key.as_str())) {
            warnings.push(ConfigWarning::DuplicateColumn { key });
        }
        for key in duplicates(self.filters.iter().map(|f| f.key.as_str())) {
            warnings.push(ConfigWarning::DuplicateFilter { key });
        }

        let known: HashSet<&str> = self.columns.iter().map(|c| c.key.as_str()).collect();
        let mut reported = HashSet::new();
        for filter in &self.filters {
            if !known.contains(filter.key.as_str()) && reported.insert(filter.key.as_str()) {
                warnings.push(ConfigWarning::UnknownFilterColumn {
                    key: filter.key.clone(),
                });
            }
        }

        if let Some(mobile) = &self.mobile {
            for field in mobile.fields() {
                if !known.contains(field) {
                    warnings.push(ConfigWarning::UnknownMobileField {
                        key: field.to_string(),
                    });
                }
            }
        }

        if self.pagination.as_ref().is_some_and(|p| p.page_size == 0) {
            warnings.push(ConfigWarning::ZeroPageSize);
        }

        warnings
    }

    /// Resolves duplicate keys (last registration wins, at its own
    /// position), adds a text filter for each filterable column without
    /// one, and replaces a zero page size with the default.
    pub(crate) fn normalize(&mut self) {
        dedupe_last_wins(&mut self.columns, |c| c.key.clone());
        dedupe_last_wins(&mut self.filters, |f| f.key.clone());
        for column in self.columns.iter().filter(|c| c.filterable) {
            if !self.filters.iter().any(|f| f.key == column.key) {
                self.filters
                    .push(FilterDef::text(column.key.clone(), column.label.clone()));
                self.filterable = true;
            }
        }
        if let Some(pagination) = self.pagination.as_mut() {
            if pagination.page_size == 0 {
                pagination.page_size = PaginationConfig::default().page_size;
            }
        }
    }
}

/// Keys appearing more than once, in first-seen order.
fn duplicates<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut order = Vec::new();
    for key in keys {
        let count = counts.entry(key).or_insert(0);
        if *count == 1 {
            order.push(key.to_string());
        }
        *count += 1;
    }
    order
}

fn dedupe_last_wins<I>(items: &mut Vec<I>, key: impl Fn(&I) -> String) {
    let mut seen = HashSet::new();
    let mut kept: Vec<I> = Vec::with_capacity(items.len());
    for item in items.drain(..).rev() {
        if seen.insert(key(&item)) {
            kept.push(item);
        }
    }
    kept.reverse();
    *items = kept;
}
