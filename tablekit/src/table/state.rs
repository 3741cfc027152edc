//! Table orchestrator state and the recompute pipeline.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Range;
use std::sync::{Arc, Mutex};

use log::{debug, warn};
use tokio::sync::Notify;
use uuid::Uuid;

use crate::breakpoint::{Breakpoint, BreakpointDetector, Breakpoints, Viewport};
use crate::debounce::Debouncer;
use crate::engine::{FilterState, Pagination, Selection, SelectionMode, SortState};
use crate::error::{ConfigWarning, FieldValidationError, validation_map};
use crate::model::{DataItem, RowId, Value};
use crate::query::{
    coerce_filter_value, filter_indices_with_kinds, page_range, sort_indices, Direction,
    FilterKind, SortConfig,
};
use crate::theme::TableTheme;

use super::config::{PaginationConfig, TableConfig};

/// Unique identifier for a table instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TableId(Uuid);

impl TableId {
    /// Create a new unique table ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TableId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "table-{}", self.0)
    }
}

/// Settled free-text filter input waiting to be applied.
pub(super) type SettledInput = Arc<Mutex<Vec<(String, Value)>>>;

/// A headless table: data plus the sort, filter, pagination and selection
/// engines, recomputed after every mutation.
///
/// # Example
///
/// ```
/// use tablekit::model::Record;
/// use tablekit::table::{Table, TableBuilder};
///
/// let config = TableBuilder::new()
///     .add_column_with("name", "Name", |c| c.sortable())
///     .enable_sorting()
///     .build();
/// let mut table = Table::new(
///     vec![
///         Record::new(1).with("name", "Bob"),
///         Record::new(2).with("name", "Ann"),
///     ],
///     config,
/// );
///
/// table.sort_by("name");
/// let names: Vec<String> = table.rows().iter().map(|r| r.get("name").unwrap().to_string()).collect();
/// assert_eq!(names, ["Ann", "Bob"]);
/// ```
pub struct Table<T: DataItem> {
    pub(super) id: TableId,
    pub(super) config: TableConfig<T>,
    pub(super) theme: TableTheme,
    pub(super) warnings: Vec<ConfigWarning>,
    pub(super) data: Vec<T>,

    pub(super) sort: SortState,
    pub(super) filters: FilterState,
    pub(super) selection: Selection,
    pub(super) pagination: Pagination,
    pub(super) breakpoint: BreakpointDetector,
    pub(super) filters_collapsed: bool,

    pub(super) debouncers: HashMap<String, Debouncer<Value>>,
    pub(super) settled: SettledInput,
    pub(super) settled_signal: Arc<Notify>,

    /// Filtered and sorted indices into `data`.
    pub(super) processed: Vec<usize>,
    /// Range of `processed` shown on the current page.
    pub(super) page: Range<usize>,
    pub(super) validation: BTreeMap<String, String>,
}

impl<T: DataItem> std::fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("id", &self.id)
            .field("rows", &self.data.len())
            .field("processed", &self.processed.len())
            .field("sort", &self.sort)
            .field("filters", &self.filters)
            .field("pagination", &self.pagination)
            .field("breakpoint", &self.breakpoint)
            .finish_non_exhaustive()
    }
}

impl<T: DataItem> Table<T> {
    /// Creates a table at the default width.
    pub fn new(data: Vec<T>, config: TableConfig<T>) -> Self {
        Self::build(data, config, None)
    }

    /// Creates a table whose layout follows `viewport`.
    pub fn with_viewport(data: Vec<T>, config: TableConfig<T>, viewport: &Viewport) -> Self {
        Self::build(data, config, Some(viewport))
    }

    fn build(data: Vec<T>, mut config: TableConfig<T>, viewport: Option<&Viewport>) -> Self {
        let warnings = prepare_config(&mut config);
        let theme = resolve_theme(&config);
        let breakpoints = Breakpoints::from_theme(&theme);
        let breakpoint = match viewport {
            Some(viewport) => BreakpointDetector::attach(viewport, breakpoints),
            None => BreakpointDetector::detached(breakpoints),
        };

        let selection = match &config.selection {
            Some(s) => Selection::new(s.mode)
                .with_restriction(s.selectable_ids.clone())
                .with_selected(s.selected_ids.iter().cloned()),
            None => Selection::default(),
        };
        let pagination = config
            .pagination
            .as_ref()
            .map_or_else(Pagination::default, |p| Pagination::new(p.page, p.page_size));

        let mut table = Self {
            id: TableId::new(),
            filters: FilterState::from_defs(&config.filters),
            config,
            theme,
            warnings,
            data,
            sort: SortState::new(),
            selection,
            pagination,
            breakpoint,
            filters_collapsed: false,
            debouncers: HashMap::new(),
            settled: Arc::new(Mutex::new(Vec::new())),
            settled_signal: Arc::new(Notify::new()),
            processed: Vec::new(),
            page: 0..0,
            validation: BTreeMap::new(),
        };
        table.recompute();
        debug!("Created {} with {} rows", table.id, table.data.len());
        table
    }

    /// Runs the pipeline: validate filters, filter, sort, count, page, and
    /// refresh the selection's view of the rows.
    pub fn recompute(&mut self) {
        let (predicates, errors) = self.effective_filters();
        for error in &errors {
            warn!("{}: ignoring filter {error}", self.id);
        }
        self.validation = validation_map(&errors);

        let mut indices = if self.config.filterable {
            let kinds: BTreeMap<String, FilterKind> = self
                .config
                .filters
                .iter()
                .map(|f| (f.key.clone(), f.kind))
                .collect();
            filter_indices_with_kinds(&self.data, &predicates, &kinds)
        } else {
            (0..self.data.len()).collect()
        };

        if let Some(sort) = self.sort.current() {
            sort_indices(&self.data, &mut indices, sort);
        }

        self.pagination.set_total(indices.len());
        self.page = if self.config.pagination.is_some() {
            page_range(
                indices.len(),
                self.pagination.page(),
                self.pagination.page_size(),
            )
        } else {
            0..indices.len()
        };
        self.processed = indices;

        let view: Vec<RowId> = self.processed[self.page.clone()]
            .iter()
            .map(|&i| self.data[i].id())
            .collect();
        self.selection
            .set_rows(self.data.iter().map(DataItem::id), view);
    }

    /// Active filter values coerced to their declared kinds, plus the
    /// values that failed coercion.
    fn effective_filters(&self) -> (BTreeMap<String, Value>, Vec<FieldValidationError>) {
        let mut predicates = BTreeMap::new();
        let mut errors = Vec::new();
        for (key, value) in self.filters.active() {
            let kind = self
                .config
                .filters
                .iter()
                .find(|f| f.key == key)
                .map(|f| f.kind);
            match kind.map(|k| coerce_filter_value(k, value)) {
                None => {
                    predicates.insert(key.to_string(), value.clone());
                }
                Some(Ok(coerced)) => {
                    predicates.insert(key.to_string(), coerced);
                }
                Some(Err(e)) => errors.push(e.for_field(key)),
            }
        }
        (predicates, errors)
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Replaces the data. Engine state is kept; the page is clamped.
    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
        self.recompute();
    }

    /// Replaces the configuration, keeping sort, filter values, page and
    /// selection where the new configuration still allows them.
    pub fn set_config(&mut self, mut config: TableConfig<T>) {
        self.warnings = prepare_config(&mut config);
        self.theme = resolve_theme(&config);

        let selected = self.selection.selected();
        self.selection = match &config.selection {
            Some(s) if s.mode != SelectionMode::None => Selection::new(s.mode)
                .with_restriction(s.selectable_ids.clone())
                .with_selected(selected),
            _ => Selection::default(),
        };

        let old_size = self.config.pagination.as_ref().map(|p| p.page_size);
        let new_size = config.pagination.as_ref().map(|p| p.page_size);
        if let Some(size) = new_size.filter(|s| Some(*s) != old_size) {
            self.pagination.set_page_size(size);
        }

        let mut filters = FilterState::from_defs(&config.filters);
        filters.clear_all();
        for (key, value) in self.filters.values() {
            filters.set_value(key.clone(), value.clone());
        }
        self.filters = filters;
        self.debouncers.clear();
        self.config = config;
        self.recompute();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.config.loading = loading;
    }

    /// Sets the active sort directly, without callbacks.
    pub fn set_sort(&mut self, sort: Option<SortConfig>) {
        self.sort.set(sort);
        self.recompute();
    }

    // =========================================================================
    // Outputs
    // =========================================================================

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn config(&self) -> &TableConfig<T> {
        &self.config
    }

    /// Problems found in the configuration, already resolved.
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    pub fn theme(&self) -> &TableTheme {
        &self.theme
    }

    /// All source rows.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Rows on the current page, in display order.
    pub fn rows(&self) -> Vec<&T> {
        self.processed[self.page.clone()]
            .iter()
            .map(|&i| &self.data[i])
            .collect()
    }

    /// All rows passing the filters, in display order.
    pub fn processed_rows(&self) -> Vec<&T> {
        self.processed.iter().map(|&i| &self.data[i]).collect()
    }

    /// Row at `index` on the current page.
    pub fn page_row(&self, index: usize) -> Option<&T> {
        self.processed[self.page.clone()]
            .get(index)
            .map(|&i| &self.data[i])
    }

    /// Number of rows passing the filters.
    pub fn total_items(&self) -> usize {
        self.processed.len()
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn sort_direction(&self, key: &str) -> Option<Direction> {
        self.sort.direction(key)
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filter_values(&self) -> &BTreeMap<String, Value> {
        self.filters.values()
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.active_count()
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.has_active_filters()
    }

    /// Filter values that could not be coerced, keyed by filter.
    pub fn validation_errors(&self) -> &BTreeMap<String, String> {
        &self.validation
    }

    pub fn is_filters_collapsed(&self) -> bool {
        self.filters_collapsed
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_ids(&self) -> &HashSet<RowId> {
        self.selection.selected_set()
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selection.is_selected(id)
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint.current()
    }

    pub fn width(&self) -> u32 {
        self.breakpoint.width()
    }
}

/// Validates, logs and normalizes a configuration in place.
fn prepare_config<T>(config: &mut TableConfig<T>) -> Vec<ConfigWarning> {
    let warnings = config.validate();
    for warning in &warnings {
        warn!("Table configuration: {warning}");
    }
    config.normalize();
    if let Some(pagination) = config.pagination.as_mut() {
        pagination.page = pagination.page.max(PaginationConfig::default().page);
    }
    warnings
}

fn resolve_theme<T>(config: &TableConfig<T>) -> TableTheme {
    let Some(overrides) = &config.theme else {
        return TableTheme::default();
    };
    TableTheme::default()
        .merged(overrides)
        .unwrap_or_else(|e| {
            warn!("{e}; using the default theme");
            TableTheme::default()
        })
}
