//! User actions on a table.
//!
//! Each action mutates the engines, recomputes, and then invokes the
//! matching callback synchronously. Callbacks always observe the
//! post-action state.

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, trace};
use tokio::sync::Notify;

use crate::debounce::Debouncer;
use crate::engine::SelectionMode;
use crate::model::{DataItem, RowId, Value};
use crate::query::FilterKind;

use super::render::RenderState;
use super::state::Table;

impl<T: DataItem> Table<T> {
    // =========================================================================
    // Sorting
    // =========================================================================

    /// Cycles the sort on `key`. Returns false when sorting is disabled or
    /// the column is not sortable.
    pub fn sort_by(&mut self, key: &str) -> bool {
        let sortable = self.config.sortable
            && self
                .config
                .columns
                .iter()
                .any(|c| c.key == key && c.sortable);
        if !sortable {
            debug!("{}: column '{key}' is not sortable", self.id);
            return false;
        }

        let direction = self.sort.toggle(key);
        self.recompute();
        if let Some(on_sort) = self.config.on_sort.clone() {
            on_sort(key, direction);
        }
        true
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Sets a filter value and returns to page one.
    pub fn set_filter(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        self.filters.set_value(key, value.clone());
        self.after_filter_change(&[(key.to_string(), value)]);
    }

    pub fn clear_filter(&mut self, key: &str) {
        self.filters.clear(key);
        self.after_filter_change(&[(key.to_string(), Value::Null)]);
    }

    pub fn clear_all_filters(&mut self) {
        let changed: Vec<(String, Value)> = self
            .filters
            .values()
            .keys()
            .map(|k| (k.clone(), Value::Null))
            .collect();
        self.filters.clear_all();
        self.after_filter_change(&changed);
    }

    /// Restores the filters' default values.
    pub fn reset_filters(&mut self) {
        let before = self.filters.values().clone();
        self.filters.reset();
        let after = self.filters.values();
        let keys: BTreeSet<&String> = before.keys().chain(after.keys()).collect();
        let changed: Vec<(String, Value)> = keys
            .into_iter()
            .filter(|k| before.get(*k) != after.get(*k))
            .map(|k| (k.clone(), after.get(k).cloned().unwrap_or_default()))
            .collect();
        self.after_filter_change(&changed);
    }

    fn after_filter_change(&mut self, changed: &[(String, Value)]) {
        self.pagination.reset_page();
        self.recompute();
        if let Some(on_filter_change) = self.config.on_filter_change.clone() {
            for (key, value) in changed {
                on_filter_change(key, value);
            }
        }
    }

    /// Records free-text input for a filter.
    ///
    /// Without a configured debounce interval, or for a non-text filter,
    /// the value applies immediately. Otherwise it is held as a draft until
    /// the input has been quiet for the interval:
    ///
    /// - with a zero interval or outside a tokio runtime the draft settles
    ///   at once and is applied before this returns;
    /// - inside a runtime the settled value is queued and
    ///   [`filter_input_settled`](Self::filter_input_settled) is notified.
    ///   The owner then calls
    ///   [`apply_settled_filters`](Self::apply_settled_filters), which
    ///   recomputes and fires `on_filter_change`.
    ///
    /// ```
    /// # async fn run(mut table: tablekit::table::Table<tablekit::model::Record>) {
    /// let settled = table.filter_input_settled();
    /// table.input_filter("name", "an");
    /// settled.notified().await;
    /// table.apply_settled_filters();
    /// # }
    /// ```
    pub fn input_filter(&mut self, key: &str, text: impl Into<String>) {
        let text = text.into();
        let is_text = self
            .config
            .filters
            .iter()
            .any(|f| f.key == key && f.kind == FilterKind::Text);
        let Some(delay) = self.config.filter_debounce.filter(|_| is_text) else {
            self.set_filter(key, text);
            return;
        };

        let settled = Arc::clone(&self.settled);
        let signal = Arc::clone(&self.settled_signal);
        let debouncer = self.debouncers.entry(key.to_string()).or_insert_with(|| {
            let key = key.to_string();
            Debouncer::new(delay, move |value: Value| {
                trace!("Filter input '{key}' settled");
                settled
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .push((key.clone(), value));
                signal.notify_one();
            })
        });
        debouncer.push(Value::Text(text));

        if !debouncer.is_pending() {
            self.apply_settled_filters();
        }
    }

    /// Signalled whenever debounced filter input settles and is waiting
    /// for [`apply_settled_filters`](Self::apply_settled_filters).
    ///
    /// A notification sent while nobody waits is kept until the next
    /// `notified().await`, so a wake-up may find the input already applied;
    /// `apply_settled_filters` then returns false.
    pub fn filter_input_settled(&self) -> Arc<Notify> {
        Arc::clone(&self.settled_signal)
    }

    /// The latest typed value of a debounced filter.
    pub fn filter_draft(&self, key: &str) -> Value {
        self.debouncers
            .get(key)
            .and_then(Debouncer::draft)
            .unwrap_or_else(|| self.filters.value(key))
    }

    /// Applies filter input that has settled. Returns true if any applied.
    pub fn apply_settled_filters(&mut self) -> bool {
        let settled: Vec<(String, Value)> = std::mem::take(
            &mut *self
                .settled
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        );
        if settled.is_empty() {
            return false;
        }
        for (key, value) in &settled {
            self.filters.set_value(key.clone(), value.clone());
        }
        self.after_filter_change(&settled);
        true
    }

    /// Applies pending filter input now, without waiting.
    pub fn flush_filter_input(&mut self) -> bool {
        for debouncer in self.debouncers.values() {
            debouncer.flush();
        }
        self.apply_settled_filters()
    }

    pub fn toggle_filters_collapsed(&mut self) -> bool {
        self.filters_collapsed = !self.filters_collapsed;
        self.filters_collapsed
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Toggles one row. Returns true if the selection changed.
    pub fn toggle_row_selection(&mut self, id: impl Into<RowId>) -> bool {
        let changed = self.selection.toggle(id.into());
        if changed {
            self.notify_selection();
        }
        changed
    }

    /// Selects every selectable row on the page, or clears the selection
    /// when they are all selected already. Multiple mode only.
    pub fn toggle_all_selection(&mut self) -> bool {
        if self.selection.mode() != SelectionMode::Multiple {
            return false;
        }
        let changed = self.selection.toggle_all();
        if changed {
            self.notify_selection();
        }
        changed
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = self.selection.deselect_all();
        if changed {
            self.notify_selection();
        }
        changed
    }

    fn notify_selection(&self) {
        let handler = self
            .config
            .selection
            .as_ref()
            .and_then(|s| s.on_selection_change.clone());
        if let Some(handler) = handler {
            handler(self.selection.selected_set());
        }
    }

    // =========================================================================
    // Rows and actions
    // =========================================================================

    /// Click on the row at `index` of the current page.
    pub fn click_row(&self, index: usize) -> bool {
        let (Some(handler), Some(row)) = (self.config.on_row_click.clone(), self.page_row(index))
        else {
            return false;
        };
        handler(row, index);
        true
    }

    pub fn double_click_row(&self, index: usize) -> bool {
        let (Some(handler), Some(row)) =
            (self.config.on_row_double_click.clone(), self.page_row(index))
        else {
            return false;
        };
        handler(row, index);
        true
    }

    /// Runs action `key` on the row at `index`. Hidden or disabled actions
    /// do nothing.
    pub fn trigger_action(&self, key: &str, index: usize) -> bool {
        let Some(row) = self.page_row(index) else {
            return false;
        };
        let Some(action) = self.config.actions.iter().find(|a| a.key == key) else {
            debug!("{}: no action '{key}'", self.id);
            return false;
        };
        if !action.is_visible(row) || action.is_disabled(row) {
            debug!("{}: action '{key}' unavailable for row {}", self.id, row.id());
            return false;
        }
        (action.on_click)(row, index);
        true
    }

    /// Runs the action offered by the empty or no-results state.
    ///
    /// With no results the action clears every filter.
    pub fn trigger_empty_action(&mut self) -> bool {
        match self.render_state() {
            RenderState::NoResults => {
                self.clear_all_filters();
                true
            }
            RenderState::Empty => match self.config.empty.action.clone() {
                Some(action) => {
                    (action.on_click)();
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let moved = self.pagination.go_to_page(page);
        self.after_page_move(moved)
    }

    pub fn next_page(&mut self) -> bool {
        let moved = self.pagination.next_page();
        self.after_page_move(moved)
    }

    pub fn previous_page(&mut self) -> bool {
        let moved = self.pagination.previous_page();
        self.after_page_move(moved)
    }

    pub fn first_page(&mut self) -> bool {
        let moved = self.pagination.first_page();
        self.after_page_move(moved)
    }

    pub fn last_page(&mut self) -> bool {
        let moved = self.pagination.last_page();
        self.after_page_move(moved)
    }

    fn after_page_move(&mut self, moved: bool) -> bool {
        if !moved {
            return false;
        }
        self.recompute();
        if let Some(on_page_change) = self.config.on_page_change.clone() {
            on_page_change(self.pagination.page());
        }
        true
    }

    /// Changes the page size; the page is clamped into the new range.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if !self.pagination.set_page_size(page_size) {
            return false;
        }
        self.recompute();
        if let Some(on_page_size_change) = self.config.on_page_size_change.clone() {
            on_page_size_change(page_size);
        }
        true
    }
}
