//! Row selection over stable row ids.

use std::collections::HashSet;

use log::debug;

use crate::model::RowId;

/// Selection mode for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No selection allowed.
    #[default]
    None,
    /// At most one row selected (radio-button style).
    Single,
    /// Any number of rows selected (checkbox style).
    Multiple,
}

/// Tracks selected rows by id.
///
/// The selectable set is every known row id, narrowed by an optional
/// restriction. "All" refers to the rows currently in view, so select-all
/// never reaches rows on other pages.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    mode: SelectionMode,
    selected: HashSet<RowId>,
    restriction: Option<HashSet<RowId>>,
    universe: HashSet<RowId>,
    view: Vec<RowId>,
}

impl Selection {
    /// Create a selection engine in the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Create single-selection mode.
    pub fn single() -> Self {
        Self::new(SelectionMode::Single)
    }

    /// Create multiple-selection mode.
    pub fn multiple() -> Self {
        Self::new(SelectionMode::Multiple)
    }

    /// Seeds the selected set without checking selectability.
    pub fn with_selected(mut self, ids: impl IntoIterator<Item = RowId>) -> Self {
        self.selected = ids.into_iter().collect();
        if self.mode == SelectionMode::Single && self.selected.len() > 1 {
            let keep = self.selected.iter().min().cloned();
            self.selected = keep.into_iter().collect();
        }
        self
    }

    /// Restricts which ids may be selected.
    pub fn with_restriction(mut self, ids: Option<HashSet<RowId>>) -> Self {
        self.restriction = ids;
        self
    }

    /// Current mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Replace the known row ids and the ids currently in view.
    pub fn set_rows(
        &mut self,
        universe: impl IntoIterator<Item = RowId>,
        view: impl IntoIterator<Item = RowId>,
    ) {
        self.universe = universe.into_iter().collect();
        self.view = view.into_iter().collect();
    }

    /// Check if an id may be selected.
    pub fn is_selectable(&self, id: &RowId) -> bool {
        self.universe.contains(id) && self.restriction.as_ref().is_none_or(|r| r.contains(id))
    }

    /// Select a row. Returns true if selection changed.
    pub fn select(&mut self, id: RowId) -> bool {
        if self.mode == SelectionMode::None {
            return false;
        }
        if !self.is_selectable(&id) {
            debug!("Ignoring selection of non-selectable row {id}");
            return false;
        }
        match self.mode {
            SelectionMode::Single => {
                if self.selected.len() == 1 && self.selected.contains(&id) {
                    return false;
                }
                self.selected.clear();
                self.selected.insert(id)
            }
            _ => self.selected.insert(id),
        }
    }

    /// Deselect a row. Returns true if selection changed.
    pub fn deselect(&mut self, id: &RowId) -> bool {
        self.selected.remove(id)
    }

    /// Toggle a row. Returns true if selection changed.
    pub fn toggle(&mut self, id: RowId) -> bool {
        if self.selected.contains(&id) {
            self.deselect(&id)
        } else {
            self.select(id)
        }
    }

    /// Selects exactly the selectable rows in view (Multiple mode only).
    pub fn select_all(&mut self) -> bool {
        if self.mode != SelectionMode::Multiple {
            return false;
        }
        let next: HashSet<RowId> = self.selectable_view().cloned().collect();
        if next == self.selected {
            return false;
        }
        self.selected = next;
        true
    }

    /// Clear all selections. Returns true if selection changed.
    pub fn deselect_all(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        self.selected.clear();
        true
    }

    /// Deselects everything when all rows in view are selected, otherwise
    /// selects them all.
    pub fn toggle_all(&mut self) -> bool {
        if self.is_all_selected() {
            self.deselect_all()
        } else {
            self.select_all()
        }
    }

    /// Check if a row is selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    /// True when the view has selectable rows and all of them are selected.
    pub fn is_all_selected(&self) -> bool {
        let mut rows = self.selectable_view().peekable();
        rows.peek().is_some() && rows.all(|id| self.selected.contains(id))
    }

    /// True when some, but not all, selectable rows in view are selected.
    pub fn is_some_selected(&self) -> bool {
        self.selectable_view().any(|id| self.selected.contains(id)) && !self.is_all_selected()
    }

    /// The selected set.
    pub fn selected_set(&self) -> &HashSet<RowId> {
        &self.selected
    }

    /// Selected ids in ascending order.
    pub fn selected(&self) -> Vec<RowId> {
        let mut ids: Vec<RowId> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Get the single selected id (for Single mode).
    pub fn get_single(&self) -> Option<&RowId> {
        self.selected.iter().next()
    }

    fn selectable_view(&self) -> impl Iterator<Item = &RowId> {
        self.view.iter().filter(|id| self.is_selectable(id))
    }
}
