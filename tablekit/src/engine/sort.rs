//! Single-column sort state with tri-state cycling.

use log::trace;

use crate::query::Direction;
use crate::query::SortConfig;

/// Tracks the one active sort of a table.
///
/// # Example
///
/// ```
/// use tablekit::engine::SortState;
/// use tablekit::query::Direction;
///
/// let mut sort = SortState::new();
/// assert_eq!(sort.toggle("name"), Some(Direction::Asc));
/// assert_eq!(sort.toggle("name"), Some(Direction::Desc));
/// assert_eq!(sort.toggle("name"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    current: Option<SortConfig>,
}

impl SortState {
    /// Creates an unsorted state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state with an initial sort.
    pub fn with_initial(config: SortConfig) -> Self {
        Self {
            current: Some(config),
        }
    }

    /// Advances the sort for `key` and returns its new direction.
    ///
    /// Unsorted → ascending → descending → unsorted. A key other than the
    /// active one always starts at ascending and replaces it.
    pub fn toggle(&mut self, key: &str) -> Option<Direction> {
        let next = match &self.current {
            Some(c) if c.key == key => match c.direction {
                Direction::Asc => Some(SortConfig::desc(key)),
                Direction::Desc => None,
            },
            _ => Some(SortConfig::asc(key)),
        };
        trace!("Sort {key}: {:?} -> {:?}", self.current, next);
        self.current = next;
        self.direction(key)
    }

    /// Direction of `key` if it is the active sort.
    pub fn direction(&self, key: &str) -> Option<Direction> {
        self.current
            .as_ref()
            .filter(|c| c.key == key)
            .map(|c| c.direction)
    }

    /// Check if `key` is the active sort.
    pub fn is_sorted(&self, key: &str) -> bool {
        self.direction(key).is_some()
    }

    /// The active sort, if any.
    pub fn current(&self) -> Option<&SortConfig> {
        self.current.as_ref()
    }

    /// Replace the active sort.
    pub fn set(&mut self, config: Option<SortConfig>) {
        self.current = config;
    }

    /// Remove sorting.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
