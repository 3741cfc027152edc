//! Stateful engines owned by a table.
//!
//! Each engine holds only its own runtime state and knows nothing about the
//! others. Cross-engine rules (a filter change returns to page one, the
//! filtered count feeds pagination) live in [`Table`](crate::table::Table).

mod filter;
mod pagination;
mod selection;
mod sort;

pub use filter::FilterState;
pub use pagination::{DEFAULT_PAGE_SIZE_OPTIONS, Pagination};
pub use selection::{Selection, SelectionMode};
pub use sort::SortState;
