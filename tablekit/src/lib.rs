//! Headless table engine
//!
//! Sorting, filtering, pagination, row selection and responsive layout for
//! tabular data, with a configuration builder and a plain-text renderer.

pub mod breakpoint;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod model;
pub mod query;
pub mod table;
pub mod theme;

pub mod prelude {
    pub use crate::breakpoint::{Breakpoint, BreakpointDetector, Breakpoints, Viewport};
    pub use crate::engine::SelectionMode;
    pub use crate::error::{ConfigWarning, TableError};
    pub use crate::model::{DataItem, Record, RowId, Value, records_from_json};
    pub use crate::query::{Direction, FilterDef, FilterKind, FilterOption, SortConfig};
    pub use crate::table::{
        Action, Alignment, Column, ColumnWidth, EmptyState, MobileConfig, PaginationConfig,
        RenderState, SelectionConfig, Table, TableBuilder, TableConfig, TableView, render_text,
    };
    pub use crate::theme::TableTheme;
}
