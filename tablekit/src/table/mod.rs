//! The table orchestrator and its configuration.
//!
//! A [`Table`] owns the data and one instance of each engine. Every user
//! action goes through a method on `Table`, which mutates the engines,
//! reruns the filter/sort/page pipeline and fires the configured callback.
//! [`Table::view`] then produces a [`TableView`] for rendering.

mod builder;
mod column;
mod config;
mod events;
mod render;
mod state;
mod text;

pub use builder::TableBuilder;
pub use column::{
    Action, ActionColor, ActionHandler, ActionVariant, Alignment, CellRenderer, Column,
    ColumnWidth, RowPredicate,
};
pub use config::{
    CardRenderer, DEFAULT_EMPTY_MESSAGE, EmptyAction, EmptyActionHandler, EmptyState,
    FilterHandler, MobileConfig, PageHandler, PaginationConfig, RowClassFn, RowHandler,
    SelectionConfig, SelectionHandler, SortHandler, TableConfig,
};
pub use render::{
    ActionView, CLEAR_FILTERS_LABEL, CardView, FilterBarView, FilterFieldView, HeaderCell,
    LOADING_MESSAGE, Layout, NO_RESULTS_MESSAGE, PageInfo, RenderState, RowView,
    SelectionView, TableView, render_state, render_text,
};
pub use state::{Table, TableId};
pub use text::{display_width, pad_aligned, truncate_to_width};
