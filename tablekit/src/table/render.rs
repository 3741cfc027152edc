//! View model and plain-text rendering.
//!
//! [`Table::view`] flattens the table into a [`TableView`]: everything a
//! front end needs to draw one frame, already resolved to text. The
//! [`render_text`] function draws that view as a fixed-width grid or a
//! card list.

use crate::breakpoint::Breakpoint;
use crate::engine::SelectionMode;
use crate::model::{DataItem, RowId};
use crate::query::{Direction, FilterKind, format_cell_value};

use super::column::{Alignment, Column, ColumnWidth};
use super::state::Table;
use super::text::{display_width, pad_aligned};

/// Message shown while loading.
pub const LOADING_MESSAGE: &str = "Loading table data...";
/// Message shown when filters exclude every row.
pub const NO_RESULTS_MESSAGE: &str = "No results found for current filters";
/// Action offered when filters exclude every row.
pub const CLEAR_FILTERS_LABEL: &str = "Clear filters";

/// Which of the four table states to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Loading,
    /// No source rows at all.
    Empty,
    /// Source rows exist but active filters exclude all of them.
    NoResults,
    Normal,
}

/// Picks the render state. Earlier states win.
///
/// # Example
///
/// ```
/// use tablekit::table::{RenderState, render_state};
///
/// assert_eq!(render_state(true, 0, 0, false), RenderState::Loading);
/// assert_eq!(render_state(false, 0, 0, true), RenderState::Empty);
/// assert_eq!(render_state(false, 3, 0, true), RenderState::NoResults);
/// assert_eq!(render_state(false, 3, 0, false), RenderState::Normal);
/// ```
pub fn render_state(
    loading: bool,
    source_len: usize,
    filtered_len: usize,
    filters_active: bool,
) -> RenderState {
    if loading {
        RenderState::Loading
    } else if source_len == 0 {
        RenderState::Empty
    } else if filtered_len == 0 && filters_active {
        RenderState::NoResults
    } else {
        RenderState::Normal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Column grid.
    Desktop,
    /// One card per row.
    Mobile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    /// Arrow text when this column is the active sort.
    pub indicator: Option<&'static str>,
    pub align: Alignment,
    pub width: ColumnWidth,
    pub min_width: Option<u16>,
    pub max_width: Option<u16>,
    pub sticky: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionView {
    pub key: String,
    pub label: String,
    pub icon: Option<String>,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: RowId,
    /// Position on the current page.
    pub index: usize,
    pub cells: Vec<String>,
    pub selected: bool,
    pub class: Option<String>,
    /// Theme background token.
    pub background: String,
    pub actions: Vec<ActionView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: RowId,
    pub index: usize,
    /// Primary line first.
    pub lines: Vec<String>,
    pub selected: bool,
    pub background: String,
    pub actions: Vec<ActionView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionView {
    pub enabled: bool,
    pub show_select_all: bool,
    pub all_selected: bool,
    pub some_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterFieldView {
    pub key: String,
    pub label: String,
    pub kind: FilterKind,
    pub placeholder: String,
    /// Current value as shown in the input, option label for selects.
    pub value: String,
    pub active: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBarView {
    pub collapsed: bool,
    pub active_count: usize,
    pub fields: Vec<FilterFieldView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    /// "Showing a-b of n items".
    pub summary: String,
    pub page_numbers: Vec<usize>,
    pub has_previous: bool,
    pub has_next: bool,
    pub page_size_options: Vec<usize>,
    pub show_page_size_selector: bool,
    pub show_first_last: bool,
}

/// One frame of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub state: RenderState,
    pub layout: Layout,
    pub breakpoint: Breakpoint,
    /// Message for the loading, empty and no-results states.
    pub message: Option<String>,
    pub icon: Option<String>,
    /// Label of the action offered by the empty or no-results state.
    pub empty_action: Option<String>,
    /// Placeholder row count while loading.
    pub loading_rows: usize,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RowView>,
    pub cards: Vec<CardView>,
    pub selection: SelectionView,
    pub filter_bar: Option<FilterBarView>,
    pub pagination: Option<PageInfo>,
    pub sticky_header: bool,
    pub full_screen: bool,
}

const MAX_VISIBLE_PAGES: usize = 5;

impl<T: DataItem> Table<T> {
    pub fn render_state(&self) -> RenderState {
        render_state(
            self.config.loading,
            self.data.len(),
            self.total_items(),
            self.has_active_filters(),
        )
    }

    /// Layout for the current breakpoint.
    pub fn layout(&self) -> Layout {
        if self.breakpoint() == Breakpoint::Mobile && self.config.mobile.is_some() {
            Layout::Mobile
        } else {
            Layout::Desktop
        }
    }

    /// Builds the view model of the current frame.
    pub fn view(&self) -> TableView {
        let state = self.render_state();
        let layout = self.layout();
        let mut view = TableView {
            state,
            layout,
            breakpoint: self.breakpoint(),
            message: None,
            icon: None,
            empty_action: None,
            loading_rows: 0,
            headers: Vec::new(),
            rows: Vec::new(),
            cards: Vec::new(),
            selection: SelectionView::default(),
            filter_bar: None,
            pagination: None,
            sticky_header: self.config.sticky_header,
            full_screen: self.config.full_screen,
        };

        match state {
            RenderState::Loading => {
                view.message = Some(LOADING_MESSAGE.to_string());
                view.loading_rows = self.pagination.page_size();
            }
            RenderState::Empty => {
                view.message = Some(self.config.empty.message.clone());
                view.icon = self.config.empty.icon.clone();
                view.empty_action = self.config.empty.action.as_ref().map(|a| a.label.clone());
            }
            RenderState::NoResults => {
                view.filter_bar = Some(self.filter_bar_view());
                view.message = Some(NO_RESULTS_MESSAGE.to_string());
                view.empty_action = Some(CLEAR_FILTERS_LABEL.to_string());
            }
            RenderState::Normal => {
                if self.config.filterable && !self.config.filters.is_empty() {
                    view.filter_bar = Some(self.filter_bar_view());
                }
                view.selection = SelectionView {
                    enabled: self.selection.mode() != SelectionMode::None,
                    show_select_all: self.selection.mode() == SelectionMode::Multiple
                        && self.config.selection.as_ref().is_some_and(|s| s.show_select_all),
                    all_selected: self.selection.is_all_selected(),
                    some_selected: self.selection.is_some_selected(),
                };
                match layout {
                    Layout::Desktop => {
                        let columns = self.visible_columns();
                        view.headers = columns.iter().map(|c| self.header_cell(c)).collect();
                        view.rows = self.row_views(&columns);
                    }
                    Layout::Mobile => view.cards = self.card_views(),
                }
                view.pagination = self.page_info();
            }
        }
        view
    }

    fn visible_columns(&self) -> Vec<&Column<T>> {
        let mobile = self.breakpoint() == Breakpoint::Mobile;
        self.config
            .columns
            .iter()
            .filter(|c| !(mobile && c.hide_on_mobile))
            .collect()
    }

    fn header_cell(&self, column: &Column<T>) -> HeaderCell {
        let sortable = self.config.sortable && column.sortable;
        HeaderCell {
            key: column.key.clone(),
            label: column.header_text().to_string(),
            sortable,
            indicator: sortable
                .then(|| self.sort.direction(&column.key))
                .flatten()
                .map(|d| match d {
                    Direction::Asc => "↑",
                    Direction::Desc => "↓",
                }),
            align: column.align,
            width: column.width,
            min_width: column.min_width,
            max_width: column.max_width,
            sticky: column.sticky,
        }
    }

    fn action_views(&self, row: &T) -> Vec<ActionView> {
        self.config
            .actions
            .iter()
            .filter(|a| a.is_visible(row))
            .map(|a| ActionView {
                key: a.key.clone(),
                label: a.label.clone(),
                icon: a.icon.clone(),
                disabled: a.is_disabled(row),
            })
            .collect()
    }

    fn row_views(&self, columns: &[&Column<T>]) -> Vec<RowView> {
        self.rows()
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                let id = row.id();
                let selected = self.selection.is_selected(&id);
                RowView {
                    cells: columns.iter().map(|c| c.cell_text(row, index)).collect(),
                    class: self.config.row_class.as_ref().map(|f| f(row, index)),
                    background: self.theme.row_background(selected).to_string(),
                    actions: self.action_views(row),
                    id,
                    index,
                    selected,
                }
            })
            .collect()
    }

    fn card_views(&self) -> Vec<CardView> {
        let Some(mobile) = &self.config.mobile else {
            return Vec::new();
        };
        self.rows()
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                let id = row.id();
                let selected = self.selection.is_selected(&id);
                let lines = match &mobile.custom_renderer {
                    Some(render) => render(row, index).lines().map(str::to_string).collect(),
                    None => {
                        let primary = format_cell_value(&row.field(&mobile.primary_field));
                        let rest = [&mobile.secondary_field, &mobile.tertiary_field]
                            .into_iter()
                            .flatten()
                            .map(|key| row.field(key))
                            .filter(|v| v.is_active())
                            .map(|v| format_cell_value(&v));
                        std::iter::once(primary).chain(rest).collect()
                    }
                };
                CardView {
                    lines,
                    background: self.theme.row_background(selected).to_string(),
                    actions: if mobile.show_actions {
                        self.action_views(row)
                    } else {
                        Vec::new()
                    },
                    id,
                    index,
                    selected,
                }
            })
            .collect()
    }

    fn filter_bar_view(&self) -> FilterBarView {
        let fields = self
            .config
            .filters
            .iter()
            .map(|def| {
                let value = self.filter_draft(&def.key);
                let shown = match def.kind {
                    FilterKind::Select => def
                        .option_label(&value)
                        .map(str::to_string)
                        .unwrap_or_else(|| value.to_string()),
                    _ => value.to_string(),
                };
                FilterFieldView {
                    key: def.key.clone(),
                    label: def.label.clone(),
                    kind: def.kind,
                    placeholder: def.placeholder_text(),
                    value: shown,
                    active: self.filters.value(&def.key).is_active(),
                    error: self.validation.get(&def.key).cloned(),
                }
            })
            .collect();
        FilterBarView {
            collapsed: self.filters_collapsed,
            active_count: self.active_filter_count(),
            fields,
        }
    }

    fn page_info(&self) -> Option<PageInfo> {
        let config = self.config.pagination.as_ref()?;
        let (first, last) = self.pagination.item_range()?;
        let total = self.pagination.total();
        Some(PageInfo {
            page: self.pagination.page(),
            page_size: self.pagination.page_size(),
            total,
            total_pages: self.pagination.total_pages(),
            summary: format!("Showing {first}-{last} of {total} items"),
            page_numbers: self.pagination.page_numbers(MAX_VISIBLE_PAGES),
            has_previous: self.pagination.has_previous(),
            has_next: self.pagination.has_next(),
            page_size_options: config.page_size_options.clone(),
            show_page_size_selector: config.show_page_size_selector,
            show_first_last: config.show_first_last,
        })
    }
}

// =============================================================================
// Text rendering
// =============================================================================

const COLUMN_GAP: &str = "  ";

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn select_all_box(selection: &SelectionView) -> &'static str {
    if selection.all_selected {
        "[x]"
    } else if selection.some_selected {
        "[-]"
    } else {
        "[ ]"
    }
}

fn actions_text(actions: &[ActionView]) -> String {
    actions
        .iter()
        .map(|a| {
            if a.disabled {
                format!("({})", a.label)
            } else {
                format!("[{}]", a.label)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Draws a view as plain text.
pub fn render_text(view: &TableView) -> String {
    let mut out = Vec::new();

    if let Some(bar) = &view.filter_bar {
        render_filter_bar(bar, &mut out);
    }

    match view.state {
        RenderState::Loading => {
            out.extend(view.message.clone());
        }
        RenderState::Empty | RenderState::NoResults => {
            let mut line = view.message.clone().unwrap_or_default();
            if let Some(icon) = &view.icon {
                line = format!("{icon} {line}");
            }
            out.push(line);
            if let Some(action) = &view.empty_action {
                out.push(format!("[{action}]"));
            }
        }
        RenderState::Normal => {
            match view.layout {
                Layout::Desktop => render_grid(view, &mut out),
                Layout::Mobile => render_cards(view, &mut out),
            }
            if let Some(info) = &view.pagination {
                render_pagination(info, &mut out);
            }
        }
    }

    let mut text = out.join("\n");
    text.push('\n');
    text
}

fn render_filter_bar(bar: &FilterBarView, out: &mut Vec<String>) {
    let mut title = "Filters".to_string();
    if bar.active_count > 0 {
        title.push_str(&format!(" ({})  [Clear all]", bar.active_count));
    }
    out.push(title);
    if bar.collapsed {
        return;
    }
    for field in &bar.fields {
        let shown = if field.value.is_empty() {
            format!("<{}>", field.placeholder)
        } else {
            field.value.clone()
        };
        let mut line = format!("  {}: {shown}", field.label);
        if let Some(error) = &field.error {
            line.push_str(&format!("  ! {error}"));
        }
        out.push(line);
    }
    out.push(String::new());
}

fn render_grid(view: &TableView, out: &mut Vec<String>) {
    let widths: Vec<usize> = view
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let label = display_width(&header.label) + header.indicator.map_or(0, |_| 2);
            let content = view
                .rows
                .iter()
                .filter_map(|r| r.cells.get(i))
                .map(|c| display_width(c))
                .max()
                .unwrap_or(0);
            let mut width = match header.width {
                ColumnWidth::Fixed(n) => usize::from(n),
                ColumnWidth::Flex(_) | ColumnWidth::Auto => label.max(content),
            };
            if let Some(min) = header.min_width {
                width = width.max(usize::from(min));
            }
            if let Some(max) = header.max_width {
                width = width.min(usize::from(max));
            }
            width
        })
        .collect();

    let with_actions = view.rows.iter().any(|r| !r.actions.is_empty());

    let mut header_cells = Vec::new();
    if view.selection.enabled {
        header_cells.push(if view.selection.show_select_all {
            select_all_box(&view.selection).to_string()
        } else {
            "   ".to_string()
        });
    }
    for (header, width) in view.headers.iter().zip(&widths) {
        let label = match header.indicator {
            Some(arrow) => format!("{} {arrow}", header.label),
            None => header.label.clone(),
        };
        header_cells.push(pad_aligned(&label, *width, header.align));
    }
    if with_actions {
        header_cells.push("Actions".to_string());
    }
    let header_line = header_cells.join(COLUMN_GAP).trim_end().to_string();
    out.push(header_line.clone());
    out.push("-".repeat(display_width(&header_line).max(1)));

    for row in &view.rows {
        let mut cells = Vec::new();
        if view.selection.enabled {
            cells.push(checkbox(row.selected).to_string());
        }
        for ((cell, header), width) in row.cells.iter().zip(&view.headers).zip(&widths) {
            cells.push(pad_aligned(cell, *width, header.align));
        }
        if with_actions {
            cells.push(actions_text(&row.actions));
        }
        out.push(cells.join(COLUMN_GAP).trim_end().to_string());
    }
}

fn render_cards(view: &TableView, out: &mut Vec<String>) {
    for (i, card) in view.cards.iter().enumerate() {
        if i > 0 {
            out.push(String::new());
        }
        let prefix = if view.selection.enabled {
            format!("{} ", checkbox(card.selected))
        } else {
            String::new()
        };
        let indent = " ".repeat(display_width(&prefix) + 2);
        for (n, line) in card.lines.iter().enumerate() {
            if n == 0 {
                out.push(format!("{prefix}{line}"));
            } else {
                out.push(format!("{indent}{line}"));
            }
        }
        if !card.actions.is_empty() {
            out.push(format!("{indent}{}", actions_text(&card.actions)));
        }
    }
}

fn render_pagination(info: &PageInfo, out: &mut Vec<String>) {
    out.push(String::new());
    out.push(info.summary.clone());

    let mut controls = Vec::new();
    if info.show_first_last {
        controls.push("«".to_string());
    }
    controls.push("‹".to_string());
    for n in &info.page_numbers {
        if *n == info.page {
            controls.push(format!("[{n}]"));
        } else {
            controls.push(n.to_string());
        }
    }
    controls.push("›".to_string());
    if info.show_first_last {
        controls.push("»".to_string());
    }
    let mut line = controls.join(" ");
    if info.show_page_size_selector {
        line.push_str(&format!("   Show: {}", info.page_size));
    }
    out.push(line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Record, Value};
    use crate::table::{Action, TableBuilder};

    fn people() -> Vec<Record> {
        vec![
            Record::new(1).with("name", "Bob").with("age", 30),
            Record::new(2).with("name", "Ann").with("age", 25),
        ]
    }

    #[test]
    fn test_grid_text() {
        let config = TableBuilder::new()
            .add_column_with("name", "Name", |c| c.sortable())
            .add_column_with("age", "Age", |c| c.align(Alignment::Right))
            .enable_sorting()
            .build();
        let mut table = Table::new(people(), config);
        table.sort_by("name");

        let text = render_text(&table.view());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Name ↑  Age");
        assert_eq!(lines[2], "Ann      25");
        assert_eq!(lines[3], "Bob      30");
    }

    #[test]
    fn test_selection_and_actions_columns() {
        let config = TableBuilder::new()
            .add_column("name", "Name")
            .enable_selection(SelectionMode::Multiple)
            .add_action(
                Action::new("edit", "Edit", |_: &Record, _: usize| {})
                    .disabled_when(|r: &Record| r.field("age") == Value::from(25)),
            )
            .build();
        let mut table = Table::new(people(), config);
        table.toggle_row_selection(1);

        let text = render_text(&table.view());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "[-]  Name  Actions");
        assert_eq!(lines[2], "[x]  Bob   [Edit]");
        assert_eq!(lines[3], "[ ]  Ann   (Edit)");
    }

    #[test]
    fn test_empty_and_loading_text() {
        let config = TableBuilder::<Record>::new()
            .add_column("name", "Name")
            .set_loading(true)
            .build();
        let mut table = Table::new(Vec::new(), config);
        assert_eq!(render_text(&table.view()), format!("{LOADING_MESSAGE}\n"));

        table.set_loading(false);
        assert_eq!(table.view().state, RenderState::Empty);
        assert_eq!(render_text(&table.view()), "No data available\n");
    }

    #[test]
    fn test_pagination_footer() {
        let rows: Vec<Record> = (1..=12).map(|i| Record::new(i).with("n", i)).collect();
        let config = TableBuilder::new()
            .add_column("n", "N")
            .enable_pagination(Default::default())
            .build();
        let table = Table::new(rows, config);
        let info = table.view().pagination.unwrap();
        assert_eq!(info.summary, "Showing 1-10 of 12 items");
        assert_eq!(info.page_numbers, vec![1, 2]);

        let text = render_text(&table.view());
        assert!(text.ends_with("« ‹ [1] 2 › »   Show: 10\n"));
    }
}
