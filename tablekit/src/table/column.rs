//! Column and row action definitions.

use std::sync::Arc;

use crate::model::{DataItem, Value};
use crate::query::format_cell_value;

// =============================================================================
// Column
// =============================================================================

/// Column width specification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ColumnWidth {
    /// Fixed width in characters.
    Fixed(u16),
    /// Flexible width with weight.
    Flex(u16),
    /// Sized to content.
    #[default]
    Auto,
}

impl ColumnWidth {
    /// CSS-style width: `"120px"`, `"2fr"` or `"auto"`.
    pub fn css(&self) -> String {
        match self {
            ColumnWidth::Fixed(n) => format!("{n}px"),
            ColumnWidth::Flex(w) => format!("{w}fr"),
            ColumnWidth::Auto => "auto".to_string(),
        }
    }
}

/// Horizontal alignment of cell content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Produces cell text from the field value, the row and its index on the page.
pub type CellRenderer<T> = Arc<dyn Fn(&Value, &T, usize) -> String + Send + Sync>;

/// A table column definition.
///
/// # Example
///
/// ```
/// use tablekit::model::Record;
/// use tablekit::table::{Alignment, Column};
///
/// let age: Column<Record> = Column::new("age", "Age")
///     .sortable()
///     .fixed(6)
///     .align(Alignment::Right)
///     .render(|value, _, _| format!("{value} yrs"));
/// assert_eq!(age.width.css(), "6px");
/// ```
pub struct Column<T> {
    /// Field key this column reads.
    pub key: String,
    /// Header text displayed at the top.
    pub label: String,
    pub sortable: bool,
    pub filterable: bool,
    pub width: ColumnWidth,
    pub min_width: Option<u16>,
    pub max_width: Option<u16>,
    pub align: Alignment,
    pub render: Option<CellRenderer<T>>,
    /// Replaces `label` in the header when set.
    pub header: Option<String>,
    pub hide_on_mobile: bool,
    pub sticky: bool,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            filterable: self.filterable,
            width: self.width,
            min_width: self.min_width,
            max_width: self.max_width,
            align: self.align,
            render: self.render.clone(),
            header: self.header.clone(),
            hide_on_mobile: self.hide_on_mobile,
            sticky: self.sticky,
        }
    }
}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("custom_render", &self.render.is_some())
            .finish_non_exhaustive()
    }
}

impl<T: DataItem> Column<T> {
    /// Create a new column with the given key and label.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            filterable: false,
            width: ColumnWidth::default(),
            min_width: None,
            max_width: None,
            align: Alignment::default(),
            render: None,
            header: None,
            hide_on_mobile: false,
            sticky: false,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Gives the column a free-text filter unless a filter for its key is
    /// already configured. Enables filtering on the table.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Set a fixed width for this column.
    pub fn fixed(mut self, width: u16) -> Self {
        self.width = ColumnWidth::Fixed(width);
        self
    }

    /// Set a flex width for this column.
    pub fn flex(mut self, weight: u16) -> Self {
        self.width = ColumnWidth::Flex(weight);
        self
    }

    /// Set auto width for this column.
    pub fn auto(mut self) -> Self {
        self.width = ColumnWidth::Auto;
        self
    }

    pub fn min_width(mut self, width: u16) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn max_width(mut self, width: u16) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn render(mut self, f: impl Fn(&Value, &T, usize) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }

    pub fn header(mut self, text: impl Into<String>) -> Self {
        self.header = Some(text.into());
        self
    }

    pub fn hide_on_mobile(mut self) -> Self {
        self.hide_on_mobile = true;
        self
    }

    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }

    /// Text shown in the header.
    pub fn header_text(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.label)
    }

    /// Text of this column's cell for `row`.
    pub fn cell_text(&self, row: &T, index: usize) -> String {
        let value = row.field(&self.key);
        match &self.render {
            Some(render) => render(&value, row, index),
            None => format_cell_value(&value),
        }
    }
}

// =============================================================================
// Action
// =============================================================================

/// Color hint for an action button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActionColor {
    Primary,
    #[default]
    Neutral,
    Danger,
    Success,
    Warning,
}

/// Visual variant for an action button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActionVariant {
    Solid,
    #[default]
    Outlined,
    Soft,
    Plain,
}

pub type ActionHandler<T> = Arc<dyn Fn(&T, usize) + Send + Sync>;
pub type RowPredicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A per-row action.
pub struct Action<T> {
    pub key: String,
    pub label: String,
    pub icon: Option<String>,
    pub on_click: ActionHandler<T>,
    pub disabled: Option<RowPredicate<T>>,
    pub hidden: Option<RowPredicate<T>>,
    pub color: ActionColor,
    pub variant: ActionVariant,
}

impl<T> Clone for Action<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            icon: self.icon.clone(),
            on_click: Arc::clone(&self.on_click),
            disabled: self.disabled.clone(),
            hidden: self.hidden.clone(),
            color: self.color,
            variant: self.variant,
        }
    }
}

impl<T> std::fmt::Debug for Action<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("color", &self.color)
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

impl<T: DataItem> Action<T> {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        on_click: impl Fn(&T, usize) + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon: None,
            on_click: Arc::new(on_click),
            disabled: None,
            hidden: None,
            color: ActionColor::default(),
            variant: ActionVariant::default(),
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn disabled_when(mut self, f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.disabled = Some(Arc::new(f));
        self
    }

    pub fn hidden_when(mut self, f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.hidden = Some(Arc::new(f));
        self
    }

    pub fn color(mut self, color: ActionColor) -> Self {
        self.color = color;
        self
    }

    pub fn variant(mut self, variant: ActionVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn is_visible(&self, row: &T) -> bool {
        self.hidden.as_ref().is_none_or(|hidden| !hidden(row))
    }

    pub fn is_disabled(&self, row: &T) -> bool {
        self.disabled.as_ref().is_some_and(|disabled| disabled(row))
    }
}
