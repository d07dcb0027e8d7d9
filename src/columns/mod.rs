//! Grid view columns.
//!
//! [`Column`] is a closed set of column kinds. Every kind shares the
//! [`ColumnBase`] options (header, footer, visibility and the attributes of
//! its cells) and differs only in the content of its cells.

use std::sync::Arc;

use serde_json::Value;

use crate::errors::DataViewResult;
use crate::format;
use crate::html::{self, Attributes};
use crate::reader::{Row, Sort};
use crate::url::UrlGenerator;
use crate::views::RowOptions;

/// Generates the fluent [`ColumnBase`] setters on a column that keeps its
/// base in a `base` field.
macro_rules! column_setters {
    ($column:ty) => {
        impl $column {
            /// Header cell content, inserted as-is.
            pub fn header(mut self, header: impl Into<String>) -> Self {
                self.base.header = Some(header.into());
                self
            }

            /// Footer cell content, inserted as-is.
            pub fn footer(mut self, footer: impl Into<String>) -> Self {
                self.base.footer = Some(footer.into());
                self
            }

            pub fn visible(mut self, visible: bool) -> Self {
                self.base.visible = visible;
                self
            }

            /// Attributes of the column's `col` element.
            pub fn options(mut self, options: $crate::html::Attributes) -> Self {
                self.base.options = options;
                self
            }

            pub fn header_options(mut self, options: $crate::html::Attributes) -> Self {
                self.base.header_options = options;
                self
            }

            pub fn footer_options(mut self, options: $crate::html::Attributes) -> Self {
                self.base.footer_options = options;
                self
            }

            pub fn content_options(
                mut self,
                options: impl Into<$crate::views::RowOptions>,
            ) -> Self {
                self.base.content_options = options.into();
                self
            }
        }
    };
}

pub mod action;
pub mod checkbox;
pub mod data;
pub mod radio;
pub mod serial;

pub use action::ActionColumn;
pub use checkbox::CheckboxColumn;
pub use data::DataColumn;
pub use radio::RadioButtonColumn;
pub use serial::SerialColumn;

/// Computes a cell value from the row and its index on the page.
pub type ValueCallback = Arc<dyn Fn(&Row, usize) -> Value + Send + Sync>;

/// Computes cell markup from the row and its index on the page.
pub type ContentCallback = Arc<dyn Fn(&Row, usize) -> String + Send + Sync>;

/// Where a cell value comes from.
#[derive(Clone)]
pub enum ColumnValue {
    /// Dotted path into the row data.
    Attribute(String),
    Static(Value),
    Callback(ValueCallback),
}

impl ColumnValue {
    pub fn callback<F>(callback: F) -> Self
    where
        F: Fn(&Row, usize) -> Value + Send + Sync + 'static,
    {
        ColumnValue::Callback(Arc::new(callback))
    }

    /// Resolves the value for `row`; missing attributes resolve to `null`.
    pub fn evaluate(&self, row: &Row, index: usize) -> Value {
        match self {
            ColumnValue::Attribute(path) => format::value_at(&row.data, path)
                .cloned()
                .unwrap_or(Value::Null),
            ColumnValue::Static(value) => value.clone(),
            ColumnValue::Callback(callback) => callback(row, index),
        }
    }
}

/// Grid state columns need while rendering.
#[derive(Clone, Copy)]
pub struct GridContext<'a> {
    /// Active sort of the reader, if sortable.
    pub sort: Option<&'a Sort>,
    pub urls: &'a dyn UrlGenerator,
    /// Number of rows before the current page.
    pub offset: usize,
    pub locale: &'a str,
    /// Markup of empty header and footer cells.
    pub empty_cell: &'a str,
}

/// Options shared by every column kind.
#[derive(Clone)]
pub struct ColumnBase {
    pub header: Option<String>,
    pub footer: Option<String>,
    pub visible: bool,
    pub options: Attributes,
    pub header_options: Attributes,
    pub footer_options: Attributes,
    pub content_options: RowOptions,
}

impl Default for ColumnBase {
    fn default() -> Self {
        Self {
            header: None,
            footer: None,
            visible: true,
            options: Attributes::new(),
            header_options: Attributes::new(),
            footer_options: Attributes::new(),
            content_options: RowOptions::default(),
        }
    }
}

impl ColumnBase {
    fn with_header(header: &str) -> Self {
        Self {
            header: Some(header.to_string()),
            ..Self::default()
        }
    }

    fn header_content(&self) -> Option<String> {
        self.header
            .as_deref()
            .map(str::trim)
            .filter(|header| !header.is_empty())
            .map(str::to_string)
    }

    fn render_header_cell(&self, content: Option<String>, context: &GridContext<'_>) -> String {
        let content = content.unwrap_or_else(|| context.empty_cell.to_string());
        html::tag("th", &content, &self.header_options)
    }

    fn render_footer_cell(&self, context: &GridContext<'_>) -> String {
        let content = self
            .footer
            .as_deref()
            .map(str::trim)
            .filter(|footer| !footer.is_empty())
            .unwrap_or(context.empty_cell);
        html::tag("td", content, &self.footer_options)
    }

    fn render_data_cell(&self, content: &str, row: &Row, index: usize) -> String {
        html::tag("td", content, &self.content_options.evaluate(row, index))
    }
}

/// A grid column.
#[derive(Clone)]
pub enum Column {
    Data(DataColumn),
    Serial(SerialColumn),
    Checkbox(CheckboxColumn),
    RadioButton(RadioButtonColumn),
    Action(ActionColumn),
}

impl Column {
    /// Parses a data column from `attribute`, `attribute:format` or
    /// `attribute:format:label`.
    pub fn from_spec(spec: &str) -> DataViewResult<Self> {
        DataColumn::from_spec(spec).map(Column::Data)
    }

    fn base(&self) -> &ColumnBase {
        match self {
            Column::Data(column) => &column.base,
            Column::Serial(column) => &column.base,
            Column::Checkbox(column) => &column.base,
            Column::RadioButton(column) => &column.base,
            Column::Action(column) => &column.base,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.base().visible
    }

    /// Attributes of the column's `col` element.
    pub fn col_options(&self) -> &Attributes {
        &self.base().options
    }

    /// Checks the column configuration before anything is rendered.
    pub fn validate(&self) -> DataViewResult<()> {
        match self {
            Column::Checkbox(column) => column.validate(),
            Column::RadioButton(column) => column.validate(),
            Column::Data(_) | Column::Serial(_) | Column::Action(_) => Ok(()),
        }
    }

    pub fn render_header_cell(&self, context: &GridContext<'_>) -> String {
        let base = self.base();
        let content = match self {
            Column::Data(column) => column.header_content(context),
            Column::Checkbox(column) => column.header_content(),
            Column::Serial(_) | Column::RadioButton(_) | Column::Action(_) => base.header_content(),
        };
        base.render_header_cell(content, context)
    }

    pub fn render_footer_cell(&self, context: &GridContext<'_>) -> String {
        self.base().render_footer_cell(context)
    }

    pub fn render_data_cell(&self, row: &Row, index: usize, context: &GridContext<'_>) -> String {
        let content = match self {
            Column::Data(column) => column.data_content(row, index, context),
            Column::Serial(column) => column.data_content(index, context),
            Column::Checkbox(column) => column.data_content(row, index),
            Column::RadioButton(column) => column.data_content(row, index),
            Column::Action(column) => column.data_content(row, index, context),
        };
        self.base().render_data_cell(&content, row, index)
    }
}

impl From<DataColumn> for Column {
    fn from(column: DataColumn) -> Self {
        Column::Data(column)
    }
}

impl From<SerialColumn> for Column {
    fn from(column: SerialColumn) -> Self {
        Column::Serial(column)
    }
}

impl From<CheckboxColumn> for Column {
    fn from(column: CheckboxColumn) -> Self {
        Column::Checkbox(column)
    }
}

impl From<RadioButtonColumn> for Column {
    fn from(column: RadioButtonColumn) -> Self {
        Column::RadioButton(column)
    }
}

impl From<ActionColumn> for Column {
    fn from(column: ActionColumn) -> Self {
        Column::Action(column)
    }
}

/// Applies the value (or key) default and extracts the `checked` flag for a
/// checkbox or radio cell.
fn choice_options(options: &RowOptions, row: &Row, index: usize) -> (Attributes, bool) {
    let mut attributes = options.evaluate(row, index);
    if !attributes.contains("value") {
        attributes.set("value", row.key_string());
    }
    let checked = attributes
        .remove("checked")
        .is_some_and(|checked| checked.is_truthy());
    (attributes, checked)
}
