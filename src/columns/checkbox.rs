use std::sync::Arc;

use crate::columns::{ColumnBase, ContentCallback, choice_options};
use crate::errors::{DataViewError, DataViewResult};
use crate::html::{self, Attributes};
use crate::reader::Row;
use crate::views::RowOptions;

pub const DEFAULT_CHECKBOX_NAME: &str = "selection";

/// Column of checkboxes selecting rows by key.
#[derive(Clone)]
pub struct CheckboxColumn {
    pub(crate) base: ColumnBase,
    name: String,
    multiple: bool,
    css_class: Option<String>,
    checkbox_options: RowOptions,
    content: Option<ContentCallback>,
}

column_setters!(CheckboxColumn);

impl Default for CheckboxColumn {
    fn default() -> Self {
        Self {
            base: ColumnBase::default(),
            name: DEFAULT_CHECKBOX_NAME.to_string(),
            multiple: true,
            css_class: None,
            checkbox_options: RowOptions::default(),
            content: None,
        }
    }
}

impl CheckboxColumn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether the header holds a select-all checkbox.
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn css_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }

    /// Attributes of each checkbox. `value` defaults to the row key and
    /// `checked` selects the checkbox.
    pub fn checkbox_options(mut self, options: impl Into<RowOptions>) -> Self {
        self.checkbox_options = options.into();
        self
    }

    /// Replaces the checkbox with custom cell markup.
    pub fn content<F>(mut self, content: F) -> Self
    where
        F: Fn(&Row, usize) -> String + Send + Sync + 'static,
    {
        self.content = Some(Arc::new(content));
        self
    }

    pub(crate) fn validate(&self) -> DataViewResult<()> {
        if self.name.is_empty() {
            return Err(DataViewError::MissingProperty("name"));
        }
        Ok(())
    }

    /// Name of the data cell checkboxes, submitted as a list.
    pub fn input_name(&self) -> String {
        if self.name.ends_with("[]") {
            self.name.clone()
        } else {
            format!("{}[]", self.name)
        }
    }

    /// Name of the select-all checkbox: `selection[]` becomes
    /// `selection_all`, `items[ids][]` becomes `items[ids_all]`.
    pub fn header_checkbox_name(&self) -> String {
        let name = self.name.strip_suffix("[]").unwrap_or(&self.name);
        match name.strip_suffix(']') {
            Some(prefix) => format!("{prefix}_all]"),
            None => format!("{name}_all"),
        }
    }

    pub(crate) fn header_content(&self) -> Option<String> {
        if self.base.header.is_some() || !self.multiple {
            return self.base.header_content();
        }
        let options = Attributes::new().with_class("select-on-check-all");
        Some(html::checkbox(
            &self.header_checkbox_name(),
            false,
            &options,
        ))
    }

    pub(crate) fn data_content(&self, row: &Row, index: usize) -> String {
        if let Some(content) = &self.content {
            return content(row, index);
        }

        let (mut options, checked) = choice_options(&self.checkbox_options, row, index);
        if let Some(class) = &self.css_class {
            options.add_class(class);
        }
        html::checkbox(&self.input_name(), checked, &options)
    }
}
