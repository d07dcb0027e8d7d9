use std::sync::Arc;

use crate::columns::{ColumnBase, ContentCallback, choice_options};
use crate::errors::{DataViewError, DataViewResult};
use crate::html;
use crate::reader::Row;
use crate::views::RowOptions;

pub const DEFAULT_RADIO_NAME: &str = "radioButtonSelection";

/// Column of radio buttons selecting a single row by key.
#[derive(Clone)]
pub struct RadioButtonColumn {
    pub(crate) base: ColumnBase,
    name: String,
    radio_options: RowOptions,
    content: Option<ContentCallback>,
}

column_setters!(RadioButtonColumn);

impl Default for RadioButtonColumn {
    fn default() -> Self {
        Self {
            base: ColumnBase::default(),
            name: DEFAULT_RADIO_NAME.to_string(),
            radio_options: RowOptions::default(),
            content: None,
        }
    }
}

impl RadioButtonColumn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attributes of each radio button. `value` defaults to the row key and
    /// `checked` selects the button.
    pub fn radio_options(mut self, options: impl Into<RowOptions>) -> Self {
        self.radio_options = options.into();
        self
    }

    /// Replaces the radio button with custom cell markup.
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

    pub(crate) fn data_content(&self, row: &Row, index: usize) -> String {
        if let Some(content) = &self.content {
            return content(row, index);
        }

        let (options, checked) = choice_options(&self.radio_options, row, index);
        html::radio(&self.name, checked, &options)
    }
}
