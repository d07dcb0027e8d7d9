use crate::columns::{ColumnBase, GridContext};

/// Column numbering rows across pages, starting from 1.
#[derive(Clone)]
pub struct SerialColumn {
    pub(crate) base: ColumnBase,
}

column_setters!(SerialColumn);

impl Default for SerialColumn {
    fn default() -> Self {
        Self {
            base: ColumnBase::with_header("#"),
        }
    }
}

impl SerialColumn {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn data_content(&self, index: usize, context: &GridContext<'_>) -> String {
        (context.offset + index + 1).to_string()
    }
}
