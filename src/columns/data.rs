use serde_json::Value;

use crate::columns::{ColumnBase, ColumnValue, GridContext};
use crate::errors::DataViewResult;
use crate::format::{self, Format};
use crate::html::{self, Attributes};
use crate::reader::Row;
use crate::widgets::sort_link;

/// Column showing a formatted row value.
#[derive(Clone)]
pub struct DataColumn {
    pub(crate) base: ColumnBase,
    attribute: Option<String>,
    label: Option<String>,
    value: Option<ColumnValue>,
    format: Format,
    enable_sorting: bool,
    encode_label: bool,
    sort_link_options: Attributes,
}

column_setters!(DataColumn);

impl Default for DataColumn {
    fn default() -> Self {
        Self {
            base: ColumnBase::default(),
            attribute: None,
            label: None,
            value: None,
            format: Format::Text,
            enable_sorting: true,
            encode_label: true,
            sort_link_options: Attributes::new(),
        }
    }
}

impl DataColumn {
    /// Column showing the value at `attribute`.
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: Some(attribute.into()),
            ..Self::default()
        }
    }

    /// Parses `attribute`, `attribute:format` or `attribute:format:label`.
    pub fn from_spec(spec: &str) -> DataViewResult<Self> {
        let (attribute, format, label) = format::parse_attribute_spec(spec)?;
        Ok(Self {
            attribute: Some(attribute),
            label,
            format,
            ..Self::default()
        })
    }

    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Overrides where the cell value comes from.
    pub fn value(mut self, value: ColumnValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn enable_sorting(mut self, enable: bool) -> Self {
        self.enable_sorting = enable;
        self
    }

    pub fn encode_label(mut self, encode: bool) -> Self {
        self.encode_label = encode;
        self
    }

    pub fn sort_link_options(mut self, options: Attributes) -> Self {
        self.sort_link_options = options;
        self
    }

    pub(crate) fn header_content(&self, context: &GridContext<'_>) -> Option<String> {
        if self.base.header.is_some() {
            return self.base.header_content();
        }

        let label = match (&self.label, &self.attribute) {
            (Some(label), _) => label.clone(),
            (None, Some(attribute)) => format::humanize(attribute),
            (None, None) => return None,
        };
        let label = if self.encode_label {
            html::encode(&label)
        } else {
            label
        };

        match (context.sort, self.attribute.as_deref()) {
            (Some(sort), Some(attribute)) if self.enable_sorting && sort.is_sortable(attribute) => {
                Some(sort_link(
                    sort,
                    attribute,
                    &label,
                    context.urls,
                    &self.sort_link_options,
                ))
            }
            _ => Some(label).filter(|label| !label.is_empty()),
        }
    }

    pub(crate) fn data_content(&self, row: &Row, index: usize, context: &GridContext<'_>) -> String {
        let value = match (&self.value, &self.attribute) {
            (Some(value), _) => value.evaluate(row, index),
            (None, Some(attribute)) => ColumnValue::Attribute(attribute.clone()).evaluate(row, index),
            (None, None) => Value::Null,
        };
        self.format.render(&value, context.locale)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::DataViewError;
    use crate::reader::Sort;
    use crate::url::QueryUrlGenerator;

    fn context<'a>(urls: &'a QueryUrlGenerator, sort: Option<&'a Sort>) -> GridContext<'a> {
        GridContext {
            sort,
            urls,
            offset: 0,
            locale: "en-US",
            empty_cell: "&nbsp;",
        }
    }

    #[test]
    fn spec_strings_set_attribute_format_and_label() {
        let column = DataColumn::from_spec("profile.email:email:E-mail").expect("valid spec");

        assert_eq!(column.attribute(), Some("profile.email"));
        assert_eq!(column.format, Format::Email);
        assert_eq!(column.label.as_deref(), Some("E-mail"));

        let column = DataColumn::from_spec("id").expect("valid spec");
        assert_eq!(column.format, Format::Text);
        assert_eq!(column.label, None);
    }

    #[test]
    fn invalid_spec_strings_are_rejected() {
        assert!(matches!(
            DataColumn::from_spec(":text"),
            Err(DataViewError::InvalidConfig(_))
        ));
        assert!(matches!(
            DataColumn::from_spec("id:fancy"),
            Err(DataViewError::InvalidConfig(_))
        ));
    }

    #[test]
    fn sortable_headers_render_sort_links() {
        let urls = QueryUrlGenerator::new("/");
        let sort = Sort::only(["name"]).with_order_string("name");
        let context = context(&urls, Some(&sort));

        assert_eq!(
            DataColumn::new("name").header_content(&context).as_deref(),
            Some("<a class=\"asc\" href=\"/?sort=-name\" data-sort=\"-name\">Name</a>")
        );
        assert_eq!(
            DataColumn::new("name")
                .enable_sorting(false)
                .header_content(&context)
                .as_deref(),
            Some("Name")
        );
        assert_eq!(
            DataColumn::new("id").label("<ID>").header_content(&context).as_deref(),
            Some("&lt;ID&gt;")
        );
    }

    #[test]
    fn cells_are_formatted() {
        let urls = QueryUrlGenerator::new("/");
        let row = Row::new(0, json!({"active": true, "total": 1200}));

        assert_eq!(
            DataColumn::new("active")
                .format(Format::Boolean)
                .data_content(&row, 0, &context(&urls, None)),
            "Yes"
        );
        assert_eq!(
            DataColumn::new("total")
                .format(Format::Integer)
                .data_content(&row, 0, &context(&urls, None)),
            "1,200"
        );
        assert_eq!(
            DataColumn::default()
                .value(ColumnValue::Static(json!("fixed")))
                .data_content(&row, 0, &context(&urls, None)),
            "fixed"
        );
    }
}
