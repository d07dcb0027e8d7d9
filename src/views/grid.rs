use std::sync::Arc;

use crate::columns::{Column, DataColumn, GridContext};
use crate::errors::DataViewResult;
use crate::format;
use crate::html::{self, Attributes};
use crate::i18n::MessageFormatter;
use crate::reader::Row;
use crate::views::{BaseListView, RenderItems, RowOptions};

pub const DEFAULT_EMPTY_CELL: &str = "&nbsp;";

/// Renders rows as an HTML table, one column per [`Column`].
///
/// Without configured columns, one text column is guessed per scalar field
/// of the first row.
#[derive(Clone)]
pub struct GridView {
    base: BaseListView,
    columns: Vec<Column>,
    caption: Option<String>,
    caption_options: Attributes,
    table_options: Attributes,
    header_row_options: Attributes,
    footer_row_options: Attributes,
    row_options: RowOptions,
    show_header: bool,
    show_footer: bool,
    place_footer_after_body: bool,
    empty_cell: String,
}

list_view_setters!(GridView);

impl GridView {
    pub fn new(formatter: Arc<dyn MessageFormatter>) -> Self {
        Self {
            base: BaseListView::new(formatter)
                .options(Attributes::new().with_class("grid-view"))
                .show_on_empty(true),
            columns: Vec::new(),
            caption: None,
            caption_options: Attributes::new(),
            table_options: Attributes::new().with_class("table table-striped table-bordered"),
            header_row_options: Attributes::new(),
            footer_row_options: Attributes::new(),
            row_options: RowOptions::default(),
            show_header: true,
            show_footer: false,
            place_footer_after_body: false,
            empty_cell: DEFAULT_EMPTY_CELL.to_string(),
        }
    }

    pub fn columns<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn column(mut self, column: impl Into<Column>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Adds data columns parsed from `attribute:format:label` strings.
    pub fn column_specs<I, S>(mut self, specs: I) -> DataViewResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for spec in specs {
            self.columns.push(Column::from_spec(spec.as_ref())?);
        }
        Ok(self)
    }

    /// Table caption, inserted as-is.
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn caption_options(mut self, options: Attributes) -> Self {
        self.caption_options = options;
        self
    }

    /// Attributes of the table; `tag` defaults to `table`.
    pub fn table_options(mut self, options: Attributes) -> Self {
        self.table_options = options;
        self
    }

    pub fn header_row_options(mut self, options: Attributes) -> Self {
        self.header_row_options = options;
        self
    }

    pub fn footer_row_options(mut self, options: Attributes) -> Self {
        self.footer_row_options = options;
        self
    }

    /// Attributes of each body row; `data-key` is always set to the row key.
    pub fn row_options(mut self, options: impl Into<RowOptions>) -> Self {
        self.row_options = options.into();
        self
    }

    pub fn show_header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    pub fn show_footer(mut self, show: bool) -> Self {
        self.show_footer = show;
        self
    }

    pub fn place_footer_after_body(mut self, after: bool) -> Self {
        self.place_footer_after_body = after;
        self
    }

    /// Markup of header and footer cells without content.
    pub fn empty_cell(mut self, markup: impl Into<String>) -> Self {
        self.empty_cell = markup.into();
        self
    }

    pub fn run(&self) -> DataViewResult<String> {
        for column in &self.columns {
            column.validate()?;
        }
        self.base.run_with(self)
    }

    fn visible_columns(&self, rows: &[Row]) -> Vec<Column> {
        if !self.columns.is_empty() {
            return self
                .columns
                .iter()
                .filter(|column| column.is_visible())
                .cloned()
                .collect();
        }

        match rows.first().map(|row| &row.data) {
            Some(serde_json::Value::Object(fields)) => fields
                .iter()
                .filter(|(_, value)| format::is_scalar(value))
                .map(|(name, _)| Column::Data(DataColumn::new(name.clone())))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn render_caption(&self) -> Option<String> {
        self.caption
            .as_deref()
            .filter(|caption| !caption.is_empty())
            .map(|caption| html::tag("caption", caption, &self.caption_options))
    }

    fn render_column_group(&self, columns: &[Column]) -> Option<String> {
        if columns.iter().all(|column| column.col_options().is_empty()) {
            return None;
        }
        let cols: Vec<String> = columns
            .iter()
            .map(|column| html::tag("col", "", column.col_options()))
            .collect();
        Some(html::tag("colgroup", &cols.join("\n"), &Attributes::new()))
    }

    fn render_table_header(&self, columns: &[Column], context: &GridContext<'_>) -> String {
        let cells: String = columns
            .iter()
            .map(|column| column.render_header_cell(context))
            .collect();
        format!(
            "<thead>\n{}\n</thead>",
            html::tag("tr", &cells, &self.header_row_options)
        )
    }

    fn render_table_footer(&self, columns: &[Column], context: &GridContext<'_>) -> String {
        let cells: String = columns
            .iter()
            .map(|column| column.render_footer_cell(context))
            .collect();
        format!(
            "<tfoot>\n{}\n</tfoot>",
            html::tag("tr", &cells, &self.footer_row_options)
        )
    }

    fn render_table_body(
        &self,
        base: &BaseListView,
        rows: &[Row],
        columns: &[Column],
        context: &GridContext<'_>,
    ) -> String {
        if rows.is_empty() {
            let empty = base.render_empty();
            if !empty.is_empty() {
                return format!(
                    "<tbody>\n<tr><td colspan=\"{}\">{empty}</td></tr>\n</tbody>",
                    columns.len().max(1)
                );
            }
        }

        let body: Vec<String> = rows
            .iter()
            .enumerate()
            .map(|(index, row)| self.render_table_row(row, index, columns, context))
            .collect();
        format!("<tbody>\n{}\n</tbody>", body.join("\n"))
    }

    fn render_table_row(
        &self,
        row: &Row,
        index: usize,
        columns: &[Column],
        context: &GridContext<'_>,
    ) -> String {
        let cells: String = columns
            .iter()
            .map(|column| column.render_data_cell(row, index, context))
            .collect();
        let mut options = self.row_options.evaluate(row, index);
        options.set("data-key", row.key_string());
        html::tag("tr", &cells, &options)
    }
}

impl RenderItems for GridView {
    fn render_items(&self, base: &BaseListView) -> String {
        let rows = base.rows();
        let columns = self.visible_columns(&rows);
        let sort = base.reader().ok().and_then(|reader| reader.sort());
        let context = GridContext {
            sort: sort.as_ref(),
            urls: base.url_generator(),
            offset: base.get_paginator().map_or(0, |paginator| paginator.offset()),
            locale: base.get_locale(),
            empty_cell: &self.empty_cell,
        };

        let footer = self
            .show_footer
            .then(|| self.render_table_footer(&columns, &context));
        let (footer_before, footer_after) = if self.place_footer_after_body {
            (None, footer)
        } else {
            (footer, None)
        };

        let parts: Vec<String> = [
            self.render_caption(),
            self.render_column_group(&columns),
            self.show_header
                .then(|| self.render_table_header(&columns, &context)),
            footer_before,
            Some(self.render_table_body(base, &rows, &columns, &context)),
            footer_after,
        ]
        .into_iter()
        .flatten()
        .collect();

        let mut options = self.table_options.clone();
        let tag = options.take_tag("table");
        html::tag(&tag, &parts.join("\n"), &options)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::columns::SerialColumn;
    use crate::i18n::IcuMessageFormatter;
    use crate::reader::IterableDataReader;

    fn grid(rows: Vec<serde_json::Value>) -> GridView {
        GridView::new(Arc::new(IcuMessageFormatter::new()))
            .data_reader(Arc::new(IterableDataReader::new(rows)))
            .layout("{items}")
            .options(Attributes::new())
    }

    #[test]
    fn guessed_columns_skip_nested_values() {
        let html = grid(vec![json!({"id": 1, "tags": ["a"], "name": "One"})])
            .run()
            .expect("reader is set");

        assert_eq!(
            html,
            "<div><table class=\"table table-striped table-bordered\">\
             <thead>\n<tr><th>Id</th><th>Name</th></tr>\n</thead>\n\
             <tbody>\n<tr data-key=\"0\"><td>1</td><td>One</td></tr>\n</tbody>\
             </table></div>"
        );
    }

    #[test]
    fn row_options_always_carry_the_key() {
        let html = grid(vec![json!({"id": 1}), json!({"id": 2})])
            .columns([SerialColumn::new()])
            .show_header(false)
            .row_options(RowOptions::callback(|_, index| {
                Attributes::new()
                    .with_class(if index % 2 == 0 { "even" } else { "odd" })
                    .with("data-key", "ignored")
            }))
            .run()
            .expect("reader is set");

        assert_eq!(
            html,
            "<div><table class=\"table table-striped table-bordered\"><tbody>\n\
             <tr class=\"even\" data-key=\"0\"><td>1</td></tr>\n\
             <tr class=\"odd\" data-key=\"1\"><td>2</td></tr>\n\
             </tbody></table></div>"
        );
    }

    #[test]
    fn caption_and_column_group_lead_the_table() {
        let html = grid(vec![json!({"id": 1})])
            .column(DataColumn::new("id").options(Attributes::new().with_class("narrow")))
            .caption("Items")
            .show_header(false)
            .run()
            .expect("reader is set");

        assert_eq!(
            html,
            "<div><table class=\"table table-striped table-bordered\"><caption>Items</caption>\n\
             <colgroup><col class=\"narrow\"></colgroup>\n\
             <tbody>\n<tr data-key=\"0\"><td>1</td></tr>\n</tbody></table></div>"
        );
    }
}
