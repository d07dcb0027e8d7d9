use std::sync::Arc;

use crate::errors::DataViewResult;
use crate::format;
use crate::html::{self, Attributes};
use crate::i18n::MessageFormatter;
use crate::reader::Row;
use crate::views::{BaseListView, RenderItems, RowOptions};

/// Renders a row; receives the row and its index on the page.
pub type ItemCallback = Arc<dyn Fn(&Row, usize) -> String + Send + Sync>;

/// Optional markup rendered next to a row.
pub type ItemHook = Arc<dyn Fn(&Row, usize) -> Option<String> + Send + Sync>;

/// Renders every row as a block of markup.
#[derive(Clone)]
pub struct ListView {
    base: BaseListView,
    item_view: Option<ItemCallback>,
    item_options: RowOptions,
    separator: String,
    before_item: Option<ItemHook>,
    after_item: Option<ItemHook>,
}

list_view_setters!(ListView);

impl ListView {
    pub fn new(formatter: Arc<dyn MessageFormatter>) -> Self {
        Self {
            base: BaseListView::new(formatter)
                .options(Attributes::new().with_class("list-view")),
            item_view: None,
            item_options: RowOptions::default(),
            separator: "\n".to_string(),
            before_item: None,
            after_item: None,
        }
    }

    pub fn item_view<F>(mut self, render: F) -> Self
    where
        F: Fn(&Row, usize) -> String + Send + Sync + 'static,
    {
        self.item_view = Some(Arc::new(render));
        self
    }

    /// Attributes of the item tag; `tag` defaults to `div`.
    pub fn item_options(mut self, options: Attributes) -> Self {
        self.item_options = RowOptions::Static(options);
        self
    }

    pub fn item_options_callback<F>(mut self, options: F) -> Self
    where
        F: Fn(&Row, usize) -> Attributes + Send + Sync + 'static,
    {
        self.item_options = RowOptions::callback(options);
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn before_item<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Row, usize) -> Option<String> + Send + Sync + 'static,
    {
        self.before_item = Some(Arc::new(hook));
        self
    }

    pub fn after_item<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Row, usize) -> Option<String> + Send + Sync + 'static,
    {
        self.after_item = Some(Arc::new(hook));
        self
    }

    pub fn run(&self) -> DataViewResult<String> {
        self.base.run_with(self)
    }

    /// Renders a single row wrapped in its item tag.
    pub fn render_item(&self, row: &Row, index: usize) -> String {
        let content = match &self.item_view {
            Some(render) => render(row, index),
            None => html::encode(&format::display_string(&row.data)),
        };

        let mut options = self.item_options.evaluate(row, index);
        let tag = options.take_tag("div");
        options.set("data-key", row.key_string());
        html::tag(&tag, &content, &options)
    }
}

impl RenderItems for ListView {
    fn render_items(&self, base: &BaseListView) -> String {
        let hook = |hook: &Option<ItemHook>, row: &Row, index: usize| {
            hook.as_ref()
                .and_then(|hook| hook(row, index))
                .filter(|markup| !markup.is_empty())
        };

        base.rows()
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let mut parts = Vec::with_capacity(3);
                parts.extend(hook(&self.before_item, row, index));
                parts.push(self.render_item(row, index));
                parts.extend(hook(&self.after_item, row, index));
                parts.join(&self.separator)
            })
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::i18n::IcuMessageFormatter;
    use crate::reader::IterableDataReader;

    fn view(rows: Vec<serde_json::Value>) -> ListView {
        ListView::new(Arc::new(IcuMessageFormatter::new()))
            .data_reader(Arc::new(IterableDataReader::new(rows)))
            .layout("{items}")
    }

    #[test]
    fn items_are_wrapped_with_their_keys() {
        let html = view(vec![json!("a<b"), json!("c")]).run().expect("reader is set");

        assert_eq!(
            html,
            "<div class=\"list-view\"><div data-key=\"0\">a&lt;b</div>\n<div data-key=\"1\">c</div></div>"
        );
    }

    #[test]
    fn item_view_options_and_hooks_are_applied() {
        let html = view(vec![json!({"id": 1, "name": "One"})])
            .item_view(|row, _| row.data["name"].as_str().unwrap_or_default().to_string())
            .item_options_callback(|_, index| {
                Attributes::new()
                    .with("tag", "article")
                    .with_class(&format!("item-{index}"))
            })
            .before_item(|_, index| Some(format!("<hr data-index=\"{index}\">")))
            .after_item(|_, _| Some(String::new()))
            .separator("")
            .run()
            .expect("reader is set");

        assert_eq!(
            html,
            "<div class=\"list-view\"><hr data-index=\"0\"><article class=\"item-0\" data-key=\"0\">One</article></div>"
        );
    }
}
