//! Link sorter: one link per sortable field.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::format;
use crate::html::{self, Attributes};
use crate::reader::Sort;
use crate::url::UrlGenerator;

#[derive(Clone, Debug, PartialEq)]
pub struct SorterConfig {
    /// Container attributes; `tag` defaults to `ul`.
    pub options: Attributes,
    pub link_options: Attributes,
    /// Fields to render links for; all sortable fields when `None`.
    pub fields: Option<Vec<String>>,
    /// Link labels by field. Labels are encoded.
    pub labels: BTreeMap<String, String>,
}

impl Default for SorterConfig {
    fn default() -> Self {
        Self {
            options: Attributes::new().with_class("sorter"),
            link_options: Attributes::new(),
            fields: None,
            labels: BTreeMap::new(),
        }
    }
}

impl SorterConfig {
    pub fn options(mut self, options: Attributes) -> Self {
        self.options = options;
        self
    }

    pub fn link_options(mut self, options: Attributes) -> Self {
        self.link_options = options;
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn label(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(field.into(), label.into());
        self
    }
}

/// Renders a link toggling the order of `field`.
///
/// `label` is inserted as-is. The link carries the requested order in
/// `data-sort` and the current direction as its class.
pub fn sort_link(
    sort: &Sort,
    field: &str,
    label: &str,
    urls: &dyn UrlGenerator,
    attributes: &Attributes,
) -> String {
    let order = sort.toggled_order_string(field);
    let mut attributes = attributes.clone();
    if let Some(direction) = sort.direction(field) {
        attributes.add_class(direction.css_class());
    }
    attributes.set("data-sort", order.as_str());
    html::a(label, Some(&urls.sort_url(&order)), &attributes)
}

#[derive(Clone)]
pub struct LinkSorter {
    urls: Arc<dyn UrlGenerator>,
    sort: Sort,
    config: SorterConfig,
}

impl LinkSorter {
    pub fn new(sort: Sort, urls: Arc<dyn UrlGenerator>) -> Self {
        Self {
            urls,
            sort,
            config: SorterConfig::default(),
        }
    }

    pub fn config(mut self, config: SorterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn run(&self) -> String {
        let fields: Vec<&String> = match &self.config.fields {
            Some(fields) => fields
                .iter()
                .filter(|field| self.sort.is_sortable(field))
                .collect(),
            None => self.sort.allowed_fields().iter().collect(),
        };
        if fields.is_empty() {
            return String::new();
        }

        let items: Vec<String> = fields
            .into_iter()
            .map(|field| {
                let label = match self.config.labels.get(field) {
                    Some(label) => html::encode(label),
                    None => html::encode(&format::humanize(field)),
                };
                let link = sort_link(
                    &self.sort,
                    field,
                    &label,
                    self.urls.as_ref(),
                    &self.config.link_options,
                );
                html::tag("li", &link, &Attributes::new())
            })
            .collect();

        let mut options = self.config.options.clone();
        let tag = options.take_tag("ul");
        html::tag(&tag, &items.join("\n"), &options)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::url::QueryUrlGenerator;

    #[test]
    fn renders_one_link_per_field() {
        let sort = Sort::only(["id", "firstName"]).with_order_string("-id");
        let sorter = LinkSorter::new(sort, Arc::new(QueryUrlGenerator::new("/")));

        assert_eq!(
            sorter.run(),
            "<ul class=\"sorter\"><li><a class=\"desc\" href=\"/?sort=id\" data-sort=\"id\">Id</a></li>\n\
             <li><a href=\"/?sort=firstName\" data-sort=\"firstName\">First Name</a></li></ul>"
        );
    }

    #[test]
    fn configured_fields_and_labels_are_used() {
        let sort = Sort::only(["id", "name"]);
        let sorter = LinkSorter::new(sort, Arc::new(QueryUrlGenerator::new("/")))
            .config(SorterConfig::default().fields(["name", "missing"]).label("name", "A & B"));

        assert_eq!(
            sorter.run(),
            "<ul class=\"sorter\"><li><a href=\"/?sort=name\" data-sort=\"name\">A &amp; B</a></li></ul>"
        );
    }

    #[test]
    fn nothing_without_sortable_fields() {
        let sorter = LinkSorter::new(Sort::default(), Arc::new(QueryUrlGenerator::new("/")));
        assert_eq!(sorter.run(), "");
    }
}
