use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::Value;

use crate::errors::{DataViewError, DataViewResult};
use crate::format::{self, Format};
use crate::html::{self, Attributes};
use crate::i18n::DEFAULT_LOCALE;

pub const DEFAULT_DETAIL_TEMPLATE: &str =
    "<tr><th{captionOptions}>{label}</th><td{contentOptions}>{value}</td></tr>";

static TEMPLATE_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(label|value|captionOptions|contentOptions)\}")
        .expect("Invalid detail template regex")
});

/// Computes an attribute value from the whole model.
pub type ModelValueCallback = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// One row of a [`DetailView`].
#[derive(Clone)]
pub struct DetailAttribute {
    attribute: Option<String>,
    label: Option<String>,
    value: Option<ModelValueCallback>,
    format: Format,
    visible: bool,
    caption_options: Attributes,
    content_options: Attributes,
}

impl Default for DetailAttribute {
    fn default() -> Self {
        Self {
            attribute: None,
            label: None,
            value: None,
            format: Format::Text,
            visible: true,
            caption_options: Attributes::new(),
            content_options: Attributes::new(),
        }
    }
}

impl DetailAttribute {
    /// Attribute showing the value at a dotted `attribute` path.
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: Some(attribute.into()),
            ..Self::default()
        }
    }

    /// Attribute without a model path; needs a value callback to show
    /// anything but the null display.
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Parses `attribute`, `attribute:format` or `attribute:format:label`.
    pub fn parse(spec: &str) -> DataViewResult<Self> {
        let (attribute, format, label) = format::parse_attribute_spec(spec)?;
        Ok(Self {
            attribute: Some(attribute),
            label,
            format,
            ..Self::default()
        })
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn value<F>(mut self, value: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.value = Some(Arc::new(value));
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn caption_options(mut self, options: Attributes) -> Self {
        self.caption_options = options;
        self
    }

    pub fn content_options(mut self, options: Attributes) -> Self {
        self.content_options = options;
        self
    }

    fn validate(&self) -> DataViewResult<()> {
        if self.attribute.is_none() && self.label.is_none() {
            return Err(DataViewError::InvalidConfig(
                "The attribute configuration requires the \"attribute\" element to determine \
                 the value and display label."
                    .to_string(),
            ));
        }
        Ok(())
    }

    fn display_label(&self) -> String {
        match (&self.label, &self.attribute) {
            (Some(label), _) => html::encode(label),
            (None, Some(attribute)) => html::encode(&format::humanize(attribute)),
            (None, None) => String::new(),
        }
    }

    fn resolve(&self, model: &Value) -> Value {
        match (&self.value, &self.attribute) {
            (Some(value), _) => value(model),
            (None, Some(attribute)) => format::value_at(model, attribute)
                .cloned()
                .unwrap_or(Value::Null),
            (None, None) => Value::Null,
        }
    }
}

/// Renders a single model as a table of label/value rows.
#[derive(Clone)]
pub struct DetailView {
    model: Option<Value>,
    attributes: Vec<DetailAttribute>,
    template: String,
    options: Attributes,
    locale: String,
}

impl Default for DetailView {
    fn default() -> Self {
        Self {
            model: None,
            attributes: Vec::new(),
            template: DEFAULT_DETAIL_TEMPLATE.to_string(),
            options: Attributes::new()
                .with_class("table table-striped table-bordered detail-view"),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl DetailView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: Value) -> Self {
        self.model = Some(model);
        self
    }

    /// Serialises `model` and shows it.
    pub fn model_from<T: Serialize>(self, model: &T) -> DataViewResult<Self> {
        Ok(self.model(serde_json::to_value(model)?))
    }

    pub fn attributes<I>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = DetailAttribute>,
    {
        self.attributes = attributes.into_iter().collect();
        self
    }

    pub fn attribute(mut self, attribute: DetailAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Row template with `{label}`, `{value}`, `{captionOptions}` and
    /// `{contentOptions}` tokens.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Container attributes; `tag` defaults to `table`.
    pub fn options(mut self, options: Attributes) -> Self {
        self.options = options;
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn run(&self) -> DataViewResult<String> {
        let model = self
            .model
            .as_ref()
            .ok_or(DataViewError::MissingProperty("model"))?;

        let attributes = self.resolved_attributes(model);
        for attribute in &attributes {
            attribute.validate()?;
        }

        let rows: Vec<String> = attributes
            .iter()
            .filter(|attribute| attribute.visible)
            .map(|attribute| self.render_attribute(attribute, model))
            .collect();

        let mut options = self.options.clone();
        let tag = options.take_tag("table");
        Ok(html::tag(&tag, &rows.join("\n"), &options))
    }

    fn resolved_attributes(&self, model: &Value) -> Vec<DetailAttribute> {
        if !self.attributes.is_empty() {
            return self.attributes.clone();
        }
        match model {
            Value::Object(fields) => fields
                .keys()
                .map(|name| DetailAttribute::new(name.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn render_attribute(&self, attribute: &DetailAttribute, model: &Value) -> String {
        TEMPLATE_TOKEN_REGEX
            .replace_all(&self.template, |captures: &Captures| match &captures[1] {
                "label" => attribute.display_label(),
                "value" => attribute
                    .format
                    .render(&attribute.resolve(model), &self.locale),
                "captionOptions" => attribute.caption_options.render(),
                "contentOptions" => attribute.content_options.render(),
                _ => captures[0].to_string(),
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_model_is_a_configuration_error() {
        assert_eq!(
            DetailView::new().run(),
            Err(DataViewError::MissingProperty("model"))
        );
    }

    #[test]
    fn attributes_default_to_every_field() {
        let html = DetailView::new()
            .model(json!({"id": 1, "note": null}))
            .options(Attributes::new())
            .run()
            .expect("model is set");

        assert_eq!(
            html,
            "<table><tr><th>Id</th><td>1</td></tr>\n\
             <tr><th>Note</th><td><span class=\"not-set\">(not set)</span></td></tr></table>"
        );
    }

    #[test]
    fn attribute_without_path_or_label_is_rejected() {
        let result = DetailView::new()
            .model(json!({}))
            .attribute(DetailAttribute::default())
            .run();

        assert!(matches!(result, Err(DataViewError::InvalidConfig(_))));
    }
}
