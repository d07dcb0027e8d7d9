//! HTML tag helpers shared by every widget.
//!
//! Attributes are kept in insertion order and rendered in a fixed priority
//! order, so the same configuration always produces byte-identical markup.
//! The `tag` pseudo-attribute selects the element name and is never emitted;
//! `class` accumulates instead of being overwritten.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Attributes rendered first, in this order. Everything else follows in
/// insertion order.
const ATTRIBUTE_ORDER: &[&str] = &[
    "type",
    "id",
    "class",
    "name",
    "value",
    "href",
    "src",
    "for",
    "action",
    "method",
    "selected",
    "checked",
    "readonly",
    "disabled",
    "multiple",
    "size",
    "maxlength",
    "width",
    "height",
    "rows",
    "cols",
    "alt",
    "title",
    "rel",
    "media",
];

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const TAG_KEY: &str = "tag";
const CLASS_KEY: &str = "class";

/// A single attribute value.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// `true` renders the bare attribute name, `false` omits the attribute.
    Flag(bool),
    Int(i64),
    Text(String),
}

impl AttrValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            AttrValue::Flag(flag) => *flag,
            AttrValue::Int(value) => *value != 0,
            AttrValue::Text(text) => !text.is_empty(),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        AttrValue::Text(value.clone())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Flag(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<usize> for AttrValue {
    fn from(value: usize) -> Self {
        AttrValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

/// Ordered set of HTML attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, AttrValue>")]
pub struct Attributes(Vec<(String, AttrValue)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Attributes::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Builder-style [`Attributes::add_class`].
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute, replacing a previous value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        let position = self.0.iter().position(|(key, _)| key == name)?;
        Some(self.0.remove(position).1)
    }

    /// Removes the `tag` pseudo-attribute and returns the element name it
    /// selects, or `default` when it is absent.
    pub fn take_tag(&mut self, default: &str) -> String {
        match self.remove(TAG_KEY) {
            Some(AttrValue::Text(tag)) if !tag.is_empty() => tag,
            _ => default.to_string(),
        }
    }

    /// Appends CSS classes, skipping ones that are already present.
    ///
    /// A `class` explicitly disabled with `false` is replaced.
    pub fn add_class(&mut self, class: &str) {
        let mut classes: Vec<String> = match self.get(CLASS_KEY) {
            Some(AttrValue::Text(existing)) => {
                existing.split_whitespace().map(str::to_string).collect()
            }
            _ => Vec::new(),
        };
        let before = classes.len();
        for name in class.split_whitespace() {
            if !classes.iter().any(|existing| existing == name) {
                classes.push(name.to_string());
            }
        }
        if classes.len() != before {
            self.set(CLASS_KEY, classes.join(" "));
        }
    }

    /// Merges `other` into `self`: classes accumulate, everything else is
    /// overwritten.
    pub fn merge(&mut self, other: &Attributes) {
        for (name, value) in &other.0 {
            match (name.as_str(), value) {
                (CLASS_KEY, AttrValue::Text(class)) => self.add_class(class),
                _ => self.set(name.clone(), value.clone()),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Renders the attributes with a leading space before each one.
    pub fn render(&self) -> String {
        let mut ordered: Vec<&(String, AttrValue)> =
            self.0.iter().filter(|(name, _)| name != TAG_KEY).collect();
        ordered.sort_by_key(|(name, _)| {
            ATTRIBUTE_ORDER
                .iter()
                .position(|known| *known == name)
                .unwrap_or(ATTRIBUTE_ORDER.len())
        });

        let mut rendered = String::new();
        for (name, value) in ordered {
            match value {
                AttrValue::Flag(true) => {
                    rendered.push(' ');
                    rendered.push_str(name);
                }
                AttrValue::Flag(false) => {}
                AttrValue::Int(number) => {
                    rendered.push_str(&format!(" {name}=\"{number}\""));
                }
                AttrValue::Text(text) => {
                    rendered.push_str(&format!(" {name}=\"{}\"", encode(text)));
                }
            }
        }
        rendered
    }
}

impl From<BTreeMap<String, AttrValue>> for Attributes {
    fn from(map: BTreeMap<String, AttrValue>) -> Self {
        Self(map.into_iter().collect())
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (name, value) in iter {
            attributes.set(name, value);
        }
        attributes
    }
}

/// Escapes the HTML special characters `& < > " '`.
pub fn encode(content: &str) -> String {
    let mut encoded = String::with_capacity(content.len());
    for ch in content.chars() {
        match ch {
            '&' => encoded.push_str("&amp;"),
            '<' => encoded.push_str("&lt;"),
            '>' => encoded.push_str("&gt;"),
            '"' => encoded.push_str("&quot;"),
            '\'' => encoded.push_str("&#039;"),
            other => encoded.push(other),
        }
    }
    encoded
}

/// Renders an element. `content` is inserted as-is; void elements ignore it.
pub fn tag(name: &str, content: &str, attributes: &Attributes) -> String {
    let name = attributes
        .get(TAG_KEY)
        .and_then(AttrValue::as_text)
        .filter(|tag| !tag.is_empty())
        .unwrap_or(name);
    let rendered = attributes.render();

    if VOID_ELEMENTS.contains(&name) {
        format!("<{name}{rendered}>")
    } else {
        format!("<{name}{rendered}>{content}</{name}>")
    }
}

/// Renders a hyperlink. The label is not encoded.
pub fn a(label: &str, href: Option<&str>, attributes: &Attributes) -> String {
    let mut attributes = attributes.clone();
    if let Some(href) = href {
        attributes.set("href", href);
    }
    tag("a", label, &attributes)
}

/// Renders an `input` element of the given type.
pub fn input(kind: &str, name: &str, value: Option<&str>, attributes: &Attributes) -> String {
    let mut attributes = attributes.clone();
    attributes.set("type", kind);
    attributes.set("name", name);
    if let Some(value) = value {
        attributes.set("value", value);
    }
    tag("input", "", &attributes)
}

/// Renders a checkbox; `value` defaults to `1`.
pub fn checkbox(name: &str, checked: bool, attributes: &Attributes) -> String {
    boolean_input("checkbox", name, checked, attributes)
}

/// Renders a radio button; `value` defaults to `1`.
pub fn radio(name: &str, checked: bool, attributes: &Attributes) -> String {
    boolean_input("radio", name, checked, attributes)
}

fn boolean_input(kind: &str, name: &str, checked: bool, attributes: &Attributes) -> String {
    let mut attributes = attributes.clone();
    if !attributes.contains("value") {
        attributes.set("value", "1");
    }
    attributes.set("checked", checked);
    input(kind, name, None, &attributes)
}
