//! Cell value formatting and label helpers.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::DataViewError;
use crate::html::{self, Attributes};
use crate::i18n;

static ATTRIBUTE_SPEC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^:]+)(?::(\w*))?(?::(.*))?$").expect("Invalid attribute spec regex")
});

/// Markup shown for missing (`null`) values.
pub const NULL_DISPLAY: &str = r#"<span class="not-set">(not set)</span>"#;

/// How a value is turned into cell markup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// HTML-encoded text.
    #[default]
    Text,
    /// Encoded text with newlines turned into `<br>`.
    Ntext,
    /// HTML sanitised with ammonia.
    Html,
    /// Inserted verbatim.
    Raw,
    Boolean,
    Integer,
    Email,
    Url,
}

impl Format {
    /// Renders `value` as markup.
    pub fn render(self, value: &Value, locale: &str) -> String {
        if value.is_null() {
            return NULL_DISPLAY.to_string();
        }

        match self {
            Format::Text => html::encode(&display_string(value)),
            Format::Ntext => html::encode(&display_string(value)).replace('\n', "<br>\n"),
            Format::Html => ammonia::clean(&display_string(value)),
            Format::Raw => display_string(value),
            Format::Boolean => String::from(if is_truthy(value) { "Yes" } else { "No" }),
            Format::Integer => {
                let integer = value
                    .as_i64()
                    .or_else(|| value.as_f64().map(|n| n as i64))
                    .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()));
                match integer {
                    Some(integer) => {
                        i18n::format_number(&Value::from(integer), locale).unwrap_or_default()
                    }
                    None => html::encode(&display_string(value)),
                }
            }
            Format::Email => {
                let email = display_string(value);
                html::a(
                    &html::encode(&email),
                    Some(&format!("mailto:{email}")),
                    &Attributes::new(),
                )
            }
            Format::Url => {
                let url = display_string(value);
                let href = match url.split_once("://") {
                    None => format!("http://{url}"),
                    Some((scheme, _)) if is_link_scheme(scheme) => url.clone(),
                    Some(_) => {
                        log::debug!("Refusing to link URL with unsupported scheme: {url}");
                        return html::encode(&url);
                    }
                };
                html::a(&html::encode(&url), Some(&href), &Attributes::new())
            }
        }
    }
}

impl FromStr for Format {
    type Err = DataViewError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "" | "text" => Ok(Format::Text),
            "ntext" => Ok(Format::Ntext),
            "html" => Ok(Format::Html),
            "raw" => Ok(Format::Raw),
            "boolean" => Ok(Format::Boolean),
            "integer" => Ok(Format::Integer),
            "email" => Ok(Format::Email),
            "url" => Ok(Format::Url),
            other => Err(DataViewError::InvalidConfig(format!(
                "unknown format \"{other}\""
            ))),
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Format::Text => "text",
            Format::Ntext => "ntext",
            Format::Html => "html",
            Format::Raw => "raw",
            Format::Boolean => "boolean",
            Format::Integer => "integer",
            Format::Email => "email",
            Format::Url => "url",
        };
        write!(f, "{name}")
    }
}

/// Parses `attribute`, `attribute:format` or `attribute:format:label` into
/// its parts. A missing format is [`Format::Text`]; an empty label is `None`.
pub fn parse_attribute_spec(spec: &str) -> Result<(String, Format, Option<String>), DataViewError> {
    let captures = ATTRIBUTE_SPEC_REGEX.captures(spec).ok_or_else(|| {
        DataViewError::InvalidConfig(
            "The attribute must be specified in the format of \"attribute\", \
             \"attribute:format\" or \"attribute:format:label\""
                .to_string(),
        )
    })?;

    let format = match captures.get(2) {
        Some(format) => format.as_str().parse()?,
        None => Format::Text,
    };
    let label = captures
        .get(3)
        .map(|label| label.as_str().to_string())
        .filter(|label| !label.is_empty());

    Ok((captures[1].to_string(), format, label))
}

/// Plain-text representation of a JSON value: strings unquoted, containers
/// as compact JSON.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

/// Schemes the `url` format turns into links.
fn is_link_scheme(scheme: &str) -> bool {
    ["http", "https", "ftp"]
        .iter()
        .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty() && text != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Whether a value can be shown in a single cell without formatting.
pub fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Looks up `path` in `model`.
///
/// The whole path is tried as a key first, then as a dot-separated path
/// through objects and array indexes.
pub fn value_at<'a>(model: &'a Value, path: &str) -> Option<&'a Value> {
    if let Some(value) = model.get(path) {
        return Some(value);
    }

    path.split('.').try_fold(model, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Turns an attribute name into a label: `related.id` becomes `Related Id`,
/// `createdAt` becomes `Created At`.
pub fn humanize(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut spaced = String::with_capacity(name.len() + 4);

    for (index, &ch) in chars.iter().enumerate() {
        if matches!(ch, '.' | '_' | '-') {
            spaced.push(' ');
            continue;
        }
        if index > 0 && ch.is_uppercase() {
            let previous = chars[index - 1];
            let next_is_lower = chars.get(index + 1).is_some_and(|next| next.is_lowercase());
            if previous.is_lowercase() || (previous.is_alphanumeric() && next_is_lower) {
                spaced.push(' ');
            }
        }
        spaced.push(ch);
    }

    spaced
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
