use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};

use crate::columns::{ColumnBase, GridContext};
use crate::html::{self, Attributes};
use crate::reader::Row;

pub const DEFAULT_ACTION_TEMPLATE: &str = "{view} {update} {delete}";

static BUTTON_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([\w\-/]+)\}").expect("Invalid action token regex"));

/// Renders a button from its URL, the row and the row index.
pub type ButtonCallback = Arc<dyn Fn(&str, &Row, usize) -> String + Send + Sync>;

/// Builds the URL of an action from its name, the row and the row index.
pub type UrlCreator = Arc<dyn Fn(&str, &Row, usize) -> String + Send + Sync>;

/// Column of per-row action buttons.
///
/// The template names buttons as `{name}` tokens; `view`, `update` and
/// `delete` are built in and tokens without a button render nothing.
#[derive(Clone)]
pub struct ActionColumn {
    pub(crate) base: ColumnBase,
    template: String,
    buttons: BTreeMap<String, ButtonCallback>,
    visible_buttons: BTreeMap<String, bool>,
    button_options: Attributes,
    url_creator: Option<UrlCreator>,
}

column_setters!(ActionColumn);

impl Default for ActionColumn {
    fn default() -> Self {
        Self {
            base: ColumnBase::default(),
            template: DEFAULT_ACTION_TEMPLATE.to_string(),
            buttons: BTreeMap::new(),
            visible_buttons: BTreeMap::new(),
            button_options: Attributes::new(),
            url_creator: None,
        }
    }
}

impl ActionColumn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Adds a button rendered for `{name}`, replacing the built-in `view`,
    /// `update` and `delete` buttons when the name matches.
    pub fn button<F>(mut self, name: impl Into<String>, button: F) -> Self
    where
        F: Fn(&str, &Row, usize) -> String + Send + Sync + 'static,
    {
        self.buttons.insert(name.into(), Arc::new(button));
        self
    }

    /// Shows or hides the button rendered for `{name}`.
    pub fn button_visible(mut self, name: impl Into<String>, visible: bool) -> Self {
        self.visible_buttons.insert(name.into(), visible);
        self
    }

    /// Extra attributes of the built-in buttons.
    pub fn button_options(mut self, options: Attributes) -> Self {
        self.button_options = options;
        self
    }

    pub fn url_creator<F>(mut self, creator: F) -> Self
    where
        F: Fn(&str, &Row, usize) -> String + Send + Sync + 'static,
    {
        self.url_creator = Some(Arc::new(creator));
        self
    }

    fn default_button(&self, name: &str, url: &str) -> Option<String> {
        let (icon, title) = match name {
            "view" => ("eye-open", "View"),
            "update" => ("pencil", "Update"),
            "delete" => ("trash", "Delete"),
            _ => return None,
        };

        let mut options = Attributes::new()
            .with("title", title)
            .with("aria-label", title)
            .with("data-pjax", "0");
        if name == "delete" {
            options.set("data-confirm", "Are you sure you want to delete this item?");
            options.set("data-method", "post");
        }
        options.merge(&self.button_options);

        let icon = html::tag(
            "span",
            "",
            &Attributes::new().with_class(&format!("glyphicon glyphicon-{icon}")),
        );
        Some(html::a(&icon, Some(url), &options))
    }

    fn create_url(&self, action: &str, row: &Row, index: usize, context: &GridContext<'_>) -> String {
        match &self.url_creator {
            Some(creator) => creator(action, row, index),
            None => context.urls.action_url(action, &row.key),
        }
    }

    pub(crate) fn data_content(&self, row: &Row, index: usize, context: &GridContext<'_>) -> String {
        BUTTON_TOKEN_REGEX
            .replace_all(&self.template, |captures: &Captures| {
                let name = &captures[1];
                if self.visible_buttons.get(name) == Some(&false) {
                    return String::new();
                }
                let url = || self.create_url(name, row, index, context);
                match self.buttons.get(name) {
                    Some(button) => button(&url(), row, index),
                    None => self.default_button(name, &url()).unwrap_or_default(),
                }
            })
            .into_owned()
    }
}
