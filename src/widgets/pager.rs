//! Link pager: a list of page buttons around the current page.

use std::sync::Arc;

use serde::Deserialize;

use crate::errors::{DataViewError, DataViewResult};
use crate::html::{self, Attributes};
use crate::reader::Paginator;
use crate::url::UrlGenerator;

pub const DEFAULT_MAX_BUTTON_COUNT: usize = 10;

/// Label of a first/prev/next/last button.
///
/// In settings files `false` hides the button, `true` shows the page number
/// and a string is used as the label.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawPageLabel")]
pub enum PageLabel {
    Hidden,
    Number,
    /// Inserted into the markup without encoding.
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPageLabel {
    Flag(bool),
    Text(String),
}

impl From<RawPageLabel> for PageLabel {
    fn from(raw: RawPageLabel) -> Self {
        match raw {
            RawPageLabel::Flag(false) => PageLabel::Hidden,
            RawPageLabel::Flag(true) => PageLabel::Number,
            RawPageLabel::Text(text) => PageLabel::Text(text),
        }
    }
}

impl From<&str> for PageLabel {
    fn from(text: &str) -> Self {
        PageLabel::Text(text.to_string())
    }
}

impl PageLabel {
    fn resolve(&self, number: usize) -> Option<String> {
        match self {
            PageLabel::Hidden => None,
            PageLabel::Number => Some(number.to_string()),
            PageLabel::Text(text) => Some(text.clone()),
        }
    }
}

/// Rendering options of [`LinkPager`].
#[derive(Clone, Debug, PartialEq)]
pub struct PagerConfig {
    /// Container attributes; `tag` defaults to `ul`.
    pub options: Attributes,
    /// Attributes of each button container; `tag` defaults to `li`.
    pub link_container_options: Attributes,
    pub link_options: Attributes,
    /// Class of page number buttons.
    pub page_css_class: Option<String>,
    pub first_page_css_class: String,
    pub last_page_css_class: String,
    pub prev_page_css_class: String,
    pub next_page_css_class: String,
    pub active_page_css_class: String,
    pub disabled_page_css_class: String,
    /// Attributes of the tag wrapping a disabled button's label; `tag`
    /// defaults to `span`.
    pub disabled_list_item_sub_tag_options: Attributes,
    pub max_button_count: usize,
    pub first_page_label: PageLabel,
    pub prev_page_label: PageLabel,
    pub next_page_label: PageLabel,
    pub last_page_label: PageLabel,
    pub hide_on_single_page: bool,
    pub disable_current_page_button: bool,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            options: Attributes::new().with_class("pagination"),
            link_container_options: Attributes::new(),
            link_options: Attributes::new(),
            page_css_class: None,
            first_page_css_class: "first".to_string(),
            last_page_css_class: "last".to_string(),
            prev_page_css_class: "prev".to_string(),
            next_page_css_class: "next".to_string(),
            active_page_css_class: "active".to_string(),
            disabled_page_css_class: "disabled".to_string(),
            disabled_list_item_sub_tag_options: Attributes::new(),
            max_button_count: DEFAULT_MAX_BUTTON_COUNT,
            first_page_label: PageLabel::Hidden,
            prev_page_label: PageLabel::Text("&laquo;".to_string()),
            next_page_label: PageLabel::Text("&raquo;".to_string()),
            last_page_label: PageLabel::Hidden,
            hide_on_single_page: true,
            disable_current_page_button: false,
        }
    }
}

impl PagerConfig {
    pub fn options(mut self, options: Attributes) -> Self {
        self.options = options;
        self
    }

    pub fn link_container_options(mut self, options: Attributes) -> Self {
        self.link_container_options = options;
        self
    }

    pub fn link_options(mut self, options: Attributes) -> Self {
        self.link_options = options;
        self
    }

    pub fn page_css_class(mut self, class: impl Into<String>) -> Self {
        self.page_css_class = Some(class.into());
        self
    }

    pub fn disabled_list_item_sub_tag_options(mut self, options: Attributes) -> Self {
        self.disabled_list_item_sub_tag_options = options;
        self
    }

    pub fn max_button_count(mut self, count: usize) -> Self {
        self.max_button_count = count;
        self
    }

    pub fn first_page_label(mut self, label: impl Into<PageLabel>) -> Self {
        self.first_page_label = label.into();
        self
    }

    pub fn prev_page_label(mut self, label: impl Into<PageLabel>) -> Self {
        self.prev_page_label = label.into();
        self
    }

    pub fn next_page_label(mut self, label: impl Into<PageLabel>) -> Self {
        self.next_page_label = label.into();
        self
    }

    pub fn last_page_label(mut self, label: impl Into<PageLabel>) -> Self {
        self.last_page_label = label.into();
        self
    }

    pub fn hide_on_single_page(mut self, hide: bool) -> Self {
        self.hide_on_single_page = hide;
        self
    }

    pub fn disable_current_page_button(mut self, disable: bool) -> Self {
        self.disable_current_page_button = disable;
        self
    }
}

/// Zero-based, inclusive range of page buttons to show.
///
/// The window holds at most `max_button_count` pages, is centred on
/// `current_page` where possible and is shifted left near the last page.
/// Returns `None` when there are no pages.
pub fn page_range(
    current_page: usize,
    total_pages: usize,
    max_button_count: usize,
) -> Option<(usize, usize)> {
    if total_pages == 0 || max_button_count == 0 {
        return None;
    }

    let mut begin = current_page.saturating_sub(max_button_count / 2);
    let mut end = begin + max_button_count - 1;
    if end >= total_pages {
        end = total_pages - 1;
        begin = (end + 1).saturating_sub(max_button_count);
    }

    Some((begin, end))
}

/// Renders page navigation for a [`Paginator`].
#[derive(Clone)]
pub struct LinkPager {
    urls: Arc<dyn UrlGenerator>,
    paginator: Option<Arc<dyn Paginator>>,
    config: PagerConfig,
}

impl LinkPager {
    pub fn new(urls: Arc<dyn UrlGenerator>) -> Self {
        Self {
            urls,
            paginator: None,
            config: PagerConfig::default(),
        }
    }

    pub fn paginator(mut self, paginator: Arc<dyn Paginator>) -> Self {
        self.paginator = Some(paginator);
        self
    }

    pub fn config(mut self, config: PagerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn run(&self) -> DataViewResult<String> {
        let paginator = self
            .paginator
            .as_deref()
            .ok_or(DataViewError::MissingPaginator)?;
        Ok(self.render_buttons(paginator))
    }

    /// Relational `<link>` tags describing the current position, one per
    /// line, for the document head.
    pub fn link_tags(&self) -> DataViewResult<String> {
        let paginator = self
            .paginator
            .as_deref()
            .ok_or(DataViewError::MissingPaginator)?;

        let total = paginator.total_pages();
        if total == 0 {
            return Ok(String::new());
        }
        let current = paginator.current_page();

        let mut links = vec![("self", current)];
        if !paginator.is_on_first_page() {
            links.push(("first", 0));
            links.push(("prev", current - 1));
        }
        if !paginator.is_on_last_page() {
            links.push(("next", current + 1));
            links.push(("last", total - 1));
        }

        Ok(links
            .into_iter()
            .map(|(rel, page)| {
                let attributes = Attributes::new()
                    .with("rel", rel)
                    .with("href", self.urls.page_url(page));
                html::tag("link", "", &attributes)
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }

    pub(crate) fn render_buttons(&self, paginator: &dyn Paginator) -> String {
        let config = &self.config;
        let total = paginator.total_pages();
        if total == 0 || (total < 2 && config.hide_on_single_page) {
            return String::new();
        }

        let current = paginator.current_page();
        let last = total.saturating_sub(1);
        let backward_disabled = paginator.is_on_first_page()
            || paginator
                .with_previous_page_token(paginator.previous_page_token())
                .is_on_first_page();
        let forward_disabled = paginator.is_on_last_page()
            || paginator
                .with_next_page_token(paginator.next_page_token())
                .is_on_last_page();

        let mut buttons = Vec::new();

        if let Some(label) = config.first_page_label.resolve(1) {
            buttons.push(self.render_button(
                &label,
                0,
                Some(&config.first_page_css_class),
                backward_disabled,
                false,
            ));
        }

        let previous = current.saturating_sub(1);
        if let Some(label) = config.prev_page_label.resolve(previous + 1) {
            buttons.push(self.render_button(
                &label,
                previous,
                Some(&config.prev_page_css_class),
                backward_disabled,
                false,
            ));
        }

        if let Some((begin, end)) = page_range(current, total, config.max_button_count) {
            for page in begin..=end {
                let active = page == current;
                buttons.push(self.render_button(
                    &(page + 1).to_string(),
                    page,
                    config.page_css_class.as_ref(),
                    forward_disabled || (active && config.disable_current_page_button),
                    active,
                ));
            }
        }

        let next = (current + 1).min(last);
        if let Some(label) = config.next_page_label.resolve(next + 1) {
            buttons.push(self.render_button(
                &label,
                next,
                Some(&config.next_page_css_class),
                forward_disabled,
                false,
            ));
        }

        if let Some(label) = config.last_page_label.resolve(total) {
            buttons.push(self.render_button(
                &label,
                last,
                Some(&config.last_page_css_class),
                forward_disabled,
                false,
            ));
        }

        let mut options = config.options.clone();
        let tag = options.take_tag("ul");
        html::tag(&tag, &buttons.join("\n"), &options)
    }

    fn render_button(
        &self,
        label: &str,
        page: usize,
        class: Option<&String>,
        disabled: bool,
        active: bool,
    ) -> String {
        let config = &self.config;
        let mut options = config.link_container_options.clone();
        let container = options.take_tag("li");
        if let Some(class) = class {
            options.add_class(class);
        }
        if active {
            options.add_class(&config.active_page_css_class);
        }

        if disabled {
            options.add_class(&config.disabled_page_css_class);
            let mut sub_options = config.disabled_list_item_sub_tag_options.clone();
            let sub_tag = sub_options.take_tag("span");
            return html::tag(
                &container,
                &html::tag(&sub_tag, label, &sub_options),
                &options,
            );
        }

        let link_options = config.link_options.clone().with("data-page", page);
        html::tag(
            &container,
            &html::a(label, Some(&self.urls.page_url(page)), &link_options),
            &options,
        )
    }
}
