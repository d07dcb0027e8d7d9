//! List-style views built on a shared rendering pipeline.
//!
//! [`BaseListView`] owns everything list and grid views have in common: the
//! data reader and paginator, the layout template and the summary, empty
//! state, pager and sorter sections. Concrete views only render the items.

use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};
use serde_json::Value;

use crate::errors::{DataViewError, DataViewResult};
use crate::html::{self, Attributes};
use crate::i18n::{DEFAULT_LOCALE, MessageFormatter, MessageParams};
use crate::reader::{DataReader, Paginator, Row};
use crate::url::{QueryUrlGenerator, UrlGenerator};
use crate::widgets::{LinkPager, LinkSorter, PagerConfig, SorterConfig};

pub const DEFAULT_SUMMARY: &str = "Showing <b>{begin, number}-{end, number}</b> of <b>{totalCount, number}</b> {totalCount, plural, one{item} other{items}}.";
pub const DEFAULT_TOTAL_SUMMARY: &str =
    "Total <b>{count, number}</b> {count, plural, one{item} other{items}}.";
pub const DEFAULT_LAYOUT: &str = "{summary}\n{items}\n{pager}";
pub const DEFAULT_EMPTY_TEXT: &str = "No results found.";

static LAYOUT_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\w+\}").expect("Invalid layout token regex"));

/// Generates the fluent [`BaseListView`] setters on a view that keeps its
/// base in a `base` field.
macro_rules! list_view_setters {
    ($view:ty) => {
        impl $view {
            pub fn data_reader(
                mut self,
                reader: std::sync::Arc<dyn $crate::reader::DataReader>,
            ) -> Self {
                self.base = self.base.data_reader(reader);
                self
            }

            pub fn paginator(
                mut self,
                paginator: std::sync::Arc<dyn $crate::reader::Paginator>,
            ) -> Self {
                self.base = self.base.paginator(paginator);
                self
            }

            pub fn urls(mut self, urls: std::sync::Arc<dyn $crate::url::UrlGenerator>) -> Self {
                self.base = self.base.urls(urls);
                self
            }

            pub fn options(mut self, options: $crate::html::Attributes) -> Self {
                self.base = self.base.options(options);
                self
            }

            pub fn layout(mut self, layout: impl Into<String>) -> Self {
                self.base = self.base.layout(layout);
                self
            }

            pub fn summary(mut self, summary: impl Into<String>) -> Self {
                self.base = self.base.summary(summary);
                self
            }

            pub fn total_summary(mut self, summary: impl Into<String>) -> Self {
                self.base = self.base.total_summary(summary);
                self
            }

            pub fn summary_options(mut self, options: $crate::html::Attributes) -> Self {
                self.base = self.base.summary_options(options);
                self
            }

            pub fn show_on_empty(mut self, show: bool) -> Self {
                self.base = self.base.show_on_empty(show);
                self
            }

            pub fn empty_text(mut self, text: impl Into<String>) -> Self {
                self.base = self.base.empty_text(text);
                self
            }

            pub fn show_empty_text(mut self, show: bool) -> Self {
                self.base = self.base.show_empty_text(show);
                self
            }

            pub fn empty_text_options(mut self, options: $crate::html::Attributes) -> Self {
                self.base = self.base.empty_text_options(options);
                self
            }

            pub fn pager(mut self, config: $crate::widgets::PagerConfig) -> Self {
                self.base = self.base.pager(config);
                self
            }

            pub fn sorter(mut self, config: $crate::widgets::SorterConfig) -> Self {
                self.base = self.base.sorter(config);
                self
            }

            pub fn locale(mut self, locale: impl Into<String>) -> Self {
                self.base = self.base.locale(locale);
                self
            }

            /// Shared list view state.
            pub fn base(&self) -> &$crate::views::BaseListView {
                &self.base
            }
        }
    };
}

pub mod detail;
pub mod grid;
pub mod list;

pub use detail::{DetailAttribute, DetailView};
pub use grid::GridView;
pub use list::ListView;

/// A `{token}` the layout template can reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Summary,
    Items,
    Sorter,
    Pager,
}

impl Section {
    /// Parses a token including its braces.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "{summary}" => Some(Section::Summary),
            "{items}" => Some(Section::Items),
            "{sorter}" => Some(Section::Sorter),
            "{pager}" => Some(Section::Pager),
            _ => None,
        }
    }
}

/// Attributes computed per row: fixed, or produced by a callback receiving
/// the row and its index on the page.
#[derive(Clone)]
pub enum RowOptions {
    Static(Attributes),
    Callback(Arc<dyn Fn(&Row, usize) -> Attributes + Send + Sync>),
}

impl RowOptions {
    pub fn callback<F>(callback: F) -> Self
    where
        F: Fn(&Row, usize) -> Attributes + Send + Sync + 'static,
    {
        RowOptions::Callback(Arc::new(callback))
    }

    pub fn evaluate(&self, row: &Row, index: usize) -> Attributes {
        match self {
            RowOptions::Static(attributes) => attributes.clone(),
            RowOptions::Callback(callback) => callback(row, index),
        }
    }
}

impl Default for RowOptions {
    fn default() -> Self {
        RowOptions::Static(Attributes::new())
    }
}

impl From<Attributes> for RowOptions {
    fn from(attributes: Attributes) -> Self {
        RowOptions::Static(attributes)
    }
}

/// Renders the `{items}` section of a concrete view.
pub trait RenderItems {
    fn render_items(&self, base: &BaseListView) -> String;
}

/// State and rendering shared by list-style views.
#[derive(Clone)]
pub struct BaseListView {
    formatter: Arc<dyn MessageFormatter>,
    urls: Arc<dyn UrlGenerator>,
    data_reader: Option<Arc<dyn DataReader>>,
    paginator: Option<Arc<dyn Paginator>>,
    options: Attributes,
    layout: String,
    summary: String,
    total_summary: String,
    summary_options: Attributes,
    show_on_empty: bool,
    empty_text: String,
    show_empty_text: bool,
    empty_text_options: Attributes,
    pager: PagerConfig,
    sorter: SorterConfig,
    locale: String,
}

impl BaseListView {
    pub fn new(formatter: Arc<dyn MessageFormatter>) -> Self {
        Self {
            formatter,
            urls: Arc::new(QueryUrlGenerator::default()),
            data_reader: None,
            paginator: None,
            options: Attributes::new(),
            layout: DEFAULT_LAYOUT.to_string(),
            summary: DEFAULT_SUMMARY.to_string(),
            total_summary: DEFAULT_TOTAL_SUMMARY.to_string(),
            summary_options: Attributes::new().with_class("summary"),
            show_on_empty: false,
            empty_text: DEFAULT_EMPTY_TEXT.to_string(),
            show_empty_text: true,
            empty_text_options: Attributes::new().with_class("empty"),
            pager: PagerConfig::default(),
            sorter: SorterConfig::default(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    pub fn data_reader(mut self, reader: Arc<dyn DataReader>) -> Self {
        self.data_reader = Some(reader);
        self
    }

    pub fn paginator(mut self, paginator: Arc<dyn Paginator>) -> Self {
        self.paginator = Some(paginator);
        self
    }

    pub fn urls(mut self, urls: Arc<dyn UrlGenerator>) -> Self {
        self.urls = urls;
        self
    }

    /// Container attributes; `tag` defaults to `div`.
    pub fn options(mut self, options: Attributes) -> Self {
        self.options = options;
        self
    }

    pub fn layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Summary template used with a paginator. An empty template hides the
    /// summary.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Summary template used without a paginator.
    pub fn total_summary(mut self, summary: impl Into<String>) -> Self {
        self.total_summary = summary.into();
        self
    }

    pub fn summary_options(mut self, options: Attributes) -> Self {
        self.summary_options = options;
        self
    }

    pub fn show_on_empty(mut self, show: bool) -> Self {
        self.show_on_empty = show;
        self
    }

    pub fn empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    pub fn show_empty_text(mut self, show: bool) -> Self {
        self.show_empty_text = show;
        self
    }

    pub fn empty_text_options(mut self, options: Attributes) -> Self {
        self.empty_text_options = options;
        self
    }

    pub fn pager(mut self, config: PagerConfig) -> Self {
        self.pager = config;
        self
    }

    pub fn sorter(mut self, config: SorterConfig) -> Self {
        self.sorter = config;
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn formatter(&self) -> &dyn MessageFormatter {
        self.formatter.as_ref()
    }

    pub fn url_generator(&self) -> &dyn UrlGenerator {
        self.urls.as_ref()
    }

    pub fn get_paginator(&self) -> Option<&dyn Paginator> {
        self.paginator.as_deref()
    }

    pub fn get_locale(&self) -> &str {
        &self.locale
    }

    /// The configured reader, or [`DataViewError::MissingDataReader`].
    pub fn reader(&self) -> DataViewResult<&dyn DataReader> {
        self.data_reader
            .as_deref()
            .ok_or(DataViewError::MissingDataReader)
    }

    /// Rows to render: the current page when a paginator is set, otherwise
    /// every row of the reader.
    pub fn rows(&self) -> Vec<Row> {
        match (&self.paginator, &self.data_reader) {
            (Some(paginator), _) => paginator.read(),
            (None, Some(reader)) => reader.read(),
            (None, None) => Vec::new(),
        }
    }

    /// Renders the layout (or the empty state) with `items` providing the
    /// `{items}` section, wrapped in the container tag.
    pub fn run_with(&self, items: &dyn RenderItems) -> DataViewResult<String> {
        let reader = self.reader()?;

        let content = if self.show_on_empty || reader.count() > 0 {
            LAYOUT_TOKEN_REGEX
                .replace_all(&self.layout, |captures: &Captures| {
                    let token = &captures[0];
                    match Section::from_token(token) {
                        Some(section) => self.render_section(section, reader, items),
                        None => {
                            log::debug!("Leaving unknown layout token {token} as is");
                            token.to_string()
                        }
                    }
                })
                .into_owned()
        } else {
            self.render_empty()
        };

        let mut options = self.options.clone();
        let tag = options.take_tag("div");
        Ok(html::tag(&tag, &content, &options))
    }

    fn render_section(
        &self,
        section: Section,
        reader: &dyn DataReader,
        items: &dyn RenderItems,
    ) -> String {
        match section {
            Section::Summary => self.summary_section(reader),
            Section::Items => items.render_items(self),
            Section::Sorter => self.sorter_section(reader),
            Section::Pager => self.pager_section(reader),
        }
    }

    /// The empty-state block, or nothing when the empty text is disabled.
    pub fn render_empty(&self) -> String {
        if !self.show_empty_text {
            return String::new();
        }
        let mut options = self.empty_text_options.clone();
        let tag = options.take_tag("div");
        html::tag(&tag, &self.empty_text, &options)
    }

    /// Parameters passed to the summary template.
    pub fn summary_params(&self) -> DataViewResult<MessageParams> {
        Ok(self.summary_params_for(self.reader()?))
    }

    fn summary_params_for(&self, reader: &dyn DataReader) -> MessageParams {
        let total = to_i64(reader.count());

        let (begin, end, count, page, page_count) = match &self.paginator {
            Some(paginator) => {
                let count = to_i64(paginator.current_page_size());
                let mut begin = to_i64(paginator.offset()) + 1;
                let end = begin + count - 1;
                if begin > end {
                    begin = end;
                }
                (
                    begin,
                    end,
                    count,
                    to_i64(paginator.current_page()) + 1,
                    to_i64(paginator.total_pages()),
                )
            }
            None => (1, total, total, 1, 1),
        };

        MessageParams::from([
            ("begin".to_string(), Value::from(begin)),
            ("end".to_string(), Value::from(end)),
            ("count".to_string(), Value::from(count)),
            ("totalCount".to_string(), Value::from(total)),
            ("page".to_string(), Value::from(page)),
            ("pageCount".to_string(), Value::from(page_count)),
        ])
    }

    pub fn render_summary(&self) -> DataViewResult<String> {
        Ok(self.summary_section(self.reader()?))
    }

    fn summary_section(&self, reader: &dyn DataReader) -> String {
        if reader.count() == 0 {
            return String::new();
        }
        let template = match self.paginator {
            Some(_) => &self.summary,
            None => &self.total_summary,
        };
        if template.is_empty() {
            return String::new();
        }

        let params = self.summary_params_for(reader);
        let content = self.formatter.format(template, &params, &self.locale);
        let mut options = self.summary_options.clone();
        let tag = options.take_tag("div");
        html::tag(&tag, &content, &options)
    }

    pub fn render_pager(&self) -> DataViewResult<String> {
        Ok(self.pager_section(self.reader()?))
    }

    fn pager_section(&self, reader: &dyn DataReader) -> String {
        match &self.paginator {
            Some(paginator) if reader.count() > 0 => LinkPager::new(self.urls.clone())
                .config(self.pager.clone())
                .render_buttons(paginator.as_ref()),
            _ => String::new(),
        }
    }

    pub fn render_sorter(&self) -> DataViewResult<String> {
        Ok(self.sorter_section(self.reader()?))
    }

    fn sorter_section(&self, reader: &dyn DataReader) -> String {
        match reader.sort() {
            Some(sort) if !sort.allowed_fields().is_empty() && reader.count() > 0 => {
                LinkSorter::new(sort, self.urls.clone())
                    .config(self.sorter.clone())
                    .run()
            }
            _ => String::new(),
        }
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
