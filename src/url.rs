//! URL generation for pager, sorter and action links.

use serde_json::Value;

use crate::format;

/// Builds the URLs widgets link to.
pub trait UrlGenerator: Send + Sync {
    /// URL of the zero-based `page`.
    fn page_url(&self, page: usize) -> String;

    /// URL requesting the `order` string.
    fn sort_url(&self, order: &str) -> String;

    /// URL of `action` applied to the row identified by `key`.
    fn action_url(&self, action: &str, key: &Value) -> String;
}

pub const PAGE_PARAM: &str = "page";
pub const SORT_PARAM: &str = "sort";

/// Generates query-string URLs relative to a base path.
///
/// Extra parameters (for example the active sort when paging) are carried on
/// every page and sort URL. Pages are exposed 1-based.
#[derive(Clone, Debug, Default)]
pub struct QueryUrlGenerator {
    path: String,
    params: Vec<(String, String)>,
}

impl QueryUrlGenerator {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Adds a parameter carried on page and sort URLs. Empty values are
    /// skipped.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let (name, value) = (name.into(), value.into());
        if !value.is_empty() {
            self.params.retain(|(existing, _)| *existing != name);
            self.params.push((name, value));
        }
        self
    }

    fn with_query(&self, name: &str, value: String) -> String {
        let mut params: Vec<(String, String)> = self
            .params
            .iter()
            .filter(|(existing, _)| existing != name)
            .cloned()
            .collect();
        params.push((name.to_string(), value));

        match serde_html_form::to_string(&params) {
            Ok(query) => format!("{}?{query}", self.path),
            Err(e) => {
                log::error!("Failed to encode query for {}: {e}", self.path);
                self.path.clone()
            }
        }
    }
}

impl UrlGenerator for QueryUrlGenerator {
    fn page_url(&self, page: usize) -> String {
        self.with_query(PAGE_PARAM, (page + 1).to_string())
    }

    fn sort_url(&self, order: &str) -> String {
        // A new order starts from the first page.
        let mut generator = self.clone();
        generator.params.retain(|(name, _)| name != PAGE_PARAM);
        generator.with_query(SORT_PARAM, order.to_string())
    }

    fn action_url(&self, action: &str, key: &Value) -> String {
        let path = self.path.trim_end_matches('/');
        let query = serde_html_form::to_string(vec![("id", format::display_string(key))])
            .unwrap_or_default();
        format!("{path}/{action}?{query}")
    }
}
