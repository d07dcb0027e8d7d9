use serde::{Deserialize, Serialize};

/// How the index page lays out the rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    #[default]
    Grid,
    List,
}

impl ViewKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::Grid => "grid",
            ViewKind::List => "list",
        }
    }
}

/// Query parameters accepted by the index page service.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// 1-based page token.
    pub page: Option<String>,
    /// Sort order such as `-price,name`.
    pub sort: Option<String>,
    pub view: Option<ViewKind>,
}

/// Data required to render the main index template.
#[derive(Debug)]
pub struct IndexPageData {
    /// Rendered grid or list widget.
    pub content: String,
    /// `<link rel="...">` tags of the pager.
    pub link_tags: String,
    pub view: ViewKind,
}

/// Data required to render a single item.
#[derive(Debug)]
pub struct DetailPageData {
    pub title: String,
    /// Rendered detail widget.
    pub content: String,
}
