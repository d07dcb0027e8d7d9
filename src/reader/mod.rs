//! Data access capabilities consumed by the widgets.
//!
//! Widgets only read through [`DataReader`] and [`Paginator`]; the in-memory
//! implementations in [`iterable`] and [`paginator`] cover callers that
//! already hold their rows.

use serde::Serialize;
use serde_json::Value;

use crate::format;

pub mod iterable;
pub mod paginator;
pub mod sort;

pub use iterable::IterableDataReader;
pub use paginator::{DEFAULT_PAGE_SIZE, OffsetPaginator};
pub use sort::{Sort, SortDirection};

/// One record together with the key identifying it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Row {
    pub key: Value,
    pub data: Value,
}

impl Row {
    pub fn new(key: impl Into<Value>, data: Value) -> Self {
        Self {
            key: key.into(),
            data,
        }
    }

    /// The key as it appears in markup: scalars as text, composite keys as
    /// compact JSON.
    pub fn key_string(&self) -> String {
        format::display_string(&self.key)
    }
}

/// Ordered collection of rows.
pub trait DataReader: Send + Sync {
    fn count(&self) -> usize;

    fn read(&self) -> Vec<Row>;

    fn read_range(&self, offset: usize, limit: usize) -> Vec<Row> {
        self.read().into_iter().skip(offset).take(limit).collect()
    }

    /// Active sort specification, if the reader is sortable.
    fn sort(&self) -> Option<Sort>;
}

/// Page position within a reader's rows.
///
/// Paginators are immutable: navigation returns a new instance.
pub trait Paginator: Send + Sync {
    /// Zero-based index of the current page.
    fn current_page(&self) -> usize;

    fn total_pages(&self) -> usize;

    fn page_size(&self) -> usize;

    /// Number of rows on the current page.
    fn current_page_size(&self) -> usize;

    /// Number of rows before the current page.
    fn offset(&self) -> usize {
        self.current_page() * self.page_size()
    }

    fn is_on_first_page(&self) -> bool;

    fn is_on_last_page(&self) -> bool;

    /// Rows of the current page.
    fn read(&self) -> Vec<Row>;

    fn previous_page_token(&self) -> Option<String>;

    fn next_page_token(&self) -> Option<String>;

    /// Returns a paginator positioned at `token`, or at the first page when
    /// `token` is `None`.
    fn with_previous_page_token(&self, token: Option<String>) -> Box<dyn Paginator>;

    /// Returns a paginator positioned at `token`, or at the first page when
    /// `token` is `None`.
    fn with_next_page_token(&self, token: Option<String>) -> Box<dyn Paginator>;
}
