use std::sync::Arc;

use crate::reader::{DataReader, Paginator, Row};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Offset/limit paginator over a [`DataReader`].
///
/// Page tokens are 1-based page numbers. A current page past the end is
/// clamped to the last page.
#[derive(Clone)]
pub struct OffsetPaginator {
    reader: Arc<dyn DataReader>,
    page_size: usize,
    current_page: usize,
}

impl OffsetPaginator {
    pub fn new(reader: Arc<dyn DataReader>) -> Self {
        Self {
            reader,
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 0,
        }
    }

    /// Sets the page size; zero is treated as one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Positions the paginator at a zero-based page.
    pub fn with_current_page(mut self, page: usize) -> Self {
        self.current_page = page;
        self
    }

    /// Positions the paginator at the page a token names.
    pub fn with_token(&self, token: Option<&str>) -> Self {
        let page = match token {
            None => 0,
            Some(token) => match token.trim().parse::<usize>() {
                Ok(number) => number.saturating_sub(1),
                Err(_) => {
                    log::debug!("Ignoring invalid page token {token:?}");
                    0
                }
            },
        };
        self.clone().with_current_page(page)
    }

    fn token_for(page: usize) -> String {
        (page + 1).to_string()
    }
}

impl Paginator for OffsetPaginator {
    fn current_page(&self) -> usize {
        self.current_page
            .min(self.total_pages().saturating_sub(1))
    }

    fn total_pages(&self) -> usize {
        self.reader.count().div_ceil(self.page_size)
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn current_page_size(&self) -> usize {
        self.reader
            .count()
            .saturating_sub(self.offset())
            .min(self.page_size)
    }

    fn is_on_first_page(&self) -> bool {
        self.current_page() == 0
    }

    fn is_on_last_page(&self) -> bool {
        self.current_page() + 1 >= self.total_pages()
    }

    fn read(&self) -> Vec<Row> {
        self.reader.read_range(self.offset(), self.page_size)
    }

    fn previous_page_token(&self) -> Option<String> {
        (!self.is_on_first_page()).then(|| Self::token_for(self.current_page() - 1))
    }

    fn next_page_token(&self) -> Option<String> {
        (!self.is_on_last_page()).then(|| Self::token_for(self.current_page() + 1))
    }

    fn with_previous_page_token(&self, token: Option<String>) -> Box<dyn Paginator> {
        Box::new(self.with_token(token.as_deref()))
    }

    fn with_next_page_token(&self, token: Option<String>) -> Box<dyn Paginator> {
        Box::new(self.with_token(token.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::reader::IterableDataReader;

    fn reader(rows: usize) -> Arc<dyn DataReader> {
        Arc::new(IterableDataReader::new(
            (0..rows).map(|i| json!({ "id": i })).collect(),
        ))
    }

    #[test]
    fn pages_are_counted_and_clamped() {
        let paginator = OffsetPaginator::new(reader(25))
            .with_page_size(10)
            .with_current_page(7);

        assert_eq!(paginator.total_pages(), 3);
        assert_eq!(paginator.current_page(), 2);
        assert_eq!(paginator.offset(), 20);
        assert_eq!(paginator.current_page_size(), 5);
        assert!(paginator.is_on_last_page());
        assert_eq!(paginator.read().len(), 5);
    }

    #[test]
    fn tokens_navigate_without_mutating() {
        let paginator = OffsetPaginator::new(reader(25)).with_current_page(1);

        assert_eq!(paginator.previous_page_token().as_deref(), Some("1"));
        assert_eq!(paginator.next_page_token().as_deref(), Some("3"));

        let next = paginator.with_next_page_token(paginator.next_page_token());
        assert_eq!(next.current_page(), 2);
        assert_eq!(paginator.current_page(), 1);

        let first = paginator.with_previous_page_token(None);
        assert!(first.is_on_first_page());
    }

    #[test]
    fn empty_reader_has_no_pages() {
        let paginator = OffsetPaginator::new(reader(0));

        assert_eq!(paginator.total_pages(), 0);
        assert_eq!(paginator.current_page_size(), 0);
        assert!(paginator.is_on_first_page());
        assert!(paginator.is_on_last_page());
        assert_eq!(paginator.next_page_token(), None);
    }
}
