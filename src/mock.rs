//! Mock collaborators for isolating widgets in tests.

use mockall::mock;
use serde_json::Value;

use crate::i18n::{MessageFormatter, MessageParams};
use crate::reader::{DataReader, Paginator, Row, Sort};
use crate::url::UrlGenerator;

mock! {
    pub DataReader {}

    impl DataReader for DataReader {
        fn count(&self) -> usize;
        fn read(&self) -> Vec<Row>;
        fn read_range(&self, offset: usize, limit: usize) -> Vec<Row>;
        fn sort(&self) -> Option<Sort>;
    }
}

mock! {
    pub Paginator {}

    impl Paginator for Paginator {
        fn current_page(&self) -> usize;
        fn total_pages(&self) -> usize;
        fn page_size(&self) -> usize;
        fn current_page_size(&self) -> usize;
        fn offset(&self) -> usize;
        fn is_on_first_page(&self) -> bool;
        fn is_on_last_page(&self) -> bool;
        fn read(&self) -> Vec<Row>;
        fn previous_page_token(&self) -> Option<String>;
        fn next_page_token(&self) -> Option<String>;
        fn with_previous_page_token(&self, token: Option<String>) -> Box<dyn Paginator>;
        fn with_next_page_token(&self, token: Option<String>) -> Box<dyn Paginator>;
    }
}

mock! {
    pub MessageFormatter {}

    impl MessageFormatter for MessageFormatter {
        fn format(&self, message: &str, params: &MessageParams, locale: &str) -> String;
    }
}

mock! {
    pub UrlGenerator {}

    impl UrlGenerator for UrlGenerator {
        fn page_url(&self, page: usize) -> String;
        fn sort_url(&self, order: &str) -> String;
        fn action_url(&self, action: &str, key: &Value) -> String;
    }
}
