pub mod pager;
pub mod sorter;

pub use pager::{LinkPager, PageLabel, PagerConfig, page_range};
pub use sorter::{LinkSorter, SorterConfig, sort_link};
