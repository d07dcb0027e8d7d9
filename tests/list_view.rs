use std::sync::Arc;

use pretty_assertions::assert_eq;
use pushkind_dataview::errors::DataViewError;
use pushkind_dataview::html::Attributes;
use pushkind_dataview::i18n::IcuMessageFormatter;
use pushkind_dataview::reader::{DataReader, IterableDataReader, OffsetPaginator, Sort};
use pushkind_dataview::url::QueryUrlGenerator;
use pushkind_dataview::views::ListView;
use pushkind_dataview::widgets::SorterConfig;
use serde_json::{Value, json};

fn reader(rows: Vec<Value>) -> Arc<dyn DataReader> {
    Arc::new(IterableDataReader::new(rows))
}

fn list(reader: Arc<dyn DataReader>) -> ListView {
    ListView::new(Arc::new(IcuMessageFormatter::new()))
        .data_reader(reader)
        .urls(Arc::new(QueryUrlGenerator::new("/list")))
}

/// Ensures the default layout renders summary, items and pager in order.
#[test]
fn default_layout_with_paginator() {
    let reader = reader(["a", "b", "c", "d", "e"].map(Value::from).to_vec());
    let paginator = OffsetPaginator::new(reader.clone()).with_page_size(2);

    let html = list(reader)
        .paginator(Arc::new(paginator))
        .run()
        .expect("reader is set");

    assert_eq!(
        html,
        "<div class=\"list-view\">\
         <div class=\"summary\">Showing <b>1-2</b> of <b>5</b> items.</div>\n\
         <div data-key=\"0\">a</div>\n<div data-key=\"1\">b</div>\n\
         <ul class=\"pagination\"><li class=\"prev disabled\"><span>&laquo;</span></li>\n\
         <li class=\"active\"><a href=\"/list?page=1\" data-page=\"0\">1</a></li>\n\
         <li><a href=\"/list?page=2\" data-page=\"1\">2</a></li>\n\
         <li><a href=\"/list?page=3\" data-page=\"2\">3</a></li>\n\
         <li class=\"next\"><a href=\"/list?page=2\" data-page=\"1\">&raquo;</a></li></ul></div>"
    );
}

/// Ensures the summary of the last page counts only the rows shown.
#[test]
fn summary_of_a_partial_last_page() {
    let reader = reader(["a", "b", "c", "d", "e"].map(Value::from).to_vec());
    let paginator = OffsetPaginator::new(reader.clone())
        .with_page_size(2)
        .with_current_page(2);

    let html = list(reader)
        .paginator(Arc::new(paginator))
        .layout("{summary}")
        .summary("{begin}-{end} of {totalCount}, page {page} of {pageCount}")
        .run()
        .expect("reader is set");

    assert_eq!(
        html,
        "<div class=\"list-view\"><div class=\"summary\">5-5 of 5, page 3 of 3</div></div>"
    );
}

/// Ensures an empty reader renders only the empty block.
#[test]
fn empty_reader_renders_the_empty_text() {
    let html = list(reader(Vec::new())).run().expect("reader is set");

    assert_eq!(
        html,
        "<div class=\"list-view\"><div class=\"empty\">No results found.</div></div>"
    );

    let html = list(reader(Vec::new()))
        .empty_text("Nothing here")
        .empty_text_options(Attributes::new().with("tag", "p").with_class("none"))
        .run()
        .expect("reader is set");
    assert_eq!(
        html,
        "<div class=\"list-view\"><p class=\"none\">Nothing here</p></div>"
    );

    let html = list(reader(Vec::new()))
        .show_empty_text(false)
        .run()
        .expect("reader is set");
    assert_eq!(html, "<div class=\"list-view\"></div>");
}

/// Ensures the layout is still rendered for an empty reader when asked to.
#[test]
fn show_on_empty_keeps_the_layout() {
    let html = list(reader(Vec::new()))
        .show_on_empty(true)
        .layout("[{summary}|{items}|{pager}]")
        .run()
        .expect("reader is set");

    assert_eq!(html, "<div class=\"list-view\">[||]</div>");
}

/// Ensures the sorter section lists sortable fields with their direction.
#[test]
fn sorter_section_links_to_the_toggled_order() {
    let rows = vec![json!({"name": "b", "price": 2}), json!({"name": "a", "price": 1})];
    let reader: Arc<dyn DataReader> = Arc::new(
        IterableDataReader::new(rows)
            .with_sort(Sort::only(["name", "price"]).with_order_string("name")),
    );

    let html = list(reader)
        .layout("{sorter}")
        .sorter(SorterConfig::default().label("price", "Price, $"))
        .run()
        .expect("reader is set");

    assert_eq!(
        html,
        "<div class=\"list-view\"><ul class=\"sorter\">\
         <li><a class=\"asc\" href=\"/list?sort=-name\" data-sort=\"-name\">Name</a></li>\n\
         <li><a href=\"/list?sort=price\" data-sort=\"price\">Price, $</a></li></ul></div>"
    );
}

/// Ensures rows come out in the reader's sort order.
#[test]
fn items_follow_the_reader_order() {
    let rows = vec![json!({"name": "b"}), json!({"name": "a"}), json!({"name": "c"})];
    let reader: Arc<dyn DataReader> = Arc::new(
        IterableDataReader::new(rows)
            .with_key_field("name")
            .with_sort(Sort::only(["name"]).with_order_string("-name")),
    );

    let html = list(reader)
        .layout("{items}")
        .item_view(|row, index| format!("{index}:{}", row.key_string()))
        .separator("")
        .run()
        .expect("reader is set");

    assert_eq!(
        html,
        "<div class=\"list-view\"><div data-key=\"c\">0:c</div>\
         <div data-key=\"b\">1:b</div><div data-key=\"a\">2:a</div></div>"
    );
}

/// Ensures a missing reader is reported instead of rendering.
#[test]
fn missing_reader_is_an_error() {
    let view = ListView::new(Arc::new(IcuMessageFormatter::new()));

    assert_eq!(view.run(), Err(DataViewError::MissingDataReader));
}
