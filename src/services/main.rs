use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::columns::{ActionColumn, DataColumn, SerialColumn};
use crate::dto::main::{DetailPageData, IndexPageData, ViewKind};
pub use crate::dto::main::IndexQuery;
use crate::errors::{DataViewError, DataViewResult};
use crate::format;
use crate::html::{self, Attributes};
use crate::i18n::{IcuMessageFormatter, MessageFormatter};
use crate::models::config::ServerConfig;
use crate::reader::{DataReader, IterableDataReader, OffsetPaginator, Paginator, Row, Sort};
use crate::services::{ServiceError, ServiceResult};
use crate::url::{QueryUrlGenerator, SORT_PARAM, UrlGenerator};
use crate::views::{DetailView, GridView, ListView};
use crate::widgets::LinkPager;

/// Reads the JSON array of rows browsed by the server.
pub fn load_rows(path: impl AsRef<Path>) -> DataViewResult<Vec<Value>> {
    let content = fs::read_to_string(path.as_ref())?;
    match serde_json::from_str(&content)? {
        Value::Array(rows) => Ok(rows),
        _ => Err(DataViewError::InvalidData(format!(
            "{} must contain a JSON array",
            path.as_ref().display()
        ))),
    }
}

/// Scalar fields of the first row.
fn scalar_fields(rows: &[Value]) -> Vec<String> {
    match rows.first() {
        Some(Value::Object(fields)) => fields
            .iter()
            .filter(|(_, value)| format::is_scalar(value))
            .map(|(name, _)| name.clone())
            .collect(),
        _ => Vec::new(),
    }
}

fn item_url(base_path: &str, key: &str) -> String {
    format!("{}/items/{key}", base_path.trim_end_matches('/'))
}

/// Builds the grid or list page for the requested page, order and view.
pub fn load_index_page(
    rows: &[Value],
    config: &ServerConfig,
    query: IndexQuery,
) -> ServiceResult<IndexPageData> {
    let settings = &config.widgets;
    let view = query.view.unwrap_or_default();

    let sort =
        Sort::only(scalar_fields(rows)).with_order_string(query.sort.as_deref().unwrap_or_default());
    let reader: Arc<dyn DataReader> = Arc::new(
        IterableDataReader::new(rows.to_vec())
            .with_key_field(config.key_field.clone())
            .with_sort(sort.clone()),
    );
    let paginator: Arc<dyn Paginator> = Arc::new(
        OffsetPaginator::new(reader.clone())
            .with_page_size(settings.page_size)
            .with_token(query.page.as_deref()),
    );

    let index_path = format!("{}/", config.base_path.trim_end_matches('/'));
    let urls: Arc<dyn UrlGenerator> = Arc::new(
        QueryUrlGenerator::new(index_path)
            .with_param(SORT_PARAM, sort.order_string())
            .with_param("view", view.as_str()),
    );
    let formatter: Arc<dyn MessageFormatter> = Arc::new(IcuMessageFormatter::new());

    let content = match view {
        ViewKind::Grid => {
            let base_path = config.base_path.clone();
            let mut grid = GridView::new(formatter)
                .data_reader(reader)
                .paginator(paginator.clone())
                .urls(urls.clone())
                .pager(settings.pager_config())
                .layout(settings.layout.clone())
                .empty_text(settings.empty_text.clone())
                .locale(settings.locale.clone())
                .table_options(settings.table_options.clone())
                .column(SerialColumn::new());

            grid = if config.columns.is_empty() {
                scalar_fields(rows)
                    .into_iter()
                    .fold(grid, |grid, field| grid.column(DataColumn::new(field)))
            } else {
                grid.column_specs(&config.columns)?
            };

            grid.column(
                ActionColumn::new()
                    .template("{view}")
                    .url_creator(move |_, row, _| item_url(&base_path, &row.key_string())),
            )
            .run()
        }
        ViewKind::List => {
            let base_path = config.base_path.clone();
            ListView::new(formatter)
                .data_reader(reader)
                .paginator(paginator.clone())
                .urls(urls.clone())
                .pager(settings.pager_config())
                .layout(settings.layout.clone())
                .empty_text(settings.empty_text.clone())
                .locale(settings.locale.clone())
                .item_options(Attributes::new().with_class("item"))
                .item_view(move |row, _| render_list_item(&base_path, row))
                .run()
        }
    }
    .map_err(|err| {
        log::error!("Failed to render the index page: {err}");
        err
    })?;

    let link_tags = LinkPager::new(urls)
        .paginator(paginator)
        .config(settings.pager_config())
        .link_tags()?;

    Ok(IndexPageData {
        content,
        link_tags,
        view,
    })
}

fn render_list_item(base_path: &str, row: &Row) -> String {
    let title = ["name", "title"]
        .iter()
        .find_map(|field| format::value_at(&row.data, field))
        .map(format::display_string)
        .unwrap_or_else(|| row.key_string());

    html::a(
        &html::encode(&title),
        Some(&item_url(base_path, &row.key_string())),
        &Attributes::new(),
    )
}

/// Builds the detail page of the row whose key is `id`.
pub fn load_detail_page(
    rows: &[Value],
    config: &ServerConfig,
    id: &str,
) -> ServiceResult<DetailPageData> {
    let reader = IterableDataReader::new(rows.to_vec()).with_key_field(config.key_field.clone());
    let row = reader
        .read()
        .into_iter()
        .find(|row| row.key_string() == id)
        .ok_or(ServiceError::NotFound)?;

    let title = format::value_at(&row.data, "name")
        .map(format::display_string)
        .unwrap_or_else(|| row.key_string());

    let content = DetailView::new()
        .model(row.data)
        .locale(config.widgets.locale.clone())
        .run()
        .map_err(|err| {
            log::error!("Failed to render item {id}: {err}");
            err
        })?;

    Ok(DetailPageData { title, content })
}
