#![cfg(feature = "server")]

use std::fs;

use pushkind_dataview::errors::DataViewError;
use pushkind_dataview::models::config::load_server_config;
use pushkind_dataview::reader::DEFAULT_PAGE_SIZE;
use pushkind_dataview::widgets::PageLabel;
use tempfile::TempDir;

const BASE: &str = "address: 127.0.0.1
port: 8080
templates_dir: templates/**/*
data_file: data/items.json
";

fn config_dir(default: &str, overrides: Option<(&str, &str)>) -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("default.yaml"), default).expect("write default");
    if let Some((env, content)) = overrides {
        fs::write(dir.path().join(format!("{env}.yaml")), content).expect("write overrides");
    }
    dir
}

/// Ensures missing widget settings fall back to the widget defaults.
#[test]
fn defaults_fill_missing_settings() {
    let dir = config_dir(BASE, None);

    let config = load_server_config(dir.path(), "missing").expect("valid config");

    assert_eq!(config.port, 8080);
    assert_eq!(config.key_field, "id");
    assert!(config.columns.is_empty());
    assert_eq!(config.widgets.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(config.widgets.first_page_label, PageLabel::Hidden);
}

/// Ensures the environment file overrides the defaults.
#[test]
fn environment_file_overrides_defaults() {
    let dir = config_dir(
        &format!("{BASE}widgets:\n  page_size: 5\n"),
        Some((
            "test",
            "key_field: sku\ncolumns:\n  - name\n  - price:integer:Price\nwidgets:\n  page_size: 20\n  first_page_label: true\n  last_page_label: Last\n  pager_options:\n    class: pages\n    tag: nav\n",
        )),
    );

    let config = load_server_config(dir.path(), "test").expect("valid config");

    assert_eq!(config.key_field, "sku");
    assert_eq!(config.columns, vec!["name", "price:integer:Price"]);
    assert_eq!(config.widgets.page_size, 20);

    let pager = config.widgets.pager_config();
    assert_eq!(pager.first_page_label, PageLabel::Number);
    assert_eq!(pager.last_page_label, PageLabel::Text("Last".to_string()));
    assert_eq!(pager.options.get("class").and_then(|v| v.as_text()), Some("pages"));
    assert_eq!(pager.options.get("tag").and_then(|v| v.as_text()), Some("nav"));
}

/// Ensures invalid widget settings are rejected.
#[test]
fn invalid_widget_settings_are_rejected() {
    let dir = config_dir(&format!("{BASE}widgets:\n  page_size: 0\n"), None);

    let result = load_server_config(dir.path(), "local");

    assert!(matches!(result, Err(DataViewError::InvalidConfig(_))));
}

/// Ensures a missing default file is a configuration error.
#[test]
fn missing_default_file_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");

    let result = load_server_config(dir.path(), "local");

    assert!(matches!(result, Err(DataViewError::InvalidConfig(_))));
}
