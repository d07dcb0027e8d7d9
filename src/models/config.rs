//! Configuration model loaded from external sources.

use std::path::Path;

use config::Config;
use serde::Deserialize;

use crate::errors::DataViewResult;
use crate::models::settings::WidgetSettings;

#[derive(Clone, Debug, Deserialize)]
/// Settings of the demo server.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    /// JSON file holding the array of rows to browse.
    pub data_file: String,
    /// Prefix of every generated link.
    #[serde(default)]
    pub base_path: String,
    /// Field identifying a row; row positions are used when it is missing.
    #[serde(default = "default_key_field")]
    pub key_field: String,
    /// Grid columns as `attribute:format:label` strings; guessed from the
    /// first row when empty.
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub widgets: WidgetSettings,
}

fn default_key_field() -> String {
    "id".to_string()
}

/// Loads `default.yaml` and the optional `{app_env}.yaml` from `config_dir`,
/// then `APP_`-prefixed environment variables, and validates the widget
/// settings.
pub fn load_server_config(config_dir: &Path, app_env: &str) -> DataViewResult<ServerConfig> {
    let settings = Config::builder()
        .add_source(config::File::from(config_dir.join("default")))
        .add_source(config::File::from(config_dir.join(app_env)).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()?;

    let mut server_config = settings.try_deserialize::<ServerConfig>()?;
    server_config.widgets = server_config.widgets.validated()?;
    Ok(server_config)
}
