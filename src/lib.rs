//! Data presentation widgets: list, grid and detail views over pluggable
//! data readers, with pagers, sorters and localised summaries.
//!
//! The `server` feature adds a small Actix-web application browsing a JSON
//! file with these widgets.

pub mod columns;
mod error_conversions;
pub mod errors;
pub mod format;
pub mod html;
pub mod i18n;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod models;
pub mod reader;
pub mod url;
pub mod views;
pub mod widgets;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

pub use errors::{DataViewError, DataViewResult};

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use actix_web::{App, HttpServer, middleware, web};
    use tera::Tera;

    use crate::models::config::ServerConfig;
    use crate::routes::main::{show_index, show_item};
    use crate::services::main::load_rows;

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let items = load_rows(&server_config.data_file).map_err(|e| {
            std::io::Error::other(format!(
                "Failed to load rows from {}: {e}",
                server_config.data_file
            ))
        })?;
        log::info!("Loaded {} rows from {}", items.len(), server_config.data_file);

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);
        let items = web::Data::new(items);

        HttpServer::new(move || {
            App::new()
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(show_index)
                .service(show_item)
                .app_data(items.clone())
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
