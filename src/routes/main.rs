use actix_web::{HttpResponse, Responder, get, web};
use serde_json::Value;
use tera::{Context, Tera};

use crate::models::config::ServerConfig;
use crate::routes::render_template;
use crate::services::{ServiceError, main as main_service};

/// Rows browsed by the server, loaded once at startup.
pub type Items = Vec<Value>;

#[get("/")]
pub async fn show_index(
    params: web::Query<main_service::IndexQuery>,
    items: web::Data<Items>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match main_service::load_index_page(&items, &server_config, params.into_inner()) {
        Ok(data) => {
            let mut context = Context::new();
            context.insert("current_page", "index");
            context.insert("base_path", &server_config.base_path);
            context.insert("view", &data.view);
            context.insert("content", &data.content);
            context.insert("link_tags", &data.link_tags);

            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load index page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/items/{id}")]
pub async fn show_item(
    id: web::Path<String>,
    items: web::Data<Items>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match main_service::load_detail_page(&items, &server_config, &id) {
        Ok(data) => {
            let mut context = Context::new();
            context.insert("current_page", "item");
            context.insert("base_path", &server_config.base_path);
            context.insert("title", &data.title);
            context.insert("content", &data.content);

            render_template(&tera, "main/detail.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load item {id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
