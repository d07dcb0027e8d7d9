#![cfg(feature = "server")]

use actix_web::{App, http::StatusCode, test, web};
use pushkind_dataview::models::config::ServerConfig;
use pushkind_dataview::models::settings::WidgetSettings;
use pushkind_dataview::routes::main::{Items, show_index, show_item};
use serde_json::json;
use tera::Tera;

fn server_config() -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 8080,
        templates_dir: "templates/**/*".to_string(),
        data_file: "data/items.json".to_string(),
        base_path: String::new(),
        key_field: "id".to_string(),
        columns: Vec::new(),
        widgets: WidgetSettings {
            page_size: 2,
            ..WidgetSettings::default()
        },
    }
}

fn items() -> Items {
    vec![
        json!({"id": 1, "name": "Oak chair", "price": 45}),
        json!({"id": 2, "name": "Walnut table", "price": 320}),
        json!({"id": 3, "name": "Desk lamp", "price": 28}),
    ]
}

macro_rules! init_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(items()))
                .app_data(web::Data::new(server_config()))
                .app_data(web::Data::new(
                    Tera::new("templates/**/*").expect("templates parse"),
                ))
                .service(show_index)
                .service(show_item),
        )
        .await
    };
}

/// Ensures the index page renders the grid with the requested order.
#[actix_web::test]
async fn index_renders_the_grid() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/?sort=-price").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).expect("utf-8 body");
    assert!(body.contains("class=\"grid-view\""));
    assert!(body.contains("Showing <b>1-2</b> of <b>3</b> items."));
    let table = body.find("Walnut table").expect("most expensive first");
    let chair = body.find("Oak chair").expect("second most expensive");
    assert!(table < chair);
    assert!(!body.contains("Desk lamp"));
    assert!(body.contains("<link href=\"/?sort=-price&amp;view=grid&amp;page=2\" rel=\"next\">"));
}

/// Ensures the list view is selected through the query string.
#[actix_web::test]
async fn index_renders_the_list_view() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/?view=list&page=2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).expect("utf-8 body");
    assert!(body.contains("class=\"list-view\""));
    assert!(body.contains("<a href=\"/items/3\">Desk lamp</a>"));
}

/// Ensures unknown view names are rejected by the query extractor.
#[actix_web::test]
async fn unknown_view_is_a_bad_request() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/?view=cards").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

/// Ensures items are shown by key.
#[actix_web::test]
async fn item_page_renders_the_detail_view() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/items/2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).expect("utf-8 body");
    assert!(body.contains("<h1>Walnut table</h1>"));
    assert!(body.contains("<tr><th>Price</th><td>320</td></tr>"));
}

/// Ensures unknown keys answer 404.
#[actix_web::test]
async fn missing_item_is_not_found() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/items/42").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
