use pretty_assertions::assert_eq;
use pushkind_dataview::errors::DataViewError;
use pushkind_dataview::format::Format;
use pushkind_dataview::html::Attributes;
use pushkind_dataview::views::{DetailAttribute, DetailView};
use serde::Serialize;
use serde_json::json;

fn order() -> serde_json::Value {
    json!({
        "id": 15,
        "customer": {"name": "Ann", "email": "ann@example.com"},
        "note": "first line\nsecond <line>",
        "paid": true,
    })
}

/// Ensures attribute values, relation paths and formats are rendered.
#[test]
fn attributes_render_values_and_relations() {
    let html = DetailView::new()
        .model(order())
        .attributes([
            DetailAttribute::new("id"),
            DetailAttribute::new("customer.name"),
            DetailAttribute::parse("customer.email:email:E-mail").expect("valid spec"),
            DetailAttribute::new("note").format(Format::Ntext),
            DetailAttribute::new("paid").format(Format::Boolean),
            DetailAttribute::new("customer.phone"),
        ])
        .run()
        .expect("model is set");

    assert_eq!(
        html,
        "<table class=\"table table-striped table-bordered detail-view\">\
         <tr><th>Id</th><td>15</td></tr>\n\
         <tr><th>Customer Name</th><td>Ann</td></tr>\n\
         <tr><th>E-mail</th><td><a href=\"mailto:ann@example.com\">ann@example.com</a></td></tr>\n\
         <tr><th>Note</th><td>first line<br>\nsecond &lt;line&gt;</td></tr>\n\
         <tr><th>Paid</th><td>Yes</td></tr>\n\
         <tr><th>Customer Phone</th><td><span class=\"not-set\">(not set)</span></td></tr>\
         </table>"
    );
}

/// Ensures non-ASCII labels and attribute names survive untouched.
#[test]
fn unicode_labels_are_kept() {
    let html = DetailView::new()
        .model(json!({"ИдентификаторТовара": 1, "id": 2}))
        .options(Attributes::new())
        .attributes([
            DetailAttribute::new("ИдентификаторТовара"),
            DetailAttribute::new("id").label("Идентификатор"),
        ])
        .run()
        .expect("model is set");

    assert_eq!(
        html,
        "<table><tr><th>Идентификатор Товара</th><td>1</td></tr>\n\
         <tr><th>Идентификатор</th><td>2</td></tr></table>"
    );
}

/// Ensures caption and content options reach their cells.
#[test]
fn caption_and_content_options_are_rendered() {
    let html = DetailView::new()
        .model(order())
        .options(Attributes::new().with("tag", "div"))
        .template("<p><b{captionOptions}>{label}</b><span{contentOptions}>{value}</span></p>")
        .attribute(
            DetailAttribute::new("id")
                .caption_options(Attributes::new().with_class("caption"))
                .content_options(Attributes::new().with("title", "Order id")),
        )
        .run()
        .expect("model is set");

    assert_eq!(
        html,
        "<div><p><b class=\"caption\">Id</b><span title=\"Order id\">15</span></p></div>"
    );
}

/// Ensures hidden attributes are skipped and computed values are shown.
#[test]
fn visibility_and_computed_values() {
    let html = DetailView::new()
        .model(order())
        .options(Attributes::new())
        .attributes([
            DetailAttribute::new("id").visible(false),
            DetailAttribute::labelled("Summary").value(|model| {
                let customer = model["customer"]["name"].as_str().unwrap_or_default();
                json!(format!("#{} for {customer}", model["id"]))
            }),
        ])
        .run()
        .expect("model is set");

    assert_eq!(
        html,
        "<table><tr><th>Summary</th><td>#15 for Ann</td></tr></table>"
    );
}

/// Ensures serialisable models are accepted directly.
#[test]
fn serialisable_models_are_shown() {
    #[derive(Serialize)]
    struct Item {
        price: u32,
        title: String,
    }

    let html = DetailView::new()
        .model_from(&Item {
            price: 25,
            title: "Lamp".to_string(),
        })
        .expect("item serialises")
        .options(Attributes::new())
        .run()
        .expect("model is set");

    assert_eq!(
        html,
        "<table><tr><th>Price</th><td>25</td></tr>\n<tr><th>Title</th><td>Lamp</td></tr></table>"
    );
}

/// Ensures invalid attribute specs and missing models are errors.
#[test]
fn configuration_errors_are_reported() {
    assert!(matches!(
        DetailAttribute::parse("id:unknown"),
        Err(DataViewError::InvalidConfig(_))
    ));
    assert_eq!(
        DetailView::new().run(),
        Err(DataViewError::MissingProperty("model"))
    );
}
