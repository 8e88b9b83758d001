//! The same view and model must render the same HTML on every engine.
mod common;

use serde_json::json;
use viewkit::view::Views;
use viewkit_tck::{normalize_html, Fruit};

fn engines() -> Vec<(&'static str, Views)> {
    vec![
        ("tera", common::tera()),
        ("handlebars", common::handlebars()),
        ("minijinja", common::minijinja()),
        ("askama", common::askama()),
    ]
}

fn assert_equivalent(view: &str, model: serde_json::Value) {
    let rendered = engines()
        .into_iter()
        .map(|(engine, views)| {
            let html = views.render(view, &model).expect("render").text();
            (engine, normalize_html(&html))
        })
        .collect::<Vec<_>>();

    let (first_engine, first) = &rendered[0];
    for (engine, html) in &rendered[1..] {
        assert_eq!(
            html, first,
            "\"{}\" differs between {} and {}",
            view, engine, first_engine
        );
    }
}

#[test]
fn home_is_equivalent() {
    assert_equivalent("home", json!({"username": "sdelamo", "loggedIn": true}));
    assert_equivalent("home", json!({"loggedIn": false}));
}

#[test]
fn fruits_are_equivalent() {
    let fruit = serde_json::to_value(Fruit::new("apple", "red")).expect("fruit");
    assert_equivalent("fruits", fruit);
    assert_equivalent("fruit", json!({"fruit": "kiwi"}));
}

#[test]
fn escaping_is_equivalent() {
    assert_equivalent("escape", json!({"text": "Fruits & <vegetables>"}));
    assert_equivalent("escape", json!({"text": "\"fresh\" and 'ripe'"}));
}
