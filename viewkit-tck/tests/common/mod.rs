#![allow(dead_code)]
use std::path::PathBuf;

use askama::Template;
use serde::Deserialize;
use viewkit::view::engine::{
    AskamaViewsRenderer, HandlebarsViewsRenderer, MinijinjaViewsRenderer, TeraViewsRenderer,
};
use viewkit::view::Views;

fn folder(engine: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("templates")
        .join(engine)
}

pub fn tera() -> Views {
    viewkit_tck::views(TeraViewsRenderer::new(folder("tera"), "html").expect("tera"))
}

pub fn handlebars() -> Views {
    viewkit_tck::views(HandlebarsViewsRenderer::new(folder("handlebars"), "hbs").expect("handlebars"))
}

pub fn minijinja() -> Views {
    viewkit_tck::views(MinijinjaViewsRenderer::new(folder("minijinja"), "j2"))
}

pub fn askama() -> Views {
    viewkit_tck::views(
        AskamaViewsRenderer::new()
            .register::<Home>("home")
            .register::<Fruits>("fruits")
            .register::<FruitsProcessor>("fruits-processor")
            .register::<FruitItem>("fruit")
            .register::<SecurityPage>("security")
            .register::<Escape>("escape"),
    )
}

#[derive(Template, Deserialize)]
#[template(path = "home.html")]
struct Home {
    #[serde(default)]
    username: String,
    #[serde(rename = "loggedIn", default)]
    logged_in: bool,
}

#[derive(Template, Deserialize)]
#[template(path = "fruits.html")]
struct Fruits {
    fruit: String,
    color: String,
}

#[derive(Deserialize)]
struct AppConfig {
    name: String,
}

#[derive(Template, Deserialize)]
#[template(path = "fruits-processor.html")]
struct FruitsProcessor {
    fruit: String,
    config: AppConfig,
}

#[derive(Template, Deserialize)]
#[template(path = "fruit.html")]
struct FruitItem {
    fruit: String,
}

#[derive(Deserialize)]
struct Attributes {
    email: String,
}

#[derive(Deserialize)]
struct Principal {
    name: String,
    attributes: Attributes,
}

#[derive(Template, Deserialize)]
#[template(path = "security.html")]
struct SecurityPage {
    securitycustom: Principal,
}

#[derive(Template, Deserialize)]
#[template(path = "escape.html")]
struct Escape {
    text: String,
}
