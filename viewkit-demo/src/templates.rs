//! Askama templates, compiled in from `templates/`.
use askama::Template;
use serde::Deserialize;

#[derive(Template, Deserialize)]
#[template(path = "askama/home.html")]
pub struct Home {
    username: String,
    #[serde(rename = "loggedIn", default)]
    logged_in: bool,
    #[serde(rename = "cspNonce", default)]
    csp_nonce: Option<String>,
}

#[derive(Template, Deserialize)]
#[template(path = "askama/fruits.html")]
pub struct Fruits {
    fruit: String,
    color: String,
}
