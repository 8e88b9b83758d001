//! [Askama](https://askama.rs) views.
//!
//! Askama templates are compiled into the binary, so there is no folder to scan.
//! Each template struct is registered under a view name, and the model is
//! deserialized into it before rendering.
//!
//! ### Example
//!
//! ```rust,ignore
//! #[derive(askama::Template, serde::Deserialize)]
//! #[template(path = "home.html")]
//! struct Home {
//!     username: String,
//!     #[serde(rename = "loggedIn")]
//!     logged_in: bool,
//! }
//!
//! let renderer = AskamaViewsRenderer::new().register::<Home>("askama/home");
//! ```
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::super::{model::context, Error, ViewsRenderer};
use crate::http::{MediaType, Request};

const NAME: &str = "askama";

type RenderFn = Box<dyn Fn(&str, &Value) -> Result<String, Error> + Send + Sync>;

/// Renders registered Askama templates.
#[derive(Default)]
pub struct AskamaViewsRenderer {
    views: HashMap<String, RenderFn>,
}

impl AskamaViewsRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register template `T` as `view`.
    pub fn register<T>(mut self, view: impl ToString) -> Self
    where
        T: askama::Template + DeserializeOwned + 'static,
    {
        self.views.insert(
            view.to_string(),
            Box::new(|view: &str, model: &Value| {
                let template: T = serde_json::from_value(context(model))
                    .map_err(|err| Error::render_failure(view, NAME, err))?;

                askama::Template::render(&template).map_err(|err| Error::render_failure(view, NAME, err))
            }),
        );
        self
    }
}

impl ViewsRenderer for AskamaViewsRenderer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn exists(&self, view: &str) -> bool {
        self.views.contains_key(view)
    }

    fn produces(&self) -> Option<MediaType> {
        Some(MediaType::text_html())
    }

    fn render(&self, view: &str, model: &Value, _request: Option<&Request>) -> Result<String, Error> {
        let render = self
            .views
            .get(view)
            .ok_or_else(|| Error::TemplateNotFound(view.to_string()))?;

        render(view, model)
    }

    fn view_names(&self) -> Vec<String> {
        let mut names = self.views.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(askama::Template, Deserialize)]
    #[template(
        source = "{% if logged_in %}<h1>{{ username }}</h1>{% endif %}",
        ext = "html"
    )]
    struct Home {
        username: String,
        #[serde(rename = "loggedIn", default)]
        logged_in: bool,
    }

    #[test]
    fn test_askama() {
        let renderer = AskamaViewsRenderer::new().register::<Home>("home");

        assert!(renderer.exists("home"));
        assert!(!renderer.exists("fruits"));
        assert_eq!(renderer.view_names(), vec!["home"]);

        let html = renderer
            .render("home", &json!({"username": "<b>", "loggedIn": true}), None)
            .expect("render");
        // Askama escapes with numeric entities.
        assert_eq!(html, "<h1>&#60;b&#62;</h1>");

        let html = renderer
            .render("home", &json!({"username": "sdelamo"}), None)
            .expect("render");
        assert_eq!(html, "");

        assert!(matches!(
            renderer.render("home", &json!({"loggedIn": true}), None),
            Err(Error::RenderFailure { engine: "askama", .. })
        ));
        assert!(matches!(
            renderer.render("fruits", &json!({}), None),
            Err(Error::TemplateNotFound(_))
        ));
    }
}
