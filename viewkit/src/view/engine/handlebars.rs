//! [Handlebars](https://github.com/sunng87/handlebars-rust) views.
use std::path::{Path, PathBuf};

use handlebars::{Handlebars, RenderErrorReason};
use serde_json::Value;
use tracing::debug;

use super::super::{model::context, names, Error, ViewsRenderer};
use crate::http::{MediaType, Request};

pub const DEFAULT_EXTENSION: &str = "hbs";
const NAME: &str = "handlebars";

/// Renders `*.hbs` templates with Handlebars.
///
/// Templates are registered under their path relative to the views folder, without the extension,
/// which is also how partials refer to them: `{{> layouts/header}}`.
pub struct HandlebarsViewsRenderer {
    registry: Handlebars<'static>,
    folder: PathBuf,
    extension: String,
}

impl HandlebarsViewsRenderer {
    pub fn new(folder: impl AsRef<Path>, extension: &str) -> Result<Self, Error> {
        let mut renderer = Self {
            registry: Handlebars::new(),
            folder: folder.as_ref().to_owned(),
            extension: extension.trim_start_matches('.').to_string(),
        };
        renderer.registry.set_strict_mode(false);
        renderer.load()?;

        Ok(renderer)
    }

    /// Re-read templates from disk on every render.
    ///
    /// Templates are registered again, since the registry only tracks files
    /// loaded while dev mode is on.
    pub fn dev_mode(mut self, dev_mode: bool) -> Result<Self, Error> {
        if self.registry.dev_mode() != dev_mode {
            self.registry.set_dev_mode(dev_mode);
            self.registry.clear_templates();
            self.load()?;
        }

        Ok(self)
    }

    fn load(&mut self) -> Result<(), Error> {
        let views = names::discover(&self.folder, &self.extension)?;
        debug!(
            "handlebars: loading {} templates from {}",
            views.len(),
            self.folder.display()
        );

        for view in views {
            let path = self.folder.join(format!("{}.{}", view, self.extension));
            self.registry
                .register_template_file(&view, &path)
                .map_err(|err| Error::load(NAME, err))?;
        }

        Ok(())
    }

    fn view(&self, view: &str) -> String {
        names::normalize_file(view, &self.extension)
    }
}

impl ViewsRenderer for HandlebarsViewsRenderer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn exists(&self, view: &str) -> bool {
        self.registry.has_template(&self.view(view))
    }

    fn produces(&self) -> Option<MediaType> {
        Some(MediaType::text_html())
    }

    fn render(&self, view: &str, model: &Value, _request: Option<&Request>) -> Result<String, Error> {
        let name = self.view(view);

        self.registry
            .render(&name, &context(model))
            .map_err(|err| match err.reason() {
                RenderErrorReason::TemplateNotFound(missing) if *missing == name => {
                    Error::TemplateNotFound(view.to_string())
                }
                _ => Error::render_failure(view, NAME, err),
            })
    }

    fn view_names(&self) -> Vec<String> {
        let mut names = self
            .registry
            .get_templates()
            .keys()
            .cloned()
            .collect::<Vec<_>>();
        names.sort();
        names
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use std::fs::{create_dir_all, write};
    use tempdir::TempDir;

    fn renderer(dir: &TempDir) -> HandlebarsViewsRenderer {
        create_dir_all(dir.path().join("layouts")).expect("mkdir");
        write(dir.path().join("layouts/header.hbs"), "<h1>{{title}}</h1>").expect("write");
        write(
            dir.path().join("home.hbs"),
            "{{> layouts/header}}{{#if loggedIn}}<p>{{username}}</p>{{/if}}",
        )
        .expect("write");
        write(dir.path().join("ignored.html"), "{{ username }}").expect("write");

        HandlebarsViewsRenderer::new(dir.path(), DEFAULT_EXTENSION).expect("handlebars")
    }

    #[test]
    fn test_handlebars() {
        let dir = TempDir::new("handlebars").expect("tempdir");
        let renderer = renderer(&dir);

        assert!(renderer.exists("home"));
        assert!(renderer.exists("home.hbs"));
        assert!(!renderer.exists("ignored"));
        assert_eq!(renderer.view_names(), vec!["home", "layouts/header"]);

        let html = renderer
            .render(
                "home",
                &json!({"title": "Fruits & co", "username": "<b>", "loggedIn": true}),
                None,
            )
            .expect("render");
        assert_eq!(html, "<h1>Fruits &amp; co</h1><p>&lt;b&gt;</p>");

        let html = renderer.render("home", &Value::Null, None).expect("render");
        assert_eq!(html, "<h1></h1>");

        assert!(matches!(
            renderer.render("nope", &json!({}), None),
            Err(Error::TemplateNotFound(_))
        ));
    }

    #[test]
    fn test_dev_mode() {
        let dir = TempDir::new("handlebars").expect("tempdir");
        let renderer = renderer(&dir).dev_mode(true).expect("dev mode");

        write(dir.path().join("home.hbs"), "<h2>{{title}}</h2>").expect("write");
        let html = renderer
            .render("home", &json!({"title": "x"}), None)
            .expect("render");
        assert_eq!(html, "<h2>x</h2>");
    }

    #[test]
    fn test_bad_template() {
        let dir = TempDir::new("handlebars").expect("tempdir");
        write(dir.path().join("bad.hbs"), "{{#if loggedIn}}unclosed").expect("write");

        assert!(matches!(
            HandlebarsViewsRenderer::new(dir.path(), "hbs"),
            Err(Error::Load { engine: "handlebars", .. })
        ));
    }
}
