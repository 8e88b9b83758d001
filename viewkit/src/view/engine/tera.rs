//! [Tera](https://keats.github.io/tera/) views.
use std::path::Path;

use serde_json::Value;
use tera::{Context, Tera};
use tracing::debug;

use super::super::{model::context, names, Error, ViewsRenderer};
use crate::http::{MediaType, Request};

pub const DEFAULT_EXTENSION: &str = "html";
const NAME: &str = "tera";

/// Renders `*.html` templates (or the configured extension) with Tera.
///
/// Templates are named by their path relative to the views folder, without the extension,
/// so `views/layouts/main.html` is `"layouts/main"`, also inside `{% extends %}` and `{% include %}`.
/// Every template is HTML-escaped.
pub struct TeraViewsRenderer {
    tera: Tera,
    extension: String,
}

impl TeraViewsRenderer {
    pub fn new(folder: impl AsRef<Path>, extension: &str) -> Result<Self, Error> {
        let folder = folder.as_ref();
        let extension = extension.trim_start_matches('.').to_string();

        let files = names::discover(folder, &extension)?
            .into_iter()
            .map(|view| (folder.join(format!("{}.{}", view, extension)), Some(view)))
            .collect::<Vec<_>>();

        debug!("tera: loading {} templates from {}", files.len(), folder.display());

        let mut tera = Tera::default();
        tera.autoescape_on(vec![""]);
        tera.add_template_files(files)
            .map_err(|err| Error::load(NAME, err))?;

        Ok(Self { tera, extension })
    }

    fn view(&self, view: &str) -> String {
        names::normalize_file(view, &self.extension)
    }
}

impl ViewsRenderer for TeraViewsRenderer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn exists(&self, view: &str) -> bool {
        let view = self.view(view);
        self.tera.get_template_names().any(|name| name == view)
    }

    fn produces(&self) -> Option<MediaType> {
        Some(MediaType::text_html())
    }

    fn render(&self, view: &str, model: &Value, _request: Option<&Request>) -> Result<String, Error> {
        let name = self.view(view);
        let context =
            Context::from_value(context(model)).map_err(|err| Error::render_failure(view, NAME, err))?;

        self.tera
            .render(&name, &context)
            .map_err(|err| match err.kind {
                tera::ErrorKind::TemplateNotFound(ref missing) if *missing == name => {
                    Error::TemplateNotFound(view.to_string())
                }
                _ => Error::render_failure(view, NAME, err),
            })
    }

    fn view_names(&self) -> Vec<String> {
        let mut names = self
            .tera
            .get_template_names()
            .map(String::from)
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

    fn renderer() -> (TempDir, TeraViewsRenderer) {
        let dir = TempDir::new("tera").expect("tempdir");
        create_dir_all(dir.path().join("layouts")).expect("mkdir");
        write(
            dir.path().join("layouts/main.html"),
            "<body>{% block content %}{% endblock content %}</body>",
        )
        .expect("write");
        write(
            dir.path().join("home.html"),
            r#"{% extends "layouts/main" %}{% block content %}<h1>{{ username }}</h1>{% endblock content %}"#,
        )
        .expect("write");
        write(dir.path().join("ignored.hbs"), "{{username}}").expect("write");

        let renderer = TeraViewsRenderer::new(dir.path(), DEFAULT_EXTENSION).expect("tera");
        (dir, renderer)
    }

    #[test]
    fn test_tera() {
        let (_dir, renderer) = renderer();

        assert!(renderer.exists("home"));
        assert!(renderer.exists("/home.html"));
        assert!(!renderer.exists("ignored"));
        assert_eq!(renderer.view_names(), vec!["home", "layouts/main"]);

        let html = renderer
            .render("home", &json!({"username": "<script>"}), None)
            .expect("render");
        assert_eq!(html, "<body><h1>&lt;script&gt;</h1></body>");
    }

    #[test]
    fn test_tera_errors() {
        let (_dir, renderer) = renderer();

        assert!(matches!(
            renderer.render("nope", &json!({}), None),
            Err(Error::TemplateNotFound(_))
        ));
        assert!(matches!(
            renderer.render("home", &json!([1, 2]), None),
            Err(Error::RenderFailure { engine: "tera", .. })
        ));

        let missing = TeraViewsRenderer::new("/definitely/not/here", "html").expect("tera");
        assert!(missing.view_names().is_empty());
    }
}
