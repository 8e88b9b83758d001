//! [MiniJinja](https://github.com/mitsuhiko/minijinja) views.
use std::path::{Path, PathBuf};

use minijinja::{path_loader, AutoEscape, Environment, ErrorKind};
use serde_json::Value;

use super::super::{model::context, names, Error, ViewsRenderer};
use crate::http::{MediaType, Request};

pub const DEFAULT_EXTENSION: &str = "j2";
const NAME: &str = "minijinja";

/// Renders `*.j2` templates with MiniJinja.
///
/// Templates are loaded lazily from the views folder, by name without the extension.
/// Output is always HTML-escaped.
pub struct MinijinjaViewsRenderer {
    env: Environment<'static>,
    folder: PathBuf,
    extension: String,
}

impl MinijinjaViewsRenderer {
    pub fn new(folder: impl AsRef<Path>, extension: &str) -> Self {
        let folder = folder.as_ref().to_owned();
        let extension = extension.trim_start_matches('.').to_string();

        let loader = path_loader(&folder);
        let suffix = extension.clone();

        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.set_loader(move |name| loader(&format!("{}.{}", name, suffix)));

        Self {
            env,
            folder,
            extension,
        }
    }

    fn view(&self, view: &str) -> String {
        names::normalize_file(view, &self.extension)
    }
}

impl ViewsRenderer for MinijinjaViewsRenderer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn exists(&self, view: &str) -> bool {
        let view = self.view(view);
        !view.is_empty()
            && self
                .folder
                .join(format!("{}.{}", view, self.extension))
                .is_file()
    }

    fn produces(&self) -> Option<MediaType> {
        Some(MediaType::text_html())
    }

    fn render(&self, view: &str, model: &Value, _request: Option<&Request>) -> Result<String, Error> {
        let template = self.env.get_template(&self.view(view)).map_err(|err| {
            if err.kind() == ErrorKind::TemplateNotFound {
                Error::TemplateNotFound(view.to_string())
            } else {
                Error::render_failure(view, NAME, err)
            }
        })?;

        template
            .render(context(model))
            .map_err(|err| Error::render_failure(view, NAME, err))
    }

    fn view_names(&self) -> Vec<String> {
        names::discover(&self.folder, &self.extension).unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use std::fs::{create_dir_all, write};
    use tempdir::TempDir;

    #[test]
    fn test_minijinja() {
        let dir = TempDir::new("minijinja").expect("tempdir");
        create_dir_all(dir.path().join("layouts")).expect("mkdir");
        write(
            dir.path().join("layouts/main.j2"),
            "<body>{% block content %}{% endblock %}</body>",
        )
        .expect("write");
        write(
            dir.path().join("home.j2"),
            r#"{% extends "layouts/main" %}{% block content %}{% if loggedIn %}<h1>{{ username }}</h1>{% endif %}{% endblock %}"#,
        )
        .expect("write");
        write(dir.path().join("broken.j2"), "{% if %}").expect("write");

        let renderer = MinijinjaViewsRenderer::new(dir.path(), ".j2");

        assert!(renderer.exists("home"));
        assert!(renderer.exists("home.j2"));
        assert!(!renderer.exists("nope"));
        assert_eq!(renderer.view_names(), vec!["broken", "home", "layouts/main"]);

        let html = renderer
            .render("home", &json!({"username": "<b>", "loggedIn": true}), None)
            .expect("render");
        assert_eq!(html, "<body><h1>&lt;b&gt;</h1></body>");

        let html = renderer.render("home", &Value::Null, None).expect("render");
        assert_eq!(html, "<body></body>");

        assert!(matches!(
            renderer.render("nope", &json!({}), None),
            Err(Error::TemplateNotFound(_))
        ));
        assert!(matches!(
            renderer.render("broken", &json!({}), None),
            Err(Error::RenderFailure { engine: "minijinja", .. })
        ));
    }
}
