//! Engines for unit tests.
use std::collections::HashMap;

use serde_json::Value;

use super::{Error, ViewsRenderer};
use crate::http::{MediaType, Request};

/// Replaces `{{key}}` with `model[key]`. A template of `"boom"` fails to render.
pub struct StubRenderer {
    name: &'static str,
    order: i32,
    templates: HashMap<String, String>,
}

impl StubRenderer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            order: 0,
            templates: HashMap::new(),
        }
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn template(mut self, view: &str, source: &str) -> Self {
        self.templates.insert(view.into(), source.into());
        self
    }
}

impl ViewsRenderer for StubRenderer {
    fn name(&self) -> &'static str {
        self.name
    }

    fn exists(&self, view: &str) -> bool {
        self.templates.contains_key(view)
    }

    fn produces(&self) -> Option<MediaType> {
        Some(MediaType::text_html())
    }

    fn render(&self, view: &str, model: &Value, _request: Option<&Request>) -> Result<String, Error> {
        let template = self
            .templates
            .get(view)
            .ok_or_else(|| Error::TemplateNotFound(view.into()))?;

        if template == "boom" {
            return Err(Error::render_failure(
                view,
                self.name,
                std::io::Error::other("boom"),
            ));
        }

        let mut output = template.clone();
        if let Value::Object(model) = model {
            for (key, value) in model {
                let value = match value {
                    Value::String(s) => s.clone(),
                    value => value.to_string(),
                };
                output = output.replace(&format!("{{{{{}}}}}", key), &value);
            }
        }

        Ok(output)
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn view_names(&self) -> Vec<String> {
        let mut names = self.templates.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }
}

/// Claims every view, but only for `text/csv`.
pub struct CsvRenderer;

impl ViewsRenderer for CsvRenderer {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn exists(&self, _view: &str) -> bool {
        true
    }

    fn render(&self, _view: &str, model: &Value, _request: Option<&Request>) -> Result<String, Error> {
        let mut rows = vec![];
        if let Value::Object(model) = model {
            for (key, value) in model {
                rows.push(format!("{},{}", key, value));
            }
        }
        Ok(rows.join("\n"))
    }

    fn produces(&self) -> Option<MediaType> {
        Some(MediaType::new("text/csv"))
    }
}
