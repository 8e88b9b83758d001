//! Turbo Stream elements.
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{attribute, Template, TurboStreamAction};
use crate::view::Error;

static DOM_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+[\w\-:.]*$").expect("dom id regex"));
static CSS_QUERY_SELECTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w\-:.]*$").expect("css selector regex"));

/// A rendered-ready `<turbo-stream>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct TurboStream {
    action: TurboStreamAction,
    target_dom_id: Option<String>,
    target_css_query_selector: Option<String>,
    template: Option<String>,
}

impl std::fmt::Display for TurboStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl TurboStream {
    pub fn builder() -> TurboStreamBuilder {
        TurboStreamBuilder::default()
    }

    pub fn action(&self) -> TurboStreamAction {
        self.action
    }

    pub fn target_dom_id(&self) -> Option<&str> {
        self.target_dom_id.as_deref()
    }

    pub fn target_css_query_selector(&self) -> Option<&str> {
        self.target_css_query_selector.as_deref()
    }

    /// Render the element. The template, if any, goes inside `<template>`.
    pub fn render(&self) -> String {
        let mut html = String::from("<turbo-stream");
        html.push_str(&attribute("action", self.action.as_str()));

        if let Some(ref target) = self.target_dom_id {
            html.push_str(&attribute("target", target));
        }

        if let Some(ref targets) = self.target_css_query_selector {
            html.push_str(&attribute("targets", targets));
        }

        html.push('>');

        if let Some(ref template) = self.template {
            html.push_str("<template>");
            html.push_str(template);
            html.push_str("</template>");
        }

        html.push_str("</turbo-stream>");
        html
    }
}

/// Builds a [`TurboStream`], validating targets.
#[derive(Debug, Clone)]
pub struct TurboStreamBuilder {
    action: Option<TurboStreamAction>,
    target_dom_id: Option<String>,
    target_css_query_selector: Option<String>,
    template: Option<Template>,
    dom_id_pattern: Option<Regex>,
    css_query_selector_pattern: Option<Regex>,
}

impl Default for TurboStreamBuilder {
    fn default() -> Self {
        Self {
            action: None,
            target_dom_id: None,
            target_css_query_selector: None,
            template: None,
            dom_id_pattern: Some(DOM_ID.clone()),
            css_query_selector_pattern: Some(CSS_QUERY_SELECTOR.clone()),
        }
    }
}

impl TurboStreamBuilder {
    pub fn action(mut self, action: TurboStreamAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn append(self) -> Self {
        self.action(TurboStreamAction::Append)
    }

    pub fn prepend(self) -> Self {
        self.action(TurboStreamAction::Prepend)
    }

    pub fn replace(self) -> Self {
        self.action(TurboStreamAction::Replace)
    }

    pub fn update(self) -> Self {
        self.action(TurboStreamAction::Update)
    }

    pub fn remove(self) -> Self {
        self.action(TurboStreamAction::Remove)
    }

    pub fn before(self) -> Self {
        self.action(TurboStreamAction::Before)
    }

    pub fn after(self) -> Self {
        self.action(TurboStreamAction::After)
    }

    pub fn morph(self) -> Self {
        self.action(TurboStreamAction::Morph)
    }

    pub fn refresh(self) -> Self {
        self.action(TurboStreamAction::Refresh)
    }

    /// DOM id of the target element.
    pub fn target_dom_id(mut self, id: impl ToString) -> Self {
        self.target_dom_id = Some(id.to_string());
        self
    }

    /// CSS selector matching several targets.
    pub fn target_css_query_selector(mut self, selector: impl ToString) -> Self {
        self.target_css_query_selector = Some(selector.to_string());
        self
    }

    /// Pattern DOM ids must match. `None` turns validation off.
    pub fn target_dom_id_pattern(mut self, pattern: Option<Regex>) -> Self {
        self.dom_id_pattern = pattern;
        self
    }

    /// Pattern CSS selectors must match. `None` turns validation off.
    pub fn target_css_query_selector_pattern(mut self, pattern: Option<Regex>) -> Self {
        self.css_query_selector_pattern = pattern;
        self
    }

    /// Use rendered HTML as the template.
    pub fn template(mut self, html: impl ToString) -> Self {
        self.template = Some(Template::Html(html.to_string()));
        self
    }

    /// Render `view` with `model` as the template.
    pub fn template_view(mut self, view: impl ToString, model: Value) -> Self {
        self.template = Some(Template::View {
            view: view.to_string(),
            model,
        });
        self
    }

    /// Set the model of a view template. Without a view this does nothing.
    pub fn template_model(mut self, new_model: Value) -> Self {
        if let Some(Template::View { ref mut model, .. }) = self.template {
            *model = new_model;
        }
        self
    }

    pub fn get_action(&self) -> Option<TurboStreamAction> {
        self.action
    }

    pub fn get_target_dom_id(&self) -> Option<&str> {
        self.target_dom_id.as_deref()
    }

    pub fn get_target_css_query_selector(&self) -> Option<&str> {
        self.target_css_query_selector.as_deref()
    }

    pub fn get_template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    /// Turn a view template into HTML with `render`.
    pub fn render_template(
        mut self,
        render: impl FnOnce(&str, &Value) -> Result<String, Error>,
    ) -> Result<Self, Error> {
        if let Some(Template::View { ref view, ref model }) = self.template {
            self.template = Some(Template::Html(render(view, model)?));
        }
        Ok(self)
    }

    /// Validate and build.
    ///
    /// Fails if the action is missing, a target doesn't match its pattern,
    /// or the template is a view that hasn't been rendered yet.
    pub fn build(self) -> Result<TurboStream, Error> {
        validate(&self.target_dom_id, &self.dom_id_pattern)?;
        validate(&self.target_css_query_selector, &self.css_query_selector_pattern)?;

        let action = self.action.ok_or(Error::MissingAction)?;

        let template = match self.template {
            Some(Template::Html(html)) => Some(html),
            Some(Template::View { view, .. }) => {
                return Err(Error::InvalidAttribute(format!(
                    "template view \"{}\" is not rendered",
                    view
                )))
            }
            None => None,
        };

        Ok(TurboStream {
            action,
            target_dom_id: self.target_dom_id,
            target_css_query_selector: self.target_css_query_selector,
            template,
        })
    }
}

fn validate(value: &Option<String>, pattern: &Option<Regex>) -> Result<(), Error> {
    if let (Some(value), Some(pattern)) = (value, pattern) {
        if !pattern.is_match(value) {
            return Err(Error::InvalidAttribute(value.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_remove_without_template() {
        let stream = TurboStream::builder()
            .remove()
            .target_dom_id("dom_id")
            .build()
            .unwrap();
        assert_eq!(
            stream.render(),
            r#"<turbo-stream action="remove" target="dom_id"></turbo-stream>"#
        );
    }

    #[test]
    fn test_targets() {
        let stream = TurboStream::builder()
            .replace()
            .target_css_query_selector(".elementsWithClass")
            .template("<div>Hi</div>")
            .build();
        assert!(stream.is_ok());

        let stream = TurboStream::builder()
            .append()
            .target_css_query_selector("elements-with-class")
            .template("<div>Hi</div>")
            .build()
            .unwrap();
        assert_eq!(
            stream.to_string(),
            r#"<turbo-stream action="append" targets="elements-with-class"><template><div>Hi</div></template></turbo-stream>"#
        );
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            TurboStream::builder().target_dom_id("ok").build(),
            Err(Error::MissingAction)
        ));
        assert!(matches!(
            TurboStream::builder().update().target_dom_id("1abc").build(),
            Err(Error::InvalidAttribute(id)) if id == "1abc"
        ));
        assert!(matches!(
            TurboStream::builder()
                .update()
                .target_css_query_selector("div > p")
                .build(),
            Err(Error::InvalidAttribute(_))
        ));
        assert!(TurboStream::builder()
            .update()
            .target_dom_id_pattern(None)
            .target_dom_id("1abc")
            .build()
            .is_ok());
    }

    #[test]
    fn test_render_template() {
        let builder = TurboStream::builder()
            .update()
            .target_dom_id("fruit")
            .template_view("fruit", json!({"name": "apple"}));
        assert!(builder.clone().build().is_err());

        let stream = builder
            .render_template(|view, model| {
                Ok(format!("<b>{}:{}</b>", view, model["name"].as_str().unwrap()))
            })
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            stream.render(),
            r#"<turbo-stream action="update" target="fruit"><template><b>fruit:apple</b></template></turbo-stream>"#
        );
    }
}
